//! Plain-text renderings of the four work views, project lists and details.

use std::fmt::Write;

use metronique::view::{StatusColumns, WorkStats};
use metronique::{Project, WorkItem};
use time::macros::format_description;
use time::OffsetDateTime;

const DESC_WIDTH: usize = 40;

fn date(value: Option<OffsetDateTime>) -> String {
    value
        .and_then(|d| d.format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_else(|| "-".to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn table(items: &[&WorkItem]) -> String {
    if items.is_empty() {
        return "No work items found\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<14} {:<40} {:<12} {:<9} {:<10} {:<10}",
        "ID", "TYPE", "DESCRIPTION", "STATUS", "PRIORITY", "START", "END"
    );
    for item in items {
        let _ = writeln!(
            out,
            "{:<12} {:<14} {:<40} {:<12} {:<9} {:<10} {:<10}",
            truncate(item.id.as_str(), 12),
            truncate(&item.work_type, 14),
            truncate(&item.work_desc, DESC_WIDTH),
            item.status,
            item.priority,
            date(item.start_date),
            date(item.end_date),
        );
    }
    out
}

pub fn cards(items: &[&WorkItem]) -> String {
    if items.is_empty() {
        return "No work items found\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "[{}] {} ({})", item.id, item.work_type, item.priority);
        let _ = writeln!(out, "  {}", item.work_desc);
        let _ = writeln!(
            out,
            "  {} | {} -> {}",
            item.status,
            date(item.start_date),
            date(item.end_date)
        );
        if !item.tags.is_empty() {
            let _ = writeln!(out, "  tags: {}", item.tags.join(", "));
        }
        out.push('\n');
    }
    out
}

fn kanban_entry(out: &mut String, item: &WorkItem) {
    let _ = writeln!(
        out,
        "  - [{}] {} ({})",
        item.id,
        truncate(&item.work_desc, DESC_WIDTH),
        item.priority
    );
}

pub fn kanban(columns: &StatusColumns<'_>) -> String {
    let mut out = String::new();
    for column in columns.iter() {
        let _ = writeln!(out, "{} ({})", column.status, column.items.len());
        for item in &column.items {
            kanban_entry(&mut out, item);
        }
        out.push('\n');
    }

    if !columns.unknown.is_empty() {
        let _ = writeln!(out, "Unknown status ({})", columns.unknown.len());
        for item in &columns.unknown {
            kanban_entry(&mut out, item);
            let _ = writeln!(out, "    status: {}", item.status);
        }
    }
    out
}

fn bar(count: usize, total: usize) -> String {
    if total == 0 {
        return String::new();
    }
    "#".repeat((count * 30).div_ceil(total))
}

pub fn stats(stats: &WorkStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total:         {}", stats.total);
    let _ = writeln!(out, "Completed:     {}", stats.completed);
    let _ = writeln!(out, "In progress:   {}", stats.in_progress);
    let _ = writeln!(out, "High priority: {}", stats.high_priority);

    out.push_str("\nBy status\n");
    for (status, count) in &stats.by_status {
        let _ = writeln!(
            out,
            "  {:<12} {:>4} {}",
            status.as_str(),
            count,
            bar(*count, stats.total)
        );
    }

    out.push_str("\nBy priority\n");
    for (priority, count) in &stats.by_priority {
        let _ = writeln!(
            out,
            "  {:<12} {:>4} {}",
            priority.as_str(),
            count,
            bar(*count, stats.total)
        );
    }

    out.push_str("\nBy work type\n");
    for (work_type, count) in &stats.by_work_type {
        let _ = writeln!(out, "  {:<12} {:>4}", truncate(work_type, 12), count);
    }

    if !stats.timeline.is_empty() {
        out.push_str("\nTimeline (TODO / In Progress / Completed / On Hold / Removed)\n");
        for point in &stats.timeline {
            let counts: Vec<String> = point.counts.iter().map(|c| c.to_string()).collect();
            let _ = writeln!(out, "  {}  {}", point.date, counts.join(" / "));
        }
    }
    out
}

pub fn detail(item: &WorkItem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:          {}", item.id);
    let _ = writeln!(out, "Type:        {}", item.work_type);
    let _ = writeln!(out, "Description: {}", item.work_desc);
    let _ = writeln!(out, "Status:      {}", item.status);
    let _ = writeln!(out, "Priority:    {}", item.priority);
    let _ = writeln!(out, "Start:       {}", date(item.start_date));
    let _ = writeln!(out, "End:         {}", date(item.end_date));
    if !item.tags.is_empty() {
        let _ = writeln!(out, "Tags:        {}", item.tags.join(", "));
    }
    for link in item.work_link.iter().filter(|l| !l.trim().is_empty()) {
        let _ = writeln!(out, "Link:        {link}");
    }
    for file in &item.work_files {
        let _ = writeln!(out, "File:        {} ({})", file.file_name, file.file_url);
    }
    out
}

pub fn projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found\n".to_string();
    }

    let mut out = String::new();
    for project in projects {
        let _ = writeln!(out, "{:<26} {}", project.id, project.project_name);
        if !project.project_desc.is_empty() {
            let _ = writeln!(out, "{:<26} {}", "", project.project_desc);
        }
    }
    out
}
