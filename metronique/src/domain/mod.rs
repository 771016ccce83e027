mod ids;
mod new_work;
mod project;
mod work_item;

pub use ids::*;
pub use new_work::*;
pub use project::*;
pub use work_item::*;
