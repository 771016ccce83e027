pub mod api;
mod board;
pub mod domain;
mod error;
pub mod routing;
pub mod session;
mod store;
pub mod view;

pub use board::WorkBoard;
pub use domain::*;
pub use error::WorkError;
pub use store::{LoadState, WorkStore};
