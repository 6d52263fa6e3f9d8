//! Session extraction and module permission checks.

mod middleware;

pub use middleware::{require_module, CurrentUser};
