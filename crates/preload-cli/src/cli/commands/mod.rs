//! CLI command handlers. Each command is in its own file.

mod save;
mod show;

pub use save::{run_save, SaveOptions};
pub use show::run_show;
