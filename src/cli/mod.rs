pub mod commands;
pub mod handlers;

pub use commands::{CliArgs, Mode};
pub use handlers::{handle_cook, handle_prepare, run};
