pub mod args;
pub mod config;
pub mod render;
pub mod summarize;

pub use args::{Cli, CliCommand};
pub use config::handle_config_command;
pub use render::handle_render_command;
pub use summarize::handle_summarize_command;
