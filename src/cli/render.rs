//! CLI handler for rendering markdown summaries.

use anyhow::{Context, Result};

use crate::cli::args::RenderCliArgs;
use crate::render;

pub fn handle_render_command(args: RenderCliArgs) -> Result<()> {
    let markdown = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    println!("{}", render::render(&markdown));
    Ok(())
}
