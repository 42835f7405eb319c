use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minutes")]
#[command(about = "Summarize meeting transcripts and email the result", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Use this config file instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Run the HTTP API (default when no subcommand is given)
    Serve,
    /// Summarize a transcript file and optionally email the result
    Summarize(SummarizeCliArgs),
    /// Render a markdown file to display markup
    Render(RenderCliArgs),
    /// Inspect configuration
    Config(ConfigCliArgs),
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct SummarizeCliArgs {
    /// Transcript file (plain text)
    pub file: PathBuf,
    /// Override the instruction prompt
    #[arg(short, long)]
    pub prompt: Option<String>,
    /// Declared content type (default: guessed from the file extension)
    #[arg(long)]
    pub mime: Option<String>,
    /// Email the summary to this address after generation
    #[arg(long)]
    pub send_to: Option<String>,
    /// Print the raw markdown summary instead of rendered markup
    #[arg(long)]
    pub raw: bool,
}

#[derive(ClapArgs, Debug)]
pub struct RenderCliArgs {
    /// Markdown file to render
    pub file: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct ConfigCliArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
    /// Print the default config file path
    Path,
}
