use anyhow::Result;
use clap::Parser;
use minutes::{
    app,
    cli::{handle_config_command, handle_render_command, handle_summarize_command, Cli, CliCommand},
    config::Config,
};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries rendered output, keep logs on stderr
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("Minutes {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(CliCommand::Render(args)) => handle_render_command(args),
        Some(CliCommand::Summarize(args)) => {
            let config = load_config(cli.config.as_deref())?;
            handle_summarize_command(args, &config).await
        }
        Some(CliCommand::Config(args)) => {
            let config = load_config(cli.config.as_deref())?;
            handle_config_command(args, &config)
        }
        Some(CliCommand::Serve) | None => {
            let config = load_config(cli.config.as_deref())?;
            app::run_service(config).await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
