//! CLI handler for one-shot summarization.
//!
//! Drives a single workflow session: load file → generate → (send).
//! Notifications go to stderr, the summary to stdout.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tokio::sync::broadcast;

use crate::app::build_controller;
use crate::cli::args::SummarizeCliArgs;
use crate::config::Config;
use crate::workflow::{Notification, NotificationKind};

/// Guess a declared content type from a file extension.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "text" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

pub async fn handle_summarize_command(args: SummarizeCliArgs, config: &Config) -> Result<()> {
    if !args.file.exists() {
        bail!("File not found: {}", args.file.display());
    }

    let controller = build_controller(config)?;
    let printer = spawn_notification_printer(controller.subscribe());

    if let Some(prompt) = args.prompt {
        controller.set_instruction_prompt(prompt);
    }

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let contents = String::from_utf8_lossy(&bytes).into_owned();
    let mime = args
        .mime
        .unwrap_or_else(|| mime_type_for_path(&args.file).to_string());

    let loaded = controller.load_transcript(contents, &mime);
    ensure_ok(&loaded)?;

    if let Some(generated) = controller.generate_summary().await {
        ensure_ok(&generated)?;
    }

    let session = controller.snapshot();
    if args.raw {
        println!("{}", session.summary);
    } else {
        println!("{}", crate::render::render(&session.summary));
    }

    if let Some(recipient) = args.send_to {
        controller.set_recipient_email(recipient);
        if let Some(sent) = controller.send_summary().await {
            ensure_ok(&sent)?;
        }
    }

    drop(controller);
    let _ = printer.await;

    Ok(())
}

fn ensure_ok(notification: &Notification) -> Result<()> {
    if notification.is_destructive() {
        bail!("{}: {}", notification.title, notification.description);
    }
    Ok(())
}

fn spawn_notification_printer(
    mut rx: broadcast::Receiver<Notification>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Ok(notification) = rx.recv().await {
            // Destructive ones are reported through the returned error.
            if notification.is_destructive() {
                continue;
            }
            match notification.kind {
                NotificationKind::EmailSimulated => {
                    eprintln!("{} (not delivered): {}", notification.title, notification.description)
                }
                _ => eprintln!("{} {}", notification.title, notification.description),
            }
        }
    })
}
