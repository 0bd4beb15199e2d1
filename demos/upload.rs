//! Example: Upload local files into a remote directory
//!
//! Usage:
//!   cargo run --example upload -- [--url URL] [--config FILE] <REMOTE_DIR> <LOCAL_FILE>...

mod cli;

use std::process;

use cli::{init_tracing, parse_connection, report, usage_and_exit};
use indicatif::{ProgressBar, ProgressStyle};
use webdrive::error::Result;
use webdrive::{DriveEvent, LocalFile};

const USAGE: &str = "Usage: cargo run --example upload -- [--url URL] [--config FILE] [--proxy PROXY] <REMOTE_DIR> <LOCAL_FILE>...";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE)?;
    if conn.positionals.len() < 2 {
        usage_and_exit(USAGE);
    }
    let remote_dir = &conn.positionals[0];
    let files: Vec<LocalFile> = conn.positionals[1..]
        .iter()
        .map(LocalFile::from_path)
        .collect();

    let drive = conn.connect().await?;
    drive.go_to(remote_dir).await?;
    drive.when_idle().await?;

    let progress_bar = ProgressBar::new(100);
    progress_bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let mut events = drive.subscribe();
    println!("Uploading {} file(s) to {}...", files.len(), remote_dir);
    drive.upload(files).await?;

    loop {
        match events.recv().await {
            Ok(DriveEvent::UploadProgress(progress)) => {
                progress_bar.set_position(u64::from(progress.display_percent()));
                if progress.is_complete() {
                    progress_bar.set_message("refreshing listing...");
                } else {
                    progress_bar.set_message(format!(
                        "{} ({}/{})",
                        progress.filename, progress.completed, progress.total
                    ));
                }
            }
            Ok(DriveEvent::UploadFinished { succeeded, failed }) => {
                progress_bar.finish_with_message(format!("{succeeded} uploaded, {failed} failed"));
                break;
            }
            Ok(_) => {}
            Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {}
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }

    drive.when_idle().await?;
    let failed = report(&drive).await?;
    drive.shutdown().await;
    if failed {
        process::exit(1);
    }
    Ok(())
}
