//! Example: List a directory
//!
//! Usage:
//!   cargo run --example ls -- [--url URL] [--config FILE] [--sort name|size|modTime] [PATH]

mod cli;

use cli::{init_tracing, parse_connection, report, usage_and_exit};
use webdrive::error::Result;
use webdrive::SortKey;

const USAGE: &str = "Usage: cargo run --example ls -- [--url URL] [--config FILE] [--proxy PROXY] [--sort name|size|modTime] [PATH]";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let mut conn = parse_connection(USAGE)?;
    let sort = match conn.positionals.iter().position(|a| a == "--sort") {
        Some(i) if i + 1 < conn.positionals.len() => {
            let key = conn.positionals.remove(i + 1);
            conn.positionals.remove(i);
            match key.as_str() {
                "name" => SortKey::Name,
                "size" => SortKey::Size,
                "modTime" => SortKey::ModTime,
                _ => usage_and_exit(USAGE),
            }
        }
        Some(_) => usage_and_exit(USAGE),
        None => SortKey::Name,
    };
    if conn.positionals.len() > 1 {
        usage_and_exit(USAGE);
    }
    let path = conn.positionals.first().cloned().unwrap_or_else(|| "/".to_string());

    let drive = conn.connect().await?;
    drive.go_to(&path).await?;
    drive.sort(sort).await?;
    drive.when_idle().await?;

    let snapshot = drive.snapshot().await?;
    if let Some(space) = snapshot.space {
        println!(
            "\n📊 Storage: {} ({:.1}% used)",
            space.label(),
            space.usage_percent()
        );
    }

    let trail: Vec<_> = snapshot.breadcrumb.iter().map(|c| c.label.as_str()).collect();
    println!("\n📁 {}\n", trail.join(" / "));
    if snapshot.view.entries.is_empty() {
        println!("  (empty)");
    }
    for entry in &snapshot.view.entries {
        let icon = if entry.is_dir {
            "📁"
        } else {
            match entry.extension().as_deref() {
                Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "svg") => "🖼",
                Some("mp3" | "wav" | "flac" | "ogg") => "🎵",
                Some("mp4" | "mkv" | "mov" | "avi") => "🎬",
                Some("zip" | "tar" | "gz" | "7z" | "rar") => "📦",
                _ => "📄",
            }
        };
        println!(
            "  {} {:<40} {:>10}  {}",
            icon,
            entry.name,
            entry.size_label(),
            entry.mod_time
        );
    }

    report(&drive).await?;
    drive.shutdown().await;
    Ok(())
}
