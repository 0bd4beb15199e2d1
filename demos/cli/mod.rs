use std::env;
use std::process;

use tracing_subscriber::{fmt, EnvFilter};
use webdrive::error::{DriveError, Result};
use webdrive::fs::{parent_path, FileEntry};
use webdrive::notify::NotificationKind;
use webdrive::{DriveConfig, DriveHandle};

pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(1);
}

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("webdrive=debug"));
    fmt().with_env_filter(filter).with_target(false).init();
}

pub struct Connection {
    pub config: DriveConfig,
    pub positionals: Vec<String>,
}

/// Parse `[--config FILE] [--url URL] [--proxy PROXY]` plus positionals.
///
/// `--help` prints `usage` and exits; a flag without its value is a usage
/// error.
pub fn parse_connection(usage: &'static str) -> Result<Connection> {
    let mut config_path = None;
    let mut url = None;
    let mut proxy = None;
    let mut positionals = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "--help" | "-h" => {
                println!("{usage}");
                process::exit(0);
            }
            "--config" | "-c" => &mut config_path,
            "--url" | "-u" => &mut url,
            "--proxy" => &mut proxy,
            _ => {
                positionals.push(arg);
                continue;
            }
        };
        match args.next() {
            Some(value) => *slot = Some(value),
            None => usage_and_exit(usage),
        }
    }

    let mut config = match config_path {
        Some(path) => DriveConfig::load(path)?,
        None => DriveConfig::default(),
    };
    if let Some(url) = url {
        config.base_url = url;
    }
    if proxy.is_some() {
        config.proxy = proxy;
    }
    Ok(Connection {
        config,
        positionals,
    })
}

impl Connection {
    pub async fn connect(&self) -> Result<DriveHandle> {
        println!("Connecting to {}...", self.config.base_url);
        let drive = DriveHandle::connect(&self.config)?;
        drive.when_idle().await?;
        Ok(drive)
    }
}

/// Navigate to the parent of `path` and look the entry up by name.
#[allow(dead_code)]
pub async fn find_entry(drive: &DriveHandle, path: &str) -> Result<FileEntry> {
    let name = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    drive.go_to(&parent_path(path)).await?;
    drive.when_idle().await?;
    let snapshot = drive.snapshot().await?;
    snapshot
        .view
        .entries
        .into_iter()
        .find(|e| e.name == name)
        .ok_or_else(|| DriveError::Custom(format!("Not found: {}", path)))
}

/// Print live notifications; returns whether any of them is an error.
#[allow(dead_code)]
pub async fn report(drive: &DriveHandle) -> Result<bool> {
    let snapshot = drive.snapshot().await?;
    let mut failed = false;
    for note in &snapshot.notifications {
        match note.kind {
            NotificationKind::Error => {
                failed = true;
                eprintln!("❌ {}", note.message);
            }
            _ => println!("✅ {}", note.message),
        }
    }
    Ok(failed)
}
