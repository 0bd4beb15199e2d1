//! Example: Move a file or folder into another directory
//!
//! Usage:
//!   cargo run --example mv -- [--url URL] [--config FILE] <SOURCE_PATH> <TARGET_DIR>

mod cli;

use std::process;

use cli::{find_entry, init_tracing, parse_connection, report, usage_and_exit};
use webdrive::error::Result;
use webdrive::DialogKind;

const USAGE: &str = "Usage: cargo run --example mv -- [--url URL] [--config FILE] [--proxy PROXY] <SOURCE_PATH> <TARGET_DIR>";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE)?;
    if conn.positionals.len() != 2 {
        usage_and_exit(USAGE);
    }
    let source = &conn.positionals[0];
    let target = &conn.positionals[1];

    let drive = conn.connect().await?;
    let entry = find_entry(&drive, source).await?;

    println!("Moving {} to {}...", source, target);
    drive.open_dialog(DialogKind::Move, Some(&entry.id)).await?;
    drive.submit_dialog(target).await?;
    drive.when_idle().await?;

    let failed = report(&drive).await?;
    drive.shutdown().await;
    if failed {
        process::exit(1);
    }
    Ok(())
}
