//! Example: Delete a file or folder
//!
//! Usage:
//!   cargo run --example rm -- [--url URL] [--config FILE] <PATH>

mod cli;

use std::process;

use cli::{find_entry, init_tracing, parse_connection, report, usage_and_exit};
use webdrive::error::Result;
use webdrive::DialogKind;

const USAGE: &str =
    "Usage: cargo run --example rm -- [--url URL] [--config FILE] [--proxy PROXY] <PATH>";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE)?;
    if conn.positionals.len() != 1 {
        usage_and_exit(USAGE);
    }
    let path = &conn.positionals[0];

    let drive = conn.connect().await?;
    let entry = find_entry(&drive, path).await?;

    println!("Deleting {}...", path);
    drive.open_dialog(DialogKind::Delete, Some(&entry.id)).await?;
    drive.submit_dialog("").await?;
    drive.when_idle().await?;

    let failed = report(&drive).await?;
    drive.shutdown().await;
    if failed {
        process::exit(1);
    }
    Ok(())
}
