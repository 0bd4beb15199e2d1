//! Example: Rename a file or folder
//!
//! Usage:
//!   cargo run --example rename -- [--url URL] [--config FILE] <PATH> <NEW_NAME>

mod cli;

use std::process;

use cli::{find_entry, init_tracing, parse_connection, report, usage_and_exit};
use webdrive::error::Result;
use webdrive::DialogKind;

const USAGE: &str =
    "Usage: cargo run --example rename -- [--url URL] [--config FILE] [--proxy PROXY] <PATH> <NEW_NAME>";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE)?;
    if conn.positionals.len() != 2 {
        usage_and_exit(USAGE);
    }
    let path = &conn.positionals[0];
    let new_name = &conn.positionals[1];

    let drive = conn.connect().await?;
    let entry = find_entry(&drive, path).await?;

    println!("Renaming {} to {}...", path, new_name);
    drive.open_dialog(DialogKind::Rename, Some(&entry.id)).await?;
    drive.submit_dialog(new_name).await?;
    drive.when_idle().await?;

    let failed = report(&drive).await?;
    drive.shutdown().await;
    if failed {
        process::exit(1);
    }
    Ok(())
}
