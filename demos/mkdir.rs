//! Example: Create a folder
//!
//! Usage:
//!   cargo run --example mkdir -- [--url URL] [--config FILE] <PARENT_DIR> <NAME>

mod cli;

use std::process;

use cli::{init_tracing, parse_connection, report, usage_and_exit};
use webdrive::error::Result;
use webdrive::DialogKind;

const USAGE: &str =
    "Usage: cargo run --example mkdir -- [--url URL] [--config FILE] [--proxy PROXY] <PARENT_DIR> <NAME>";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE)?;
    if conn.positionals.len() != 2 {
        usage_and_exit(USAGE);
    }
    let parent = &conn.positionals[0];
    let name = &conn.positionals[1];

    let drive = conn.connect().await?;
    drive.go_to(parent).await?;
    drive.when_idle().await?;

    println!("Creating {} in {}...", name, parent);
    drive.open_dialog(DialogKind::Mkdir, None).await?;
    drive.submit_dialog(name).await?;
    drive.when_idle().await?;

    let failed = report(&drive).await?;
    drive.shutdown().await;
    if failed {
        process::exit(1);
    }
    Ok(())
}
