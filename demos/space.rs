//! Example: Show storage usage
//!
//! Usage:
//!   cargo run --example space -- [--url URL] [--config FILE]

mod cli;

use cli::{init_tracing, parse_connection, usage_and_exit};
use webdrive::error::Result;
use webdrive::fs::format_size;

const USAGE: &str =
    "Usage: cargo run --example space -- [--url URL] [--config FILE] [--proxy PROXY]";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE)?;
    if !conn.positionals.is_empty() {
        usage_and_exit(USAGE);
    }

    let drive = conn.connect().await?;
    match drive.snapshot().await?.space {
        Some(space) => {
            println!("Total: {}", format_size(space.total));
            println!("Used:  {} ({:.1}%)", format_size(space.used), space.usage_percent());
            println!("Free:  {}", format_size(space.free));
        }
        None => eprintln!("Storage space unavailable"),
    }

    drive.shutdown().await;
    Ok(())
}
