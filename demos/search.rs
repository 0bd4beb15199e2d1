//! Example: Search by keyword
//!
//! Usage:
//!   cargo run --example search -- [--url URL] [--config FILE] <KEYWORD> [SCOPE_DIR]

mod cli;

use cli::{init_tracing, parse_connection, report, usage_and_exit};
use webdrive::error::Result;

const USAGE: &str = "Usage: cargo run --example search -- [--url URL] [--config FILE] [--proxy PROXY] <KEYWORD> [SCOPE_DIR]";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE)?;
    let (keyword, scope) = match conn.positionals.as_slice() {
        [keyword] => (keyword.clone(), "/".to_string()),
        [keyword, scope] => (keyword.clone(), scope.clone()),
        _ => usage_and_exit(USAGE),
    };

    let drive = conn.connect().await?;
    drive.go_to(&scope).await?;
    drive.when_idle().await?;
    drive.search(&keyword).await?;
    drive.when_idle().await?;

    let snapshot = drive.snapshot().await?;
    match snapshot.search_results {
        Some(results) if results.is_empty() => println!("No matches for \"{}\"", keyword),
        Some(results) => {
            for entry in results {
                let icon = if entry.is_dir { "📁" } else { "📄" };
                println!("  {} {:<50} {}", icon, entry.path, entry.mod_time);
            }
        }
        None => {}
    }

    report(&drive).await?;
    drive.shutdown().await;
    Ok(())
}
