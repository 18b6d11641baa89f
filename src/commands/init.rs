use anyhow::Result;
use std::path::Path;

use crate::config::Config;

pub fn run(path: &Path, store_url: &str) -> Result<()> {
    let config = Config {
        store_url: store_url.trim_end_matches('/').to_string(),
    };

    let written = config.write(path)?;
    println!("Created {}", written.display());
    println!("\nNext steps:");
    println!("  workboard team add \"Ada Lovelace\" ada@example.com   # Add a team member");
    println!("  workboard project add \"Launch\" --owner <member-id>  # Create a project");

    Ok(())
}
