//! Initialize .prkey.toml configuration

use anyhow::Result;
use prkey_core::config::CONFIG_FILE;
use prkey_core::PrkeyConfig;
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILE);

    if config_path.exists() {
        println!("⚠️  {} already exists at {:?}", CONFIG_FILE, config_path);
        return Ok(());
    }

    let config = PrkeyConfig::default();
    config.save(&config_path)?;

    println!("✅ Created {} at {:?}", CONFIG_FILE, config_path);
    println!("\nAdd your build modules under [[modules]] and run:");
    println!("  prkey map");

    Ok(())
}
