use anyhow::Result;
use std::path::Path;
use std::process::Command;

use crate::config::Config;

pub async fn show_config(path: &Path) -> Result<()> {
    let mut config = Config::load_from(path)?;
    if config.is_authenticated() {
        config.set_token("<hidden>".to_string());
    }
    let config_str = toml::to_string_pretty(&config)?;

    println!("Current Configuration ({})", path.display());
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    Ok(())
}

pub async fn edit_config(path: &Path) -> Result<()> {
    // Ensure config file exists
    if !path.exists() {
        Config::load_from(path)?.save()?;
    }

    // Open in default editor
    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

    Command::new(editor).arg(path).status()?;

    println!("✓ Configuration saved!");

    Ok(())
}

pub async fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Configuration file already exists at: {}", path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    Config::default_at(path).save()?;

    println!("✓ Configuration initialized at: {}", path.display());
    println!();
    println!("You can edit it with: fittrack config edit");

    Ok(())
}
