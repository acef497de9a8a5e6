// CLI module - command-line argument parsing and handlers
//
// Top-level flags override the config file and environment. Subcommands:
// - config --show: Display effective configuration as TOML
// - config --path: Show the config file path

use crate::config::{Config, ConfigOverrides, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docscout - browse a local document collection and embed it
#[derive(Parser, Debug)]
#[command(name = "docscout")]
#[command(version = VERSION)]
#[command(about = "Terminal browser for a local document collection", long_about = None)]
pub struct Cli {
    /// Directory to browse and embed
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Embedding endpoint URL
    #[arg(long, value_name = "URL")]
    pub embed_url: Option<String>,

    /// Markdown file shown in the content panel
    #[arg(long, value_name = "FILE")]
    pub content: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip the startup embedding batch
    #[arg(long)]
    pub no_embed: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    /// Flag values to layer over the loaded configuration
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            data_dir: self.data_dir.clone(),
            embed_url: self.embed_url.clone(),
            content_path: self.content.clone(),
            no_embed: self.no_embed,
        }
    }
}

/// Handle subcommands. Returns Ok(true) if one ran (exit after).
pub fn handle_command(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Some(Commands::Config { show, path }) => {
            if *path {
                handle_config_path(cli)?;
            } else if *show {
                handle_config_show(cli)?;
            } else {
                println!("Usage: docscout config [--show|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        None => Ok(false),
    }
}

fn handle_config_path(cli: &Cli) -> Result<()> {
    let path = cli
        .config
        .clone()
        .or_else(Config::config_path)
        .context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.overrides())?;

    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    match cli.config.clone().or_else(Config::config_path) {
        Some(path) if path.exists() => println!("# Source: {}", path.display()),
        _ => println!("# Source: defaults (no config file)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_become_overrides() {
        let cli = Cli::parse_from([
            "docscout",
            "--data-dir",
            "/srv/rfcs",
            "--embed-url",
            "http://127.0.0.1:9000/embed",
            "--no-embed",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.data_dir, Some(PathBuf::from("/srv/rfcs")));
        assert_eq!(
            overrides.embed_url.as_deref(),
            Some("http://127.0.0.1:9000/embed")
        );
        assert!(overrides.no_embed);
        assert!(overrides.content_path.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::parse_from(["docscout", "config", "--path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                path: true,
                show: false
            })
        ));
    }
}
