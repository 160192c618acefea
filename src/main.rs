//! keyforward - voice-command key specs to dotool
//!
//! Translates key specs and optionally sends them to the dotool client.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keyforward::config::{config_path, Config};
use keyforward::translator::warn_unknown_key;
use keyforward::{DotoolSender, ForwardOutcome, KeyForwarder, Translator};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the dotool actions for each spec (reads stdin if none given)
    Translate { specs: Vec<String> },

    /// Translate specs and send them to the dotool client
    Send { specs: Vec<String> },

    /// Show sample translations
    Debug { samples: Vec<String> },

    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    // Setup logging; stdout is reserved for action lines
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Cmd::Translate { specs } => translate(&config, specs),
        Cmd::Send { specs } => send(&config, specs),
        Cmd::Debug { samples } => {
            let translator = Translator::from_config(&config);
            let samples = if samples.is_empty() {
                config.debug_samples.clone()
            } else {
                samples
            };
            let sample_refs: Vec<&str> = samples.iter().map(String::as_str).collect();
            let lines = if sample_refs.is_empty() {
                translator.debug_translate(None)
            } else {
                translator.debug_translate(Some(sample_refs.as_slice()))
            };
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
        Cmd::Init { force } => init(args.config, force),
    }
}

/// Specs from the command line, or one per stdin line
fn collect_specs(specs: Vec<String>) -> Result<Vec<String>> {
    if !specs.is_empty() {
        return Ok(specs);
    }
    std::io::stdin()
        .lock()
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .context("Failed to read specs from stdin")
}

fn translate(config: &Config, specs: Vec<String>) -> Result<()> {
    let translator = Translator::from_config(config);
    let on_unknown: Option<&dyn Fn(&str)> = if config.log_unknown_keys {
        Some(&warn_unknown_key)
    } else {
        None
    };

    for spec in collect_specs(specs)? {
        for action in translator.translate(&spec, on_unknown) {
            println!("{}", action);
        }
    }
    Ok(())
}

fn send(config: &Config, specs: Vec<String>) -> Result<()> {
    let sender = DotoolSender::from_config(config);
    let mut forwarder = KeyForwarder::from_config(config, sender);

    for spec in collect_specs(specs)? {
        match forwarder.forward(&spec)? {
            ForwardOutcome::Sent(count) => info!("✅ {:?}: sent {} action(s)", spec, count),
            ForwardOutcome::Empty => info!("💡 {:?}: nothing to send", spec),
            ForwardOutcome::PassThrough => {
                warn!("⚠️ Key forwarding is disabled in config, skipping {:?}", spec);
            }
        }
    }
    Ok(())
}

fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let target = path.clone().unwrap_or_else(config_path);
    if target.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", target.display());
    }

    let config = Config::default();
    match &path {
        Some(path) => config.save_to(path),
        None => config.save(),
    }
    .context("Failed to write config")?;

    info!("📝 Wrote default config to {}", target.display());
    println!("{}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_default_config_once() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("keyforward/config.json");

        init(Some(path.clone()), false).unwrap();
        let written = Config::load_from(&path).unwrap();
        assert_eq!(written.dotool_command, Config::default().dotool_command);

        assert!(init(Some(path.clone()), false).is_err());
        init(Some(path), true).unwrap();
    }
}
