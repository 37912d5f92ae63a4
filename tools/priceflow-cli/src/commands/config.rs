//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let api = ctx.client.config();
    let state_path = ctx.config.state_path();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "file": ctx.config_path,
            "api": {
                "base_url": api.base_url(),
                "timeout_secs": api.timeout.map(|t| t.as_secs()),
            },
            "storage": { "path": state_path },
            "authenticated": ctx.session().is_authenticated(),
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("[api]");
    ctx.output.kv("base_url", api.base_url());
    ctx.output.kv(
        "timeout_secs",
        &api.timeout
            .map(|t| t.as_secs().to_string())
            .unwrap_or_else(|| "unset".to_string()),
    );

    ctx.output.info("[storage]");
    ctx.output.kv("path", &state_path.display().to_string());
    ctx.output.kv(
        "session",
        if ctx.session().is_authenticated() {
            "signed in"
        } else {
            "signed out"
        },
    );

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("priceflow.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
