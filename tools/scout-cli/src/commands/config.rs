//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ScoutConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let api = &ctx.config.api;
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &api.base_url);
    if let Some(timeout) = api.timeout_secs {
        ctx.output.kv("timeout_secs", &timeout.to_string());
    }
    for (key, value) in &api.headers {
        ctx.output.kv(&format!("headers.{}", key), value);
    }

    ctx.output.info("[locale]");
    ctx.output.kv("strategy", ctx.config.locale.strategy.as_str());
    match &ctx.config.locale.tag {
        Some(tag) => ctx.output.kv("tag", tag),
        None => ctx.output.kv("tag", &format!("{} (from environment)", ctx.ambient_locale())),
    }

    if !ctx.config.environments.is_empty() {
        ctx.output.info("Environments:");
        for env in ctx.config.environments.keys() {
            ctx.output.list_item(env);
        }
    }

    Ok(())
}

/// Write a default config. JSON mode writes `scout.json` without comments.
fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let name = if ctx.output.is_json() { "scout.json" } else { "scout.toml" };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if ctx.output.is_json() {
        ScoutConfig::default().save(&config_path)?;
        ctx.output.json(&serde_json::json!({ "created": config_path }));
    } else {
        fs::write(&config_path, generate_default_config())?;
        ctx.output.success(&format!("Created: {}", config_path.display()));
    }

    Ok(())
}
