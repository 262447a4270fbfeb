//! Operator commands.

use std::io::Read;

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use scout_commerce::admin::{ApiKeys, ParserJob};
use scout_commerce::catalog::Product;
use scout_commerce::ids::ProductId;

use super::{AdminArgs, AdminCommand, KeysCommand, ParserCommand, ProductsCommand};
use crate::context::Context;
use crate::output::status_badge;

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::Parser { command } => parser(command, ctx).await,
        AdminCommand::Keys { command } => keys(command, ctx).await,
        AdminCommand::Logs { service } => logs(&service, ctx).await,
        AdminCommand::Products { command } => products(command, ctx).await,
        AdminCommand::Stats => stats(ctx).await,
    }
}

async fn parser(command: ParserCommand, ctx: &Context) -> Result<()> {
    let admin = ctx.admin();
    let status = match command {
        ParserCommand::Status => admin.parser_status().await.context("Failed to get parser status")?,
        ParserCommand::Start { url, category } => {
            let job = ParserJob::new(url, category)?;
            admin.start_parser(&job).await.context("Failed to start parser")?
        }
        ParserCommand::Stop => admin.stop_parser().await.context("Failed to stop parser")?,
    };

    if ctx.output.is_json() {
        ctx.output.json(&status);
    } else {
        ctx.output.kv("parser", &status_badge(&status.status));
    }
    Ok(())
}

async fn keys(command: KeysCommand, ctx: &Context) -> Result<()> {
    let admin = ctx.admin();
    match command {
        KeysCommand::Show => {
            let keys = admin.api_keys().await.context("Failed to get API keys")?;
            if ctx.output.is_json() {
                ctx.output.json(&keys);
                return Ok(());
            }
            ctx.output.kv("gemini", or_unset(&keys.gemini_api_keys));
            ctx.output.kv("serpapi", or_unset(&keys.serpapi_api_keys));
        }
        KeysCommand::Set { gemini, serpapi, yes } => {
            if gemini.trim().is_empty() && serpapi.trim().is_empty() {
                bail!("Nothing to update: pass --gemini and/or --serpapi");
            }
            if !yes && !confirm("Replace the backend's API keys?")? {
                ctx.output.info("Cancelled");
                return Ok(());
            }

            let keys = ApiKeys {
                gemini_api_keys: gemini.trim().to_string(),
                serpapi_api_keys: serpapi.trim().to_string(),
            };
            let status = admin.update_api_keys(&keys).await.context("Failed to update API keys")?;
            ctx.output.success(&status.status);
        }
    }
    Ok(())
}

async fn logs(service: &str, ctx: &Context) -> Result<()> {
    let logs = ctx
        .admin()
        .logs(service)
        .await
        .with_context(|| format!("Failed to get logs for {}", service))?;
    print!("{}", logs);
    Ok(())
}

async fn products(command: ProductsCommand, ctx: &Context) -> Result<()> {
    let admin = ctx.admin();
    match command {
        ProductsCommand::List => {
            let products = admin.products().await.context("Failed to list products")?;
            if ctx.output.is_json() {
                ctx.output.json(&products);
                return Ok(());
            }
            if products.is_empty() {
                ctx.output.info("No products stored");
            }
            for (i, product) in products.iter().enumerate() {
                ctx.output.product(i + 1, product);
            }
        }
        ProductsCommand::Add { file } => {
            let product = read_product(&file)?;
            admin.add_product(&product).await.context("Failed to add product")?;
            ctx.output.success(&format!("Added {}", product.id));
        }
        ProductsCommand::Update { file } => {
            let product = read_product(&file)?;
            admin.update_product(&product).await.context("Failed to update product")?;
            ctx.output.success(&format!("Updated {}", product.id));
        }
        ProductsCommand::Delete { id, yes } => {
            let id = ProductId::parse(&id)?;
            if !yes && !confirm(&format!("Delete product {}?", id))? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            admin.delete_product(&id).await.context("Failed to delete product")?;
            ctx.output.success(&format!("Deleted {}", id));
        }
    }
    Ok(())
}

async fn stats(ctx: &Context) -> Result<()> {
    let stats = ctx.admin().statistics().await.context("Failed to get statistics")?;
    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }
    ctx.output.header("Search statistics");
    ctx.output.kv("total requests", &stats.total_requests.to_string());
    ctx.output.kv("unique queries", &stats.unique_queries.to_string());
    ctx.output.kv("most popular", &stats.most_popular_query);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Parse a product from a JSON file, or stdin for "-". The ID is required.
fn read_product(file: &str) -> Result<Product> {
    let content = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read product from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?
    };
    parse_product(&content)
}

fn parse_product(content: &str) -> Result<Product> {
    let product: Product = serde_json::from_str(content).context("Invalid product JSON")?;
    ProductId::parse(product.id.as_str())?;
    Ok(product)
}
