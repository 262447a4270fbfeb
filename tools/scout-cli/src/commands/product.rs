//! Product detail and offers.

use anyhow::{bail, Result};
use scout_commerce::ids::ProductId;
use scout_session::{HttpBackend, ProductView, ViewOutcome};

use super::{OffersArgs, ProductArgs};
use crate::context::Context;
use crate::output::Output;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::parse(&args.id)?;
    let view = ProductView::new(ctx.backend(), id);
    show(&view, args.offers, &ctx.output).await
}

/// Run the offers command.
pub async fn run_offers(args: OffersArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::parse(&args.id)?;
    let view = ProductView::new(ctx.backend(), id);

    let spinner = ctx.output.spinner("Loading offers...");
    let outcome = view.show_offers().await;
    spinner.finish_and_clear();

    if let ViewOutcome::Failed(reason) = outcome {
        bail!("Failed to load offers for {}: {}", view.id(), reason);
    }

    let state = view.state();
    if ctx.output.is_json() {
        ctx.output.json(&state.offers);
        return Ok(());
    }
    render_offers(&state.offers, &ctx.output);
    Ok(())
}

/// Load a product, optionally with offers, and print it.
pub async fn show(view: &ProductView<HttpBackend>, with_offers: bool, output: &Output) -> Result<()> {
    let spinner = output.spinner(&format!("Loading product {}...", view.id()));
    let outcome = view.load().await;
    spinner.finish_and_clear();

    if let ViewOutcome::Failed(reason) = outcome {
        bail!("Failed to load product {}: {}", view.id(), reason);
    }

    if with_offers {
        let spinner = output.spinner("Loading offers...");
        let outcome = view.show_offers().await;
        spinner.finish_and_clear();
        if let ViewOutcome::Failed(reason) = outcome {
            output.warn(&format!("Offers unavailable: {}", reason));
        }
    }

    let state = view.state();
    if output.is_json() {
        output.json(&state);
        return Ok(());
    }

    let Some(product) = &state.product else {
        bail!("Product {} not loaded", view.id());
    };

    output.header(&product.title);
    output.kv("id", product.id.as_str());
    if let Some(price) = product.display_price() {
        output.kv("price", &price);
    }
    if let Some(count) = product.offer_count() {
        output.kv("offers", count);
    }
    if let Some(category) = product.category() {
        output.kv("category", category);
    }
    if let Some(gtin) = &product.google_product_id {
        output.kv("google id", gtin.as_str());
    }
    if let Some(image) = product.image_url() {
        output.kv("image", image);
    }
    if !product.features().is_empty() {
        output.header("Features");
        for feature in product.features() {
            output.list_item(feature);
        }
    }

    if state.offers_requested {
        render_offers(&state.offers, output);
    }
    Ok(())
}

fn render_offers(offers: &[scout_commerce::catalog::Offer], output: &Output) {
    if offers.is_empty() {
        output.info("No offers found");
        return;
    }
    output.header(&format!("{} offers", offers.len()));
    for offer in offers {
        output.offer(offer);
    }
}
