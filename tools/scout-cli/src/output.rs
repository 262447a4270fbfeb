//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use scout_commerce::catalog::{Offer, Product};

/// Features shown per product in listings.
pub const FEATURE_PREVIEW_LIMIT: usize = 3;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a numbered product card.
    pub fn product(&self, index: usize, product: &Product) {
        if self.json {
            return;
        }
        for line in product_card(index, product) {
            println!("{}", line);
        }
    }

    /// Print one merchant offer.
    pub fn offer(&self, offer: &Offer) {
        if self.json {
            return;
        }
        println!(
            "  {} {}  {}",
            style(format!("{:>12}", offer.price_label())).green(),
            style(&offer.merchant).bold(),
            style(&offer.link).dim()
        );
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Lines of a product card: title with price badge, category, feature preview.
pub fn product_card(index: usize, product: &Product) -> Vec<String> {
    let title = if product.title.trim().is_empty() {
        "(untitled)"
    } else {
        product.title.as_str()
    };

    let mut heading = format!(
        "{} {}",
        style(format!("{:>3}.", index)).dim(),
        style(title).bold()
    );
    if let Some(price) = product.display_price() {
        heading.push_str(&format!("  {}", style(price).green()));
    }
    if let Some(count) = product.offer_count() {
        heading.push_str(&format!(" {}", style(format!("({})", count)).dim()));
    }

    let mut lines = vec![heading];
    if let Some(category) = product.category() {
        lines.push(format!("     {}", style(category).cyan()));
    }

    let preview = product.feature_preview(FEATURE_PREVIEW_LIMIT);
    for feature in preview.shown {
        lines.push(format!("     {} {}", style("•").dim(), feature));
    }
    if let Some(more) = preview.more_label() {
        lines.push(format!("     {}", style(more).dim()));
    }
    lines.push(format!("     {}", style(format!("id: {}", product.id)).dim()));
    lines
}

/// Status badge for parser states.
pub fn status_badge(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "running" | "parser started" => style(status).green().to_string(),
        "stopping" | "parser stopping" => style(status).yellow().to_string(),
        "idle" => style(status).dim().to_string(),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|l| console::strip_ansi_codes(&l).to_string())
            .collect()
    }

    #[test]
    fn test_card_with_price_and_more_features() {
        let product = Product::new("p1", "iPhone 15 Pro Max")
            .with_category("phones")
            .with_features(["A17", "Titanium", "USB-C", "5x zoom"])
            .with_price_eur(999.0);

        let lines = plain(product_card(1, &product));
        assert_eq!(lines[0], "  1. iPhone 15 Pro Max  €999.00");
        assert_eq!(lines[1], "     phones");
        assert_eq!(lines[4], "     • USB-C");
        assert_eq!(lines[5], "     +1 more");
        assert_eq!(lines[6], "     id: p1");
    }

    #[test]
    fn test_card_hides_zero_price() {
        let product = Product::new("p2", "Freebie").with_price_eur(0.0);
        let lines = plain(product_card(2, &product));
        assert_eq!(lines[0], "  2. Freebie");
        assert_eq!(lines.len(), 2);
    }
}
