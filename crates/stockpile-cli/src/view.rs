//! Plain-text rendering of the inventory.

use std::io::Write;

use stockpile_core::utils::{format_price, truncate_string};
use stockpile_core::{InventoryView, Product, Severity, ViewChange};
use tracing::debug;

/// Maximum title width in list rows.
const TITLE_WIDTH: usize = 40;

/// Maximum category width in list rows.
const CATEGORY_WIDTH: usize = 16;

/// Writes inventory changes and notifications as they happen.
pub struct TerminalView<W: Write> {
    out: W,
    count: usize,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out, count: 0 }
    }

    /// Number of products last reported by the controller.
    pub fn count(&self) -> usize {
        self.count
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            debug!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> InventoryView for TerminalView<W> {
    fn on_change(&mut self, change: ViewChange<'_>) {
        match change {
            // Listing is printed on demand by the `list` command
            ViewChange::Reset(_) => {}
            ViewChange::Inserted(product) => self.line(&format!("+ {}", product_row(product))),
            ViewChange::Replaced(product) => self.line(&format!("~ {}", product_row(product))),
            ViewChange::Removed(id) => self.line(&format!("- {:>5}", id)),
            ViewChange::Count(count) => self.count = count,
            ViewChange::Notify(outcome) => {
                let tag = match outcome.severity {
                    Severity::Info => "info",
                    Severity::Error => "error",
                };
                self.line(&format!("[{}] {}", tag, outcome.message));
            }
            ViewChange::LoadFailed(message) => self.line(message),
        }
    }
}

/// One product as a fixed-width row.
pub fn product_row(product: &Product) -> String {
    format!(
        "{:>5}  {:<title$}  {:<category$}  {:>10}",
        product.id,
        truncate_string(&product.title, TITLE_WIDTH),
        truncate_string(&product.category, CATEGORY_WIDTH),
        format_price(product.price),
        title = TITLE_WIDTH,
        category = CATEGORY_WIDTH,
    )
}

/// The whole inventory as a table.
pub fn product_table(products: &[Product]) -> String {
    let mut out = format!(
        "{:>5}  {:<title$}  {:<category$}  {:>10}\n",
        "ID",
        "TITLE",
        "CATEGORY",
        "PRICE",
        title = TITLE_WIDTH,
        category = CATEGORY_WIDTH,
    );
    for product in products {
        out.push_str(&product_row(product));
        out.push('\n');
    }
    out
}

/// Every field of one product.
pub fn product_detail(product: &Product) -> String {
    format!(
        "ID:          {}\nTitle:       {}\nDescription: {}\nPrice:       {}\nCategory:    {}\nThumbnail:   {}\n",
        product.id,
        product.title,
        product.display_description(),
        product.display_price(),
        product.category,
        product.thumbnail,
    )
}
