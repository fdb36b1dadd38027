//! Terminal entry point for the fruit shop till.

use std::io;

use anyhow::Context;

use fruitshop_cli::Shell;
use fruitshop_infra::{Checkout, FileInvoiceLog, ShopConfig};

fn main() -> anyhow::Result<()> {
    fruitshop_observability::init();

    let config = ShopConfig::from_env().context("failed to load shop configuration")?;
    tracing::info!(
        sales_log = %config.sales_log_path.display(),
        items = config.catalog.len(),
        unknown_items = ?config.unknown_item_policy,
        "starting fruit shop"
    );

    let checkout = Checkout::new(
        config.build_session(),
        FileInvoiceLog::new(&config.sales_log_path),
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(checkout, config.sales_log_path.display().to_string())
        .run(stdin.lock(), stdout.lock())
        .context("terminal session failed")?;

    Ok(())
}
