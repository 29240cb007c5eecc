mod books;
mod tui;

use anyhow::Result;
use books::{sample_data, CreditLedger, SalesLedger, Storage, CREDITS_KEY, SALES_KEY};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

fn data_dir() -> PathBuf {
    std::env::var("KHATA_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./khata-data"))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;

    // The TUI owns the terminal, so logs go to a file in the data dir.
    let log_file = File::create(dir.join("khata.log"))?;
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .init();

    let storage = Storage::new(&dir);
    let mut sales = SalesLedger::from_records(storage.load_or_default(SALES_KEY));
    let mut credits = CreditLedger::from_records(storage.load_or_default(CREDITS_KEY));
    tracing::info!(
        "loaded {} sales and {} udhar entries from {}",
        sales.len(),
        credits.len(),
        dir.display()
    );

    if std::env::args().any(|a| a == "--demo") && sales.is_empty() && credits.is_empty() {
        sales = SalesLedger::from_records(sample_data::sample_sales());
        credits = CreditLedger::from_records(sample_data::sample_credits());
        storage.save(SALES_KEY, sales.records())?;
        storage.save(CREDITS_KEY, credits.records())?;
        tracing::info!("seeded demo books");
    }

    let app = tui::app::App::new(sales, credits, storage);
    tui::run_tui(app).map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
