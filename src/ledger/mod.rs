use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::TradeRecord;
use crate::Result;

const CSV_HEADER: &str =
    "fecha,accion,precio,balance_usdt,balance_btc,balance_total,profit_loss_%,profit_total_%";

/// Append-only CSV ledger of executed simulated trades.
///
/// The header is written when the file is first created. One row per
/// executed trade; holds and no-op signals never touch the file.
#[derive(Debug, Clone)]
pub struct TradeLedger {
    path: PathBuf,
}

impl TradeLedger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &TradeRecord) -> Result<()> {
        let write_header = !self.path.exists();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if write_header {
            writeln!(file, "{}", CSV_HEADER)?;
        }

        writeln!(file, "{}", Self::format_row(record))?;

        tracing::debug!(
            "Recorded {} @ ${:.2} in {}",
            record.action,
            record.price,
            self.path.display()
        );

        Ok(())
    }

    fn format_row(record: &TradeRecord) -> String {
        format!(
            "{},{},{},{:.2},{:.6},{:.2},{:.2},{:.2}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.action,
            record.price,
            record.cash_balance,
            record.asset_balance,
            record.total_value,
            record.profit_loss_pct,
            record.cumulative_profit_pct,
        )
    }
}
