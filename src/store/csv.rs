//! CSV file table store: one file per table under the data directory.

use crate::core::records::{
    CapitalRecord, Position, Rule, TradeRecord, default_capital, default_positions, default_rules,
    default_trades,
};
use crate::store::TableStore;
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub struct CsvStore {
    base_path: PathBuf,
}

impl CsvStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn table_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{name}.csv"))
    }

    fn load_or_seed<T>(&self, name: &str, defaults: impl FnOnce() -> Vec<T>) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let path = self.table_path(name);
        if !path.exists() {
            debug!("Table {} missing, seeding defaults", name);
            let rows = defaults();
            self.write_rows(name, &rows)?;
            return Ok(rows);
        }

        let mut reader = csv::Reader::from_path(&path)
            .with_context(|| format!("Failed to open table {}", path.display()))?;
        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: T =
                result.with_context(|| format!("Invalid row in table {}", path.display()))?;
            rows.push(row);
        }
        Ok(rows)
    }

    fn write_rows<T: Serialize>(&self, name: &str, rows: &[T]) -> Result<()> {
        fs::create_dir_all(&self.base_path).with_context(|| {
            format!("Failed to create data directory {}", self.base_path.display())
        })?;
        let path = self.table_path(name);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to write table {}", path.display()))?;
        for row in rows {
            writer
                .serialize(row)
                .with_context(|| format!("Failed to write row to {}", path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to flush table {}", path.display()))?;
        Ok(())
    }
}

impl TableStore for CsvStore {
    fn load_rules(&self) -> Result<Vec<Rule>> {
        self.load_or_seed("rules", default_rules)
    }

    fn save_rules(&self, rows: &[Rule]) -> Result<()> {
        self.write_rows("rules", rows)
    }

    fn load_positions(&self) -> Result<Vec<Position>> {
        self.load_or_seed("positions", default_positions)
    }

    fn save_positions(&self, rows: &[Position]) -> Result<()> {
        self.write_rows("positions", rows)
    }

    fn load_trades(&self) -> Result<Vec<TradeRecord>> {
        self.load_or_seed("trades", default_trades)
    }

    fn save_trades(&self, rows: &[TradeRecord]) -> Result<()> {
        self.write_rows("trades", rows)
    }

    fn load_capital(&self) -> Result<Vec<CapitalRecord>> {
        self.load_or_seed("capital", default_capital)
    }

    fn save_capital(&self, rows: &[CapitalRecord]) -> Result<()> {
        self.write_rows("capital", rows)
    }
}
