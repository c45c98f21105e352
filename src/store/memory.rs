//! In-memory table store for tests and for sessions whose data directory
//! is unusable; starts from the same seed rows the CSV store writes.

use crate::core::records::{
    CapitalRecord, Position, Rule, TradeRecord, default_capital, default_positions, default_rules,
    default_trades,
};
use crate::store::TableStore;
use anyhow::Result;
use std::sync::RwLock;

struct Tables {
    rules: Vec<Rule>,
    positions: Vec<Position>,
    trades: Vec<TradeRecord>,
    capital: Vec<CapitalRecord>,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                rules: default_rules(),
                positions: default_positions(),
                trades: default_trades(),
                capital: default_capital(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore for MemoryStore {
    fn load_rules(&self) -> Result<Vec<Rule>> {
        Ok(self.tables.read().unwrap().rules.clone())
    }

    fn save_rules(&self, rows: &[Rule]) -> Result<()> {
        self.tables.write().unwrap().rules = rows.to_vec();
        Ok(())
    }

    fn load_positions(&self) -> Result<Vec<Position>> {
        Ok(self.tables.read().unwrap().positions.clone())
    }

    fn save_positions(&self, rows: &[Position]) -> Result<()> {
        self.tables.write().unwrap().positions = rows.to_vec();
        Ok(())
    }

    fn load_trades(&self) -> Result<Vec<TradeRecord>> {
        Ok(self.tables.read().unwrap().trades.clone())
    }

    fn save_trades(&self, rows: &[TradeRecord]) -> Result<()> {
        self.tables.write().unwrap().trades = rows.to_vec();
        Ok(())
    }

    fn load_capital(&self) -> Result<Vec<CapitalRecord>> {
        Ok(self.tables.read().unwrap().capital.clone())
    }

    fn save_capital(&self, rows: &[CapitalRecord]) -> Result<()> {
        self.tables.write().unwrap().capital = rows.to_vec();
        Ok(())
    }
}
