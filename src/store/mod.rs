pub mod csv;
pub mod memory;

use crate::core::records::{CapitalRecord, Position, Rule, TradeRecord};
use anyhow::Result;

/// Persistence boundary for the four user-editable tables.
///
/// Loading a table that does not exist yet seeds it with its default rows
/// and returns those. Saving always replaces the whole table; the working
/// copy in memory is the unit of edit, never an individual row.
pub trait TableStore: Send + Sync {
    fn load_rules(&self) -> Result<Vec<Rule>>;
    fn save_rules(&self, rows: &[Rule]) -> Result<()>;

    fn load_positions(&self) -> Result<Vec<Position>>;
    fn save_positions(&self, rows: &[Position]) -> Result<()>;

    fn load_trades(&self) -> Result<Vec<TradeRecord>>;
    fn save_trades(&self, rows: &[TradeRecord]) -> Result<()>;

    fn load_capital(&self) -> Result<Vec<CapitalRecord>>;
    fn save_capital(&self, rows: &[CapitalRecord]) -> Result<()>;
}
