//! Holdings table management. Every edit loads the table, builds the new
//! value and saves it back wholesale.

use super::ui;
use crate::core::records::Position;
use crate::store::TableStore;
use anyhow::{Result, bail};
use comfy_table::Cell;

pub fn list(store: &dyn TableStore) -> Result<()> {
    let positions = store.load_positions()?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Symbol"), ui::header_cell("Units")]);
    for position in &positions {
        table.add_row(vec![
            Cell::new(&position.symbol),
            Cell::new(format!("{:.2}", position.quantity))
                .set_alignment(comfy_table::CellAlignment::Right),
        ]);
    }

    println!("{}", ui::style_text("Holdings", ui::StyleType::Title));
    println!("{table}");
    Ok(())
}

pub fn set(store: &dyn TableStore, symbol: &str, quantity: f64) -> Result<()> {
    if !quantity.is_finite() || quantity < 0.0 {
        bail!("Quantity must be a non-negative number, got {quantity}");
    }

    let mut positions = store.load_positions()?;
    match positions.iter_mut().find(|p| p.symbol == symbol) {
        Some(position) => position.quantity = quantity,
        None => positions.push(Position {
            symbol: symbol.to_string(),
            quantity,
        }),
    }
    store.save_positions(&positions)?;

    println!("Saved {symbol} at {quantity:.2} units.");
    Ok(())
}

pub fn remove(store: &dyn TableStore, symbol: &str) -> Result<()> {
    let positions = store.load_positions()?;
    let remaining: Vec<Position> = positions
        .iter()
        .filter(|p| p.symbol != symbol)
        .cloned()
        .collect();
    if remaining.len() == positions.len() {
        bail!("No position found for {symbol}");
    }
    store.save_positions(&remaining)?;

    println!("Removed {symbol}.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn test_set_upserts_and_saves_wholesale() {
        let store = MemoryStore::new();
        store.save_positions(&[]).unwrap();

        set(&store, "0052", 1000.0).unwrap();
        set(&store, "QQQ", 10.0).unwrap();
        set(&store, "0052", 2000.0).unwrap();

        let positions = store.load_positions().unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].symbol, "0052");
        assert_eq!(positions[0].quantity, 2000.0);
    }

    #[test]
    fn test_set_rejects_negative_quantity() {
        let store = MemoryStore::new();
        assert!(set(&store, "0052", -5.0).is_err());
        assert!(set(&store, "0052", f64::NAN).is_err());
    }

    #[test]
    fn test_remove_unknown_symbol_fails() {
        let store = MemoryStore::new();
        store.save_positions(&[]).unwrap();
        assert!(remove(&store, "0052").is_err());
    }

    #[test]
    fn test_remove_drops_only_that_symbol() {
        let store = MemoryStore::new();
        store.save_positions(&[]).unwrap();
        set(&store, "0052", 1.0).unwrap();
        set(&store, "QQQ", 2.0).unwrap();

        remove(&store, "0052").unwrap();

        let positions = store.load_positions().unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "QQQ");
    }
}
