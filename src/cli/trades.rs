//! Trade-log management: an append-mostly log, edited by replacing the
//! whole table.

use super::ui;
use crate::core::records::{TradeAction, TradeRecord};
use crate::store::TableStore;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use comfy_table::Cell;

pub fn list(store: &dyn TableStore) -> Result<()> {
    let trades = store.load_trades()?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Symbol"),
        ui::header_cell("Action"),
        ui::header_cell("Price"),
        ui::header_cell("Units"),
        ui::header_cell("Total"),
        ui::header_cell("Note"),
    ]);
    for trade in &trades {
        table.add_row(vec![
            Cell::new(trade.date.to_string()),
            Cell::new(&trade.symbol),
            Cell::new(trade.action.to_string()),
            ui::format_optional_cell(trade.price, |p| format!("{p:.2}")),
            ui::format_optional_cell(trade.quantity, |q| format!("{q:.2}")),
            Cell::new(ui::format_money(trade.total_amount))
                .set_alignment(comfy_table::CellAlignment::Right),
            Cell::new(&trade.note),
        ]);
    }

    println!("{}", ui::style_text("Trade Log", ui::StyleType::Title));
    println!("{table}");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn add(
    store: &dyn TableStore,
    date: Option<NaiveDate>,
    symbol: &str,
    action: &str,
    price: Option<f64>,
    quantity: Option<f64>,
    total_amount: f64,
    note: Option<String>,
) -> Result<()> {
    let action: TradeAction = action.parse()?;
    if !total_amount.is_finite() || total_amount < 0.0 {
        bail!("Total amount must be a non-negative number, got {total_amount}");
    }

    let record = TradeRecord {
        date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
        symbol: symbol.to_string(),
        action,
        price,
        quantity,
        total_amount,
        note: note.unwrap_or_default(),
    };

    let mut trades = store.load_trades()?;
    trades.push(record);
    store.save_trades(&trades)?;

    println!(
        "Recorded {action} {symbol} for {}.",
        ui::format_money(total_amount)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn test_add_appends_to_the_log() {
        let store = MemoryStore::new();

        add(
            &store,
            NaiveDate::from_ymd_opt(2024, 3, 1),
            "0052",
            "buy",
            Some(43.2),
            Some(1000.0),
            43_200.0,
            Some("first lot".to_string()),
        )
        .unwrap();
        add(&store, None, "0052", "Sell", None, None, 10_000.0, None).unwrap();

        let trades = store.load_trades().unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].action, TradeAction::Buy);
        assert_eq!(trades[0].note, "first lot");
        assert_eq!(trades[1].action, TradeAction::Sell);
        // omitted date defaults to today
        assert_eq!(trades[1].date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_add_rejects_bad_action_and_amount() {
        let store = MemoryStore::new();
        assert!(add(&store, None, "0052", "short", None, None, 1.0, None).is_err());
        assert!(add(&store, None, "0052", "buy", None, None, -1.0, None).is_err());
        assert!(store.load_trades().unwrap().is_empty());
    }
}
