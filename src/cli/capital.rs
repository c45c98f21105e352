//! Capital-log management and the running principal total.

use super::ui;
use crate::core::performance::total_principal;
use crate::core::records::CapitalRecord;
use crate::store::TableStore;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use comfy_table::Cell;

pub fn list(store: &dyn TableStore) -> Result<()> {
    let records = store.load_capital()?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Type"),
        ui::header_cell("Amount"),
        ui::header_cell("Note"),
    ]);
    for record in &records {
        table.add_row(vec![
            Cell::new(record.date.to_string()),
            Cell::new(&record.kind),
            Cell::new(ui::format_money(record.amount))
                .set_alignment(comfy_table::CellAlignment::Right),
            Cell::new(&record.note),
        ]);
    }

    println!("{}", ui::style_text("Capital Log", ui::StyleType::Title));
    println!("{table}");
    println!(
        "\nContributed principal: {}",
        ui::style_text(
            &ui::format_money(total_principal(&records)),
            ui::StyleType::TotalValue
        )
    );
    Ok(())
}

pub fn add(
    store: &dyn TableStore,
    date: Option<NaiveDate>,
    kind: &str,
    amount: f64,
    note: Option<String>,
) -> Result<()> {
    if !amount.is_finite() {
        bail!("Amount must be a number, got {amount}");
    }

    let record = CapitalRecord {
        date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
        kind: kind.to_string(),
        amount,
        note: note.unwrap_or_default(),
    };

    let mut records = store.load_capital()?;
    records.push(record);
    store.save_capital(&records)?;

    println!(
        "Recorded {kind} of {}. Principal is now {}.",
        ui::format_money(amount),
        ui::format_money(total_principal(&records))
    );
    Ok(())
}
