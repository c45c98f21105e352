//! Volatility rule-table management.

use super::ui;
use crate::core::records::Rule;
use crate::store::TableStore;
use anyhow::{Result, bail};
use comfy_table::Cell;

pub fn list(store: &dyn TableStore) -> Result<()> {
    let rules = store.load_rules()?;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Threshold"),
        ui::header_cell("Action"),
    ]);
    for (i, rule) in rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{:.1}", rule.threshold))
                .set_alignment(comfy_table::CellAlignment::Right),
            Cell::new(&rule.action),
        ]);
    }

    println!(
        "{}",
        ui::style_text("Volatility Rules", ui::StyleType::Title)
    );
    println!("{table}");
    Ok(())
}

pub fn add(store: &dyn TableStore, threshold: f64, action: &str) -> Result<()> {
    if !threshold.is_finite() {
        bail!("Threshold must be a number, got {threshold}");
    }
    if action.trim().is_empty() {
        bail!("Action text must not be empty");
    }

    let mut rules = store.load_rules()?;
    rules.push(Rule {
        threshold,
        action: action.trim().to_string(),
    });
    store.save_rules(&rules)?;

    println!("Added rule: at VIX {threshold:.1}, {action}.");
    Ok(())
}

/// Removes a rule by its 1-based listing index.
pub fn remove(store: &dyn TableStore, index: usize) -> Result<()> {
    let mut rules = store.load_rules()?;
    if index == 0 || index > rules.len() {
        bail!(
            "Rule index {index} out of range; the table has {} rows",
            rules.len()
        );
    }
    let removed = rules.remove(index - 1);
    store.save_rules(&rules)?;

    println!("Removed rule: at VIX {:.1}, {}.", removed.threshold, removed.action);
    Ok(())
}
