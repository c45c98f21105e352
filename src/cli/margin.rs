//! The margin-monitor command: price the holdings, show the valuation
//! table and classify the maintenance ratio.

use super::ui;
use crate::core::config::AppConfig;
use crate::core::price::QuoteProvider;
use crate::core::records::default_positions;
use crate::core::valuation::{self, MarginStatus, ValuationSnapshot};
use crate::store::TableStore;
use anyhow::Result;
use comfy_table::Cell;

impl ValuationSnapshot {
    pub fn display_as_table(&self, currency: &str) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Symbol"),
            ui::header_cell("Units"),
            ui::header_cell("Price"),
            ui::header_cell(&format!("Value ({currency})")),
        ]);

        for row in &self.positions {
            let units = Cell::new(format!("{:.2}", row.quantity))
                .set_alignment(comfy_table::CellAlignment::Right);
            let price = ui::format_optional_cell(row.price, |p| format!("{p:.2}"));
            let value = ui::format_optional_cell(row.value, |v| format!("{v:.2}"));

            table.add_row(vec![Cell::new(&row.symbol), units, price, value]);
        }

        let mut output = table.to_string();

        // Failed lookups stay visible per symbol under the table
        for row in &self.positions {
            if let Some(error) = &row.error {
                output.push_str(&format!(
                    "\n{}",
                    ui::style_text(
                        &format!("warning: {} not priced: {error}", row.symbol),
                        ui::StyleType::Warning
                    )
                ));
            }
        }

        output
    }
}

pub async fn run(
    config: &AppConfig,
    store: &dyn TableStore,
    provider: &dyn QuoteProvider,
    loan_override: Option<f64>,
) -> Result<()> {
    let positions = super::load_or_default(store.load_positions(), "positions", default_positions);
    let loan_amount = loan_override.unwrap_or(config.loan_amount);

    let pb = ui::new_progress_bar(super::symbols_to_fetch(&positions), true);
    pb.set_message("Fetching prices...");
    let quotes = super::fetch_quotes(&positions, provider, pb).await;

    let snapshot = valuation::value_positions(&positions, &quotes);

    println!(
        "{}\n",
        ui::style_text("Pledge & Market-Value Monitor", ui::StyleType::Title)
    );
    println!("{}\n", snapshot.display_as_table(&config.currency));

    println!(
        "Collateral market value: {}",
        ui::style_text(
            &ui::format_money(snapshot.total_value),
            ui::StyleType::TotalValue
        )
    );

    match valuation::margin_status(
        snapshot.total_value,
        loan_amount,
        config.alerts.maintenance_alert_pct,
    ) {
        MarginStatus::NoLoan => {
            println!(
                "{}",
                ui::style_text(
                    "No loan outstanding; maintenance ratio not applicable.",
                    ui::StyleType::Subtle
                )
            );
        }
        MarginStatus::Safe { ratio } => {
            println!(
                "Maintenance ratio: {}",
                ui::style_text(&format!("{ratio:.2}% — safe"), ui::StyleType::Ok)
            );
        }
        MarginStatus::Alert { ratio, shortfall } => {
            println!(
                "Maintenance ratio: {}",
                ui::style_text(
                    &format!(
                        "{ratio:.2}% — below the {:.0}% alert line!",
                        config.alerts.maintenance_alert_pct
                    ),
                    ui::StyleType::Error
                )
            );
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "Additional collateral value needed: {}",
                        ui::format_money(shortfall)
                    ),
                    ui::StyleType::Error
                )
            );
        }
    }

    Ok(())
}
