//! The performance command: live valuation feeding the ROI report.

use super::ui;
use crate::core::config::AppConfig;
use crate::core::performance::{self, PerformanceReport};
use crate::core::price::QuoteProvider;
use crate::core::records::{default_capital, default_positions, default_trades};
use crate::core::valuation::{self, ValuationContext};
use crate::store::TableStore;
use anyhow::Result;
use comfy_table::Cell;

impl PerformanceReport {
    pub fn display_as_table(&self, currency: &str) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Metric"),
            ui::header_cell(&format!("Amount ({currency})")),
        ]);

        let money_cell = |v: f64| {
            Cell::new(ui::format_money(v)).set_alignment(comfy_table::CellAlignment::Right)
        };
        table.add_row(vec![Cell::new("Market value"), money_cell(self.market_value)]);
        table.add_row(vec![
            Cell::new("Net trade flow"),
            money_cell(self.net_trade_flow),
        ]);
        table.add_row(vec![Cell::new("Loan balance"), money_cell(-self.loan_amount)]);
        table.add_row(vec![
            Cell::new("Contributed principal"),
            money_cell(self.principal),
        ]);
        table.add_row(vec![Cell::new("Total profit"), money_cell(self.total_profit)]);
        table.add_row(vec![
            Cell::new("ROI"),
            ui::format_optional_cell(self.roi, |r| format!("{:.2}%", r * 100.0)),
        ]);

        table.to_string()
    }
}

pub async fn run(
    config: &AppConfig,
    store: &dyn TableStore,
    provider: &dyn QuoteProvider,
    loan_override: Option<f64>,
) -> Result<()> {
    let positions = super::load_or_default(store.load_positions(), "positions", default_positions);
    let trades = super::load_or_default(store.load_trades(), "trade log", default_trades);
    let capital = super::load_or_default(store.load_capital(), "capital log", default_capital);
    let loan_amount = loan_override.unwrap_or(config.loan_amount);

    let pb = ui::new_progress_bar(super::symbols_to_fetch(&positions), true);
    pb.set_message("Fetching prices...");
    let quotes = super::fetch_quotes(&positions, provider, pb).await;

    let snapshot = valuation::value_positions(&positions, &quotes);
    for row in &snapshot.positions {
        if let Some(error) = &row.error {
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "warning: {} not priced ({error}); it contributes nothing to market value",
                        row.symbol
                    ),
                    ui::StyleType::Warning
                )
            );
        }
    }

    let context = ValuationContext::from_snapshot(&snapshot, loan_amount);
    let report = performance::compute_performance(&context, &trades, &capital);

    println!(
        "{}\n",
        ui::style_text("Asset Performance", ui::StyleType::Title)
    );
    println!("{}", report.display_as_table(&config.currency));
    if report.roi.is_none() {
        println!(
            "{}",
            ui::style_text(
                "ROI not computed: no principal recorded in the capital log.",
                ui::StyleType::Subtle
            )
        );
    }
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Valuation as of {}",
                report.as_of.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            ui::StyleType::Subtle
        )
    );

    Ok(())
}
