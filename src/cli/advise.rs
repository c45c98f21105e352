//! The "today's guidance" command: volatility rule verdict plus the fixed
//! sentiment cutoffs.

use super::ui;
use crate::core::advisor::{self, SentimentAdvice, SentimentReadings};
use crate::core::config::AppConfig;
use crate::core::price::QuoteProvider;
use crate::core::records::default_rules;
use crate::store::TableStore;
use anyhow::Result;
use tracing::warn;

pub async fn run(
    config: &AppConfig,
    store: &dyn TableStore,
    provider: &dyn QuoteProvider,
    readings: SentimentReadings,
) -> Result<()> {
    let rules = super::load_or_default(store.load_rules(), "rule table", default_rules);

    println!(
        "{}\n",
        ui::style_text("Today's Guidance", ui::StyleType::Title)
    );

    match provider.last_close(&config.vix_symbol).await {
        Ok(quote) => {
            println!("VIX Index: {:.2}", quote.price);
            match advisor::evaluate(quote.price, &rules) {
                Some(rule) => {
                    println!(
                        "{}",
                        ui::style_text(
                            &format!(
                                "Alert triggered (VIX >= {:.1}) — SOP: {}",
                                rule.threshold, rule.action
                            ),
                            ui::StyleType::Error
                        )
                    );
                }
                None => {
                    println!(
                        "{}",
                        ui::style_text(
                            "No volatility rule triggered; sit tight.",
                            ui::StyleType::Ok
                        )
                    );
                }
            }
        }
        Err(e) => {
            // A failed fetch is not "no action": the rules are left
            // unevaluated and the failure stays visible on its own line.
            warn!(error = %e, "VIX fetch failed");
            println!(
                "{}",
                ui::style_text(&format!("VIX fetch failed: {e:#}"), ui::StyleType::Error)
            );
            println!(
                "{}",
                ui::style_text(
                    "VIX Index: 0.00 (placeholder; volatility rules not evaluated)",
                    ui::StyleType::Subtle
                )
            );
        }
    }

    ui::print_separator();

    println!(
        "CNN Fear & Greed (P/C): {:.2}   CBOE Equity P/C: {:.2}",
        readings.cnn, readings.cboe
    );
    let advice = advisor::evaluate_sentiment(readings, &config.alerts);
    match advice {
        SentimentAdvice::CutPrincipal => {
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "Active defense (CNN <= {:.2}): {advice}",
                        config.alerts.cnn_cutoff
                    ),
                    ui::StyleType::Error
                )
            );
        }
        SentimentAdvice::TrimExposure => {
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "Tactical adjustment (CBOE <= {:.2}): {advice}",
                        config.alerts.cboe_cutoff
                    ),
                    ui::StyleType::Warning
                )
            );
        }
        SentimentAdvice::Hold => {
            println!("{}", ui::style_text(&advice.to_string(), ui::StyleType::Ok));
        }
    }

    Ok(())
}
