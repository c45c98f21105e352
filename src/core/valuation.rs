//! Portfolio valuation and maintenance-ratio classification.

use crate::core::price::Quote;
use crate::core::records::Position;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Valuation outcome for a single holding.
#[derive(Debug, Clone)]
pub struct PositionValue {
    pub symbol: String,
    pub quantity: f64,
    pub price: Option<f64>,
    pub value: Option<f64>,
    pub currency: Option<String>,
    pub error: Option<String>,
}

/// Snapshot of the whole portfolio at one instant. `total_value` sums the
/// successfully priced holdings only; failed lookups stay visible on their
/// own rows instead of poisoning the total.
#[derive(Debug)]
pub struct ValuationSnapshot {
    pub positions: Vec<PositionValue>,
    pub total_value: f64,
    pub as_of: DateTime<Utc>,
}

impl ValuationSnapshot {
    pub fn has_errors(&self) -> bool {
        self.positions.iter().any(|p| p.error.is_some())
    }
}

/// Prices every holding against pre-fetched quotes.
///
/// Quotes are fetched concurrently by the caller into a map keyed by the
/// raw symbol, so detail rows always come out in table order no matter how
/// the fetches completed. Zero-quantity placeholder rows are skipped.
/// A failed lookup contributes nothing to the total and records its error
/// on the row; valuation never aborts part-way.
pub fn value_positions(
    positions: &[Position],
    quotes: &HashMap<String, Result<Quote>>,
) -> ValuationSnapshot {
    let mut rows = Vec::new();
    let mut total_value = 0.0;

    for position in positions {
        if position.quantity <= 0.0 {
            debug!("Skipping empty position {}", position.symbol);
            continue;
        }

        let mut row = PositionValue {
            symbol: position.symbol.clone(),
            quantity: position.quantity,
            price: None,
            value: None,
            currency: None,
            error: None,
        };

        match quotes.get(&position.symbol) {
            Some(Ok(quote)) => {
                let value = quote.price * position.quantity;
                row.price = Some(quote.price);
                row.value = Some(value);
                row.currency = Some(quote.currency.clone());
                total_value += value;
            }
            Some(Err(e)) => {
                row.error = Some(e.to_string());
                debug!("Price fetch error for {}: {}", position.symbol, e);
            }
            None => {
                row.error = Some(format!("No quote fetched for {}", position.symbol));
            }
        }
        rows.push(row);
    }

    ValuationSnapshot {
        positions: rows,
        total_value,
        as_of: Utc::now(),
    }
}

/// Margin verdict for a collateral value against the loan balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginStatus {
    /// No loan outstanding; a ratio against zero is meaningless.
    NoLoan,
    Safe { ratio: f64 },
    Alert { ratio: f64, shortfall: f64 },
}

/// Classifies the maintenance ratio. A ratio exactly at the alert line is
/// safe; `shortfall` is the collateral value needed to climb back to it.
pub fn margin_status(total_market_value: f64, loan_amount: f64, alert_pct: f64) -> MarginStatus {
    if loan_amount <= 0.0 {
        return MarginStatus::NoLoan;
    }
    let ratio = total_market_value / loan_amount * 100.0;
    if ratio >= alert_pct {
        MarginStatus::Safe { ratio }
    } else {
        MarginStatus::Alert {
            ratio,
            shortfall: loan_amount * alert_pct / 100.0 - total_market_value,
        }
    }
}

/// Explicit hand-off from the valuation step to the performance step.
///
/// The original dashboard smuggled the market value between tabs through
/// session state; carrying it in a value with its own timestamp makes
/// staleness visible wherever it is consumed.
#[derive(Debug, Clone, Copy)]
pub struct ValuationContext {
    pub total_market_value: f64,
    pub loan_amount: f64,
    pub as_of: DateTime<Utc>,
}

impl ValuationContext {
    pub fn from_snapshot(snapshot: &ValuationSnapshot, loan_amount: f64) -> Self {
        ValuationContext {
            total_market_value: snapshot.total_value,
            loan_amount,
            as_of: snapshot.as_of,
        }
    }
}
