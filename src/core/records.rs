//! Row types for the four persisted tables.
//!
//! Each table is a plain value object: editing produces a new `Vec` of rows
//! and saving replaces the whole table. There is no row-level CRUD.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// One row of the volatility rule table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub threshold: f64,
    pub action: String,
}

/// One holding in the pledged portfolio. `quantity` is never negative;
/// a zero-quantity row is a placeholder the user has not filled in yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
    Pledge,
}

impl Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TradeAction::Buy => "Buy",
            TradeAction::Sell => "Sell",
            TradeAction::Pledge => "Pledge",
        };
        write!(f, "{name}")
    }
}

impl FromStr for TradeAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(TradeAction::Buy),
            "sell" => Ok(TradeAction::Sell),
            "pledge" => Ok(TradeAction::Pledge),
            _ => Err(anyhow::anyhow!(
                "Invalid trade action: {s} (expected Buy, Sell or Pledge)"
            )),
        }
    }
}

/// One row of the trade log. `price` and `quantity` are informational and
/// may be blank; `total_amount` is what the cash-flow math uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub action: TradeAction,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<f64>,
    pub total_amount: f64,
    #[serde(default)]
    pub note: String,
}

/// One row of the capital log; the sum of `amount` across rows is the
/// cumulative principal contributed so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalRecord {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

/// Seed rules written the first time the table is touched.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            threshold: 30.0,
            action: "Deploy 20% of reserve into QQQ / 00938".to_string(),
        },
        Rule {
            threshold: 40.0,
            action: "Deploy 40% of reserve into 009815 / 0052".to_string(),
        },
        Rule {
            threshold: 60.0,
            action: "Rotate 50% of holdings into QLD / 00631L".to_string(),
        },
    ]
}

/// Seed holdings: the two ETF placeholders from the original sheet, left at
/// zero quantity until the user fills them in.
pub fn default_positions() -> Vec<Position> {
    vec![
        Position {
            symbol: "009814.TW".to_string(),
            quantity: 0.0,
        },
        Position {
            symbol: "0052".to_string(),
            quantity: 0.0,
        },
    ]
}

pub fn default_trades() -> Vec<TradeRecord> {
    Vec::new()
}

pub fn default_capital() -> Vec<CapitalRecord> {
    Vec::new()
}
