//! Quote abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Latest closing quote for a single symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    pub currency: String,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn last_close(&self, symbol: &str) -> Result<Quote>;
}

/// Normalizes a user-entered symbol before lookup.
///
/// A bare 4-digit code is treated as a Taiwan-exchange equity and gets the
/// `.TW` suffix; anything else (index tickers, already-suffixed codes,
/// foreign symbols) passes through unchanged.
pub fn normalize_symbol(symbol: &str) -> String {
    let trimmed = symbol.trim();
    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        format!("{trimmed}.TW")
    } else {
        trimmed.to_string()
    }
}
