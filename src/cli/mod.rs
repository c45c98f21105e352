pub mod advise;
pub mod capital;
pub mod margin;
pub mod performance;
pub mod positions;
pub mod rules;
pub mod setup;
pub mod trades;
pub mod ui;

use crate::core::price::{Quote, QuoteProvider};
use crate::core::records::Position;
use anyhow::Result;
use futures::future::join_all;
use indicatif::ProgressBar;
use std::collections::{HashMap, HashSet};

/// Fetches quotes for every held symbol concurrently, keyed by the raw
/// symbol as it appears in the positions table. Duplicate symbols are
/// fetched once; completion order does not matter because callers read the
/// map back in table order.
pub(crate) async fn fetch_quotes(
    positions: &[Position],
    provider: &dyn QuoteProvider,
    pb: ProgressBar,
) -> HashMap<String, Result<Quote>> {
    let symbols: HashSet<String> = positions
        .iter()
        .filter(|p| p.quantity > 0.0)
        .map(|p| p.symbol.clone())
        .collect();

    let quote_futures = symbols.iter().map(|symbol| {
        let pb_clone = pb.clone();
        async move {
            let result = provider.last_close(symbol).await;
            pb_clone.inc(1);
            (symbol.clone(), result)
        }
    });

    let quotes = join_all(quote_futures).await.into_iter().collect();
    pb.finish_and_clear();
    quotes
}

/// Number of distinct symbols a quote pass will touch, for progress bars.
pub(crate) fn symbols_to_fetch(positions: &[Position]) -> u64 {
    positions
        .iter()
        .filter(|p| p.quantity > 0.0)
        .map(|p| p.symbol.as_str())
        .collect::<HashSet<_>>()
        .len() as u64
}

/// Unwraps a table load, degrading to the given defaults when the backend
/// is unusable so the session stays interactive.
pub(crate) fn load_or_default<T>(
    result: Result<Vec<T>>,
    table_name: &str,
    defaults: impl FnOnce() -> Vec<T>,
) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!(
                "{}",
                ui::style_text(
                    &format!("Could not load {table_name}: {e:#}. Using defaults for this session."),
                    ui::StyleType::Error
                )
            );
            defaults()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::Position;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct MockQuoteProvider {
        prices: HashMap<String, f64>,
    }

    #[async_trait]
    impl QuoteProvider for MockQuoteProvider {
        async fn last_close(&self, symbol: &str) -> Result<Quote> {
            self.prices
                .get(symbol)
                .map(|price| Quote {
                    price: *price,
                    currency: "TWD".to_string(),
                })
                .ok_or_else(|| anyhow!("Quote not found for {}", symbol))
        }
    }

    fn position(symbol: &str, quantity: f64) -> Position {
        Position {
            symbol: symbol.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_fetch_quotes_skips_empty_and_dedupes() {
        let provider = MockQuoteProvider {
            prices: HashMap::from([("AAA".to_string(), 10.0)]),
        };
        let positions = vec![
            position("AAA", 1.0),
            position("AAA", 2.0),
            position("BBB", 0.0),
            position("CCC", 3.0),
        ];

        assert_eq!(symbols_to_fetch(&positions), 2);

        let quotes = fetch_quotes(
            &positions,
            &provider,
            ui::new_progress_bar(symbols_to_fetch(&positions), false),
        )
        .await;

        assert_eq!(quotes.len(), 2);
        assert!(quotes.get("AAA").unwrap().is_ok());
        assert!(quotes.get("CCC").unwrap().is_err());
        assert!(!quotes.contains_key("BBB"));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let loaded = load_or_default(Ok(vec![1, 2]), "numbers", Vec::new);
        assert_eq!(loaded, vec![1, 2]);

        let fallen_back = load_or_default(Err(anyhow!("disk gone")), "numbers", || vec![9]);
        assert_eq!(fallen_back, vec![9]);
    }
}
