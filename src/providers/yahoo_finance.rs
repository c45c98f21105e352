use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::core::cache::Cache;
use crate::core::price::{Quote, QuoteProvider, normalize_symbol};

// YahooQuoteProvider implementation for QuoteProvider
pub struct YahooQuoteProvider {
    base_url: String,
    cache: Arc<Cache<String, Quote>>,
}

impl YahooQuoteProvider {
    pub fn new(base_url: &str, cache: Arc<Cache<String, Quote>>) -> Self {
        YahooQuoteProvider {
            base_url: base_url.to_string(),
            cache,
        }
    }
}

#[derive(Deserialize, Debug)]
struct YahooQuoteResponse {
    chart: QuoteChartResult,
}

#[derive(Deserialize, Debug)]
struct QuoteChartResult {
    result: Vec<QuoteChartItem>,
}

#[derive(Deserialize, Debug)]
struct QuoteChartItem {
    meta: QuoteChartMeta,
}

#[derive(Deserialize, Debug)]
struct QuoteChartMeta {
    #[serde(alias = "regularMarketPrice")]
    regular_market_price: f64,
    currency: String,
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    #[instrument(
        name = "YahooQuoteFetch",
        skip(self),
        fields(symbol = %symbol)
    )]
    async fn last_close(&self, symbol: &str) -> Result<Quote> {
        let lookup_symbol = normalize_symbol(symbol);
        if let Some(cached) = self.cache.get(&lookup_symbol).await {
            return Ok(cached);
        }

        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=1d",
            self.base_url, lookup_symbol
        );
        debug!("Requesting quote data from {}", url);

        let client = reqwest::Client::builder().user_agent("invctl/1.0").build()?;
        let response = client.get(&url).send().await.map_err(|e| {
            anyhow!(
                "Request error: {} for symbol: {} URL: {}",
                e,
                lookup_symbol,
                url
            )
        })?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for symbol: {}",
                response.status(),
                lookup_symbol
            ));
        }

        let text = response.text().await?;
        let data: YahooQuoteResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", lookup_symbol, e))?;

        let item = data
            .chart
            .result
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No quote data found for symbol: {}", lookup_symbol))?;

        let quote = Quote {
            price: item.meta.regular_market_price,
            currency: item.meta.currency,
        };

        self.cache.put(lookup_symbol, quote.clone()).await;

        Ok(quote)
    }
}
