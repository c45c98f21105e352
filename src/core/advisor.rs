//! Rule-table evaluation and sentiment cutoffs for the daily advisory.

use crate::core::config::AlertConfig;
use crate::core::records::Rule;
use std::cmp::Ordering;
use std::fmt::Display;

/// Returns the rule with the greatest threshold at or below `signal`,
/// or `None` when no rule qualifies.
///
/// Rows with duplicate thresholds resolve to the one appearing first in the
/// table (the sort is stable). That tie-break is an implementation detail,
/// not something rule authors should lean on. Non-finite thresholds never
/// match.
pub fn evaluate(signal: f64, rules: &[Rule]) -> Option<&Rule> {
    let mut candidates: Vec<&Rule> = rules.iter().filter(|r| r.threshold.is_finite()).collect();
    candidates.sort_by(|a, b| {
        b.threshold
            .partial_cmp(&a.threshold)
            .unwrap_or(Ordering::Equal)
    });
    candidates.into_iter().find(|r| r.threshold <= signal)
}

/// Manually entered market-sentiment readings.
#[derive(Debug, Clone, Copy)]
pub struct SentimentReadings {
    pub cnn: f64,
    pub cboe: f64,
}

/// Outcome of the fixed sentiment side rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentAdvice {
    /// CNN reading breached its cutoff: cut total principal by 10% or
    /// unwind pledged positions.
    CutPrincipal,
    /// CBOE reading breached its cutoff: trim market value by 5% or
    /// pledged positions by 10%.
    TrimExposure,
    /// Neither cutoff breached: sit on hands.
    Hold,
}

impl Display for SentimentAdvice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SentimentAdvice::CutPrincipal => {
                "Cut total principal by 10% or unwind pledged positions"
            }
            SentimentAdvice::TrimExposure => {
                "Trim market value by 5% or pledged positions by 10%"
            }
            SentimentAdvice::Hold => "Hold and wait",
        };
        write!(f, "{text}")
    }
}

/// Evaluates the two sentiment readings in strict priority order.
///
/// The CNN cutoff is checked first and short-circuits: when it triggers the
/// CBOE reading is not consulted at all. The ordering is a business rule
/// carried over from the original strategy, independent of the cutoff
/// values themselves.
pub fn evaluate_sentiment(readings: SentimentReadings, alerts: &AlertConfig) -> SentimentAdvice {
    if readings.cnn <= alerts.cnn_cutoff {
        SentimentAdvice::CutPrincipal
    } else if readings.cboe <= alerts.cboe_cutoff {
        SentimentAdvice::TrimExposure
    } else {
        SentimentAdvice::Hold
    }
}
