//! Principal, trade cash flow and return-on-investment.

use crate::core::records::{CapitalRecord, TradeAction, TradeRecord};
use crate::core::valuation::ValuationContext;
use chrono::{DateTime, Utc};

/// Cumulative principal contributed across the capital log.
pub fn total_principal(records: &[CapitalRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Net realized cash movement from trading: sale proceeds minus purchase
/// cost. Pledging moves collateral, not cash, so it does not count.
pub fn net_trade_flow(trades: &[TradeRecord]) -> f64 {
    trades
        .iter()
        .map(|t| match t.action {
            TradeAction::Sell => t.total_amount,
            TradeAction::Buy => -t.total_amount,
            TradeAction::Pledge => 0.0,
        })
        .sum()
}

#[derive(Debug, Clone, Copy)]
pub struct PerformanceReport {
    pub market_value: f64,
    pub net_trade_flow: f64,
    pub loan_amount: f64,
    pub principal: f64,
    pub total_profit: f64,
    /// Fractional return on contributed principal; `None` when no principal
    /// has been recorded (never a division by zero).
    pub roi: Option<f64>,
    pub as_of: DateTime<Utc>,
}

/// The one place the ROI formula lives.
///
/// Profit nets the live market value and realized trade cash flow against
/// the outstanding loan and everything the user ever paid in; ROI divides
/// that by the paid-in principal. With no trades, no loan and market value
/// equal to principal, ROI is exactly zero.
pub fn compute_performance(
    ctx: &ValuationContext,
    trades: &[TradeRecord],
    capital: &[CapitalRecord],
) -> PerformanceReport {
    let principal = total_principal(capital);
    let flow = net_trade_flow(trades);
    let total_profit = ctx.total_market_value + flow - ctx.loan_amount - principal;
    let roi = if principal > 0.0 {
        Some(total_profit / principal)
    } else {
        None
    };

    PerformanceReport {
        market_value: ctx.total_market_value,
        net_trade_flow: flow,
        loan_amount: ctx.loan_amount,
        principal,
        total_profit,
        roi,
        as_of: ctx.as_of,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn capital(amount: f64) -> CapitalRecord {
        CapitalRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            kind: "Deposit".to_string(),
            amount,
            note: String::new(),
        }
    }

    fn trade(action: TradeAction, total_amount: f64) -> TradeRecord {
        TradeRecord {
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            symbol: "0052".to_string(),
            action,
            price: None,
            quantity: None,
            total_amount,
            note: String::new(),
        }
    }

    fn context(market_value: f64, loan: f64) -> ValuationContext {
        ValuationContext {
            total_market_value: market_value,
            loan_amount: loan,
            as_of: Utc::now(),
        }
    }

    #[test]
    fn test_principal_is_sum_of_amounts() {
        let records = vec![capital(500_000.0), capital(250_000.0), capital(-50_000.0)];
        assert_eq!(total_principal(&records), 700_000.0);
        assert_eq!(total_principal(&[]), 0.0);
    }

    #[test]
    fn test_net_trade_flow_ignores_pledges() {
        let trades = vec![
            trade(TradeAction::Buy, 100_000.0),
            trade(TradeAction::Sell, 160_000.0),
            trade(TradeAction::Pledge, 500_000.0),
        ];
        assert_eq!(net_trade_flow(&trades), 60_000.0);
    }

    #[test]
    fn test_roi_is_zero_at_break_even() {
        // No trades, no loan, market value equal to paid-in principal
        let report = compute_performance(
            &context(800_000.0, 0.0),
            &[],
            &[capital(800_000.0)],
        );
        assert_eq!(report.total_profit, 0.0);
        assert_eq!(report.roi, Some(0.0));
    }

    #[test]
    fn test_roi_with_trades_and_loan() {
        let trades = vec![
            trade(TradeAction::Buy, 200_000.0),
            trade(TradeAction::Sell, 260_000.0),
        ];
        let capital_log = vec![capital(1_000_000.0)];
        let report = compute_performance(&context(1_200_000.0, 100_000.0), &trades, &capital_log);

        assert_eq!(report.net_trade_flow, 60_000.0);
        // 1_200_000 + 60_000 - 100_000 - 1_000_000
        assert_eq!(report.total_profit, 160_000.0);
        assert_eq!(report.roi, Some(0.16));
    }

    #[test]
    fn test_roi_undefined_without_principal() {
        let report = compute_performance(&context(500_000.0, 0.0), &[], &[]);
        assert_eq!(report.principal, 0.0);
        assert_eq!(report.roi, None);
        // profit is still reported
        assert_eq!(report.total_profit, 500_000.0);
    }

    #[test]
    fn test_report_carries_valuation_timestamp() {
        let ctx = context(1.0, 0.0);
        let report = compute_performance(&ctx, &[], &[]);
        assert_eq!(report.as_of, ctx.as_of);
    }
}
