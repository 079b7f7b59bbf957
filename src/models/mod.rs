use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV sample. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Trading signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Side of an executed simulated trade
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Snapshot written to the ledger for each executed simulated trade.
///
/// Timestamps are local time because the ledger's `fecha` column is a
/// human-facing wall-clock value.
#[derive(Debug, Clone)]
pub struct TradeRecord {
    pub timestamp: DateTime<Local>,
    pub action: TradeSide,
    pub price: f64,
    pub cash_balance: f64,
    pub asset_balance: f64,
    pub total_value: f64,
    pub profit_loss_pct: f64,
    pub cumulative_profit_pct: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_side_display() {
        assert_eq!(TradeSide::Buy.to_string(), "BUY");
        assert_eq!(TradeSide::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_candle_roundtrip() {
        let candle = Candle {
            timestamp: Utc::now(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.5,
            volume: 1234.0,
        };

        let json = serde_json::to_string(&candle).unwrap();
        let parsed: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, candle);
    }
}
