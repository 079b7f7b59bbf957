use super::Strategy;
use crate::indicators::calculate_sma;
use crate::models::{Candle, Signal};
use crate::{BotError, Result};

/// Moving average crossover strategy
///
/// Compares a fast and a slow SMA of closing prices at the two most recent
/// samples. A signal fires only when the ordering of the two averages flips
/// between those samples:
/// - fast crosses above slow → Buy
/// - fast crosses below slow → Sell
/// - anything else, including ties at either sample → Hold
#[derive(Debug, Clone)]
pub struct MaCrossoverStrategy {
    fast_period: usize,
    slow_period: usize,
}

impl MaCrossoverStrategy {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
        }
    }

    fn extract_closes(candles: &[Candle]) -> Vec<f64> {
        candles.iter().map(|c| c.close).collect()
    }
}

impl Default for MaCrossoverStrategy {
    fn default() -> Self {
        Self::new(20, 50)
    }
}

impl Strategy for MaCrossoverStrategy {
    fn generate_signal(&self, candles: &[Candle]) -> Result<Signal> {
        if candles.len() < self.min_candles_required() {
            return Err(BotError::InsufficientData {
                got: candles.len(),
                need: self.min_candles_required(),
            });
        }

        let closes = Self::extract_closes(candles);
        let n = closes.len();

        let fast_now = calculate_sma(&closes, self.fast_period);
        let slow_now = calculate_sma(&closes, self.slow_period);
        let fast_prev = calculate_sma(&closes[..n - 1], self.fast_period);
        let slow_prev = calculate_sma(&closes[..n - 1], self.slow_period);

        // With exactly slow_period candles the slow SMA at the previous
        // sample is undefined; an undefined comparison never signals.
        let signal = match (fast_prev, slow_prev, fast_now, slow_now) {
            (Some(fp), Some(sp), Some(fc), Some(sc)) => {
                if fp < sp && fc > sc {
                    Signal::Buy
                } else if fp > sp && fc < sc {
                    Signal::Sell
                } else {
                    Signal::Hold
                }
            }
            _ => Signal::Hold,
        };

        Ok(signal)
    }

    fn name(&self) -> &str {
        "MaCrossoverStrategy"
    }

    fn min_candles_required(&self) -> usize {
        self.slow_period
    }
}
