pub mod kucoin;

pub use kucoin::KuCoinClient;

use crate::models::Candle;
use crate::Result;

/// External OHLCV history provider.
///
/// Returns candles ordered oldest-to-newest. Any failure is retryable from
/// the execution loop's point of view.
pub trait PriceProvider {
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Candle>>> + Send;
}
