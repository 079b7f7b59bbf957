use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::models::Candle;
use crate::{api::PriceProvider, BotError};

const KUCOIN_API_BASE: &str = "https://api.kucoin.com";
const KUCOIN_SANDBOX_API_BASE: &str = "https://openapi-sandbox.kucoin.com";
const RATE_LIMIT_RPM: u32 = 100; // Public endpoints allow far more; stay well under

// Type alias for the rate limiter to simplify signatures
type KuCoinRateLimiter = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Response from /api/v1/market/candles
///
/// Rows are `[time, open, close, high, low, volume, turnover]`, all strings,
/// newest first.
#[derive(Debug, Deserialize)]
struct KlineResponse {
    code: String,
    #[serde(default)]
    data: Vec<[String; 7]>,
    #[serde(default)]
    msg: Option<String>,
}

/// KuCoin market-data client
///
/// Only public endpoints are used; paper trading never places orders, so no
/// request signing is needed.
#[derive(Clone)]
pub struct KuCoinClient {
    client: Client,
    base_url: String,
    rate_limiter: Arc<KuCoinRateLimiter>,
}

impl KuCoinClient {
    pub fn new(sandbox: bool) -> Result<Self> {
        let base = if sandbox {
            KUCOIN_SANDBOX_API_BASE
        } else {
            KUCOIN_API_BASE
        };
        Self::with_base_url(base)
    }

    /// Build a client against an explicit base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        let quota = Quota::per_minute(NonZeroU32::new(RATE_LIMIT_RPM).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            client,
            base_url: base_url.into(),
            rate_limiter,
        })
    }

    /// Map a `BASE/QUOTE` pair to KuCoin's `BASE-QUOTE` form
    fn map_symbol(symbol: &str) -> String {
        symbol.replace('/', "-")
    }

    /// Map a short timeframe to KuCoin's kline type and its length in seconds
    fn map_timeframe(timeframe: &str) -> Result<(&'static str, i64)> {
        let mapped = match timeframe {
            "1m" => ("1min", 60),
            "5m" => ("5min", 300),
            "15m" => ("15min", 900),
            "30m" => ("30min", 1800),
            "1h" => ("1hour", 3600),
            "4h" => ("4hour", 14400),
            "1d" => ("1day", 86400),
            other => bail!("Unsupported timeframe: {}", other),
        };
        Ok(mapped)
    }

    async fn get_klines(&self, symbol: &str, timeframe: &str, limit: usize) -> Result<Vec<Candle>> {
        let (kline_type, interval_secs) = Self::map_timeframe(timeframe)?;
        let end_at = Utc::now().timestamp();
        let start_at = end_at - interval_secs * limit as i64;

        let url = format!(
            "{}/api/v1/market/candles?type={}&symbol={}&startAt={}&endAt={}",
            self.base_url,
            kline_type,
            Self::map_symbol(symbol),
            start_at,
            end_at
        );

        self.rate_limiter.until_ready().await;

        tracing::debug!("Fetching {} {} candles for {}", limit, timeframe, symbol);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("KuCoin request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            bail!("KuCoin API error ({}): {}", status, body);
        }

        let parsed: KlineResponse = response
            .json()
            .await
            .context("Failed to parse kline response")?;

        if parsed.code != "200000" {
            bail!(
                "KuCoin returned code {}: {}",
                parsed.code,
                parsed.msg.unwrap_or_default()
            );
        }

        if parsed.data.is_empty() {
            bail!("KuCoin returned no candles for {}", symbol);
        }

        // Rows arrive newest first
        let mut candles = Vec::with_capacity(parsed.data.len());
        for row in parsed.data.iter().rev() {
            candles.push(Self::parse_row(row)?);
        }

        if candles.len() != limit {
            tracing::warn!(
                "Expected {} candles for {}, got {}",
                limit,
                symbol,
                candles.len()
            );
        }

        Ok(candles)
    }

    fn parse_row(row: &[String; 7]) -> Result<Candle> {
        let secs: i64 = row[0].parse().context("Invalid candle timestamp")?;
        let timestamp: DateTime<Utc> =
            DateTime::from_timestamp(secs, 0).context("Candle timestamp out of range")?;

        let field = |i: usize, name: &str| -> Result<f64> {
            row[i]
                .parse::<f64>()
                .with_context(|| format!("Invalid candle {}: {}", name, row[i]))
        };

        Ok(Candle {
            timestamp,
            open: field(1, "open")?,
            close: field(2, "close")?,
            high: field(3, "high")?,
            low: field(4, "low")?,
            volume: field(5, "volume")?,
        })
    }
}

impl PriceProvider for KuCoinClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> crate::Result<Vec<Candle>> {
        self.get_klines(symbol, timeframe, limit)
            .await
            .map_err(BotError::Provider)
    }
}
