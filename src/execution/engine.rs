use std::time::Duration;

use chrono::Local;

use crate::api::PriceProvider;
use crate::chart::ChartSink;
use crate::ledger::TradeLedger;
use crate::models::{Signal, TradeRecord};
use crate::portfolio::Portfolio;
use crate::strategy::Strategy;
use crate::Result;

/// Per-run parameters for the execution loop
#[derive(Debug, Clone)]
pub struct EngineParams {
    pub symbol: String,
    pub timeframe: String,
    pub candle_limit: usize,
    pub poll_interval: Duration,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            symbol: "BTC/USDT".to_string(),
            timeframe: "1h".to_string(),
            candle_limit: 150,
            poll_interval: Duration::from_secs(10),
        }
    }
}

/// Everything one completed cycle produced
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub signal: Signal,
    pub price: f64,
    pub total_value: f64,
    pub trade: Option<TradeRecord>,
}

/// The polling loop: fetch candles, generate a signal, apply it to the
/// portfolio, and forward any executed trade to the ledger and chart.
///
/// Single writer, single task. Everything fallible before the portfolio is
/// touched is collected into one `Result`; a failed cycle leaves the
/// portfolio and ledger untouched and the loop simply sleeps and tries
/// again. Once a trade has executed, sink failures are reported but never
/// raised, so an `Err` cycle never coexists with a mutated portfolio.
pub struct Engine<P: PriceProvider, C: ChartSink> {
    provider: P,
    strategy: Box<dyn Strategy>,
    portfolio: Portfolio,
    ledger: TradeLedger,
    chart: C,
    params: EngineParams,
}

impl<P: PriceProvider, C: ChartSink> Engine<P, C> {
    pub fn new(
        provider: P,
        strategy: Box<dyn Strategy>,
        portfolio: Portfolio,
        ledger: TradeLedger,
        chart: C,
        params: EngineParams,
    ) -> Self {
        Self {
            provider,
            strategy,
            portfolio,
            ledger,
            chart,
            params,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    /// Run one full cycle: fetch → signal → apply → record.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let candles = self
            .provider
            .fetch_candles(
                &self.params.symbol,
                &self.params.timeframe,
                self.params.candle_limit,
            )
            .await?;

        // Signal generation errors (e.g. short series) must propagate
        // before the portfolio is touched.
        let signal = self.strategy.generate_signal(&candles)?;

        // Current price = close of the most recent candle. fetch_candles
        // guarantees a non-empty, oldest-first series.
        let price = candles.last().map(|c| c.close).unwrap_or_default();

        let applied = self.portfolio.apply_signal(signal, price);

        let trade = match applied.trade {
            Some(executed) => {
                let now = Local::now();
                let record = TradeRecord {
                    timestamp: now,
                    action: executed.side,
                    price: executed.price,
                    cash_balance: self.portfolio.cash(),
                    asset_balance: self.portfolio.asset(),
                    total_value: applied.total_value,
                    profit_loss_pct: executed.profit_loss_pct,
                    cumulative_profit_pct: self.portfolio.cumulative_profit_pct(),
                };

                // The position has already switched sides, so a ledger
                // problem cannot fail the cycle: the outcome must always
                // reflect the executed trade.
                if let Err(e) = self.ledger.append(&record) {
                    tracing::warn!("⚠️ Failed to record trade in ledger: {}", e);
                }
                self.chart
                    .push(&now.format("%H:%M:%S").to_string(), applied.total_value);

                Some(record)
            }
            None => None,
        };

        Ok(CycleOutcome {
            signal,
            price,
            total_value: applied.total_value,
            trade,
        })
    }

    /// Run cycles forever, sleeping a fixed interval between them.
    ///
    /// Fail-open by design: every cycle error is reported and retried on
    /// the next tick. No backoff, no retry cap, no terminal state — the
    /// loop ends only when the process does.
    pub async fn run(&mut self) {
        tracing::info!(
            "🔄 Polling {} every {:?} ({} candles @ {})",
            self.params.symbol,
            self.params.poll_interval,
            self.params.candle_limit,
            self.params.timeframe
        );

        loop {
            match self.run_cycle().await {
                Ok(outcome) => {
                    tracing::info!(
                        "📊 Signal: {:?} | Price: ${:.2}",
                        outcome.signal,
                        outcome.price
                    );
                    tracing::info!(
                        "💰 Total simulated balance: ${:.2} (cash: {:.2}, asset: {:.6})",
                        outcome.total_value,
                        self.portfolio.cash(),
                        self.portfolio.asset()
                    );
                }
                Err(e) => {
                    tracing::warn!("⚠️ Cycle failed at {}: {}", Local::now().format("%H:%M:%S"), e);
                }
            }

            tokio::time::sleep(self.params.poll_interval).await;
        }
    }
}
