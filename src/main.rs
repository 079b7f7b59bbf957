use papertrader::api::KuCoinClient;
use papertrader::chart::BalanceChart;
use papertrader::config::Config;
use papertrader::execution::{Engine, EngineParams};
use papertrader::ledger::TradeLedger;
use papertrader::portfolio::Portfolio;
use papertrader::strategy::MaCrossoverStrategy;
use papertrader::Strategy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    tracing::info!("🚀 PaperTrader starting");

    let config = Config::from_env();

    if config.sandbox {
        tracing::info!("✅ Sandbox mode enabled");
    } else {
        tracing::info!("⚠️ Live endpoint selected (market data only, no real orders)");
    }
    if config.credentials.is_some() {
        tracing::info!("🔑 Exchange credentials loaded");
    } else {
        tracing::info!("🔓 No exchange credentials found, public market data only");
    }

    let strategy = MaCrossoverStrategy::default();

    tracing::info!("📊 Configuration:");
    tracing::info!("  Symbol: {}", config.symbol);
    tracing::info!("  Timeframe: {}", config.timeframe);
    tracing::info!("  Initial Capital: ${:.2}", config.initial_capital);
    tracing::info!("  Poll Interval: {:?}", config.poll_interval);
    tracing::info!("  Strategy: {}", strategy.name());
    tracing::info!("  Ledger: {}", config.ledger_path.display());

    let provider = KuCoinClient::new(config.sandbox)?;
    let portfolio = Portfolio::new(config.initial_capital);
    let ledger = TradeLedger::new(&config.ledger_path);
    let chart = BalanceChart::new();

    let params = EngineParams {
        symbol: config.symbol.clone(),
        timeframe: config.timeframe.clone(),
        candle_limit: config.candle_limit,
        poll_interval: config.poll_interval,
    };

    let mut engine = Engine::new(
        provider,
        Box::new(strategy),
        portfolio,
        ledger,
        chart,
        params,
    );

    tracing::info!("Press Ctrl+C to stop...\n");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("\n⚠️ Received Ctrl+C, shutting down...");
        }
        _ = engine.run() => {
            // run() never returns on its own
        }
    }

    tracing::info!("👋 PaperTrader stopped");
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "papertrader=info".into()),
        )
        .init();
}
