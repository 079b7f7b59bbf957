use std::path::PathBuf;
use std::time::Duration;

/// Exchange API credentials.
///
/// Paper trading only touches public market data, so these are optional;
/// they are loaded for parity with a live setup.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub api_passphrase: String,
}

/// Runtime configuration, loaded once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Option<Credentials>,
    pub sandbox: bool,
    pub symbol: String,
    pub timeframe: String,
    pub initial_capital: f64,
    pub poll_interval: Duration,
    pub candle_limit: usize,
    pub ledger_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let credentials = match (
            std::env::var("KUCOIN_API_KEY"),
            std::env::var("KUCOIN_API_SECRET"),
            std::env::var("KUCOIN_API_PASSPHRASE"),
        ) {
            (Ok(api_key), Ok(api_secret), Ok(api_passphrase)) => Some(Credentials {
                api_key,
                api_secret,
                api_passphrase,
            }),
            _ => None,
        };

        Self {
            credentials,
            sandbox: env_bool("IS_SANDBOX", false),
            symbol: env_or("SYMBOL", "BTC/USDT"),
            timeframe: env_or("TIMEFRAME", "1h"),
            initial_capital: env_parse("INITIAL_CAPITAL", 1000.0),
            poll_interval: Duration::from_secs(env_parse("POLL_INTERVAL_SECS", 10)),
            candle_limit: 150,
            ledger_path: PathBuf::from(env_or("LEDGER_FILE", "operaciones.csv")),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
