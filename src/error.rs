use thiserror::Error;

/// Errors a trading cycle can surface.
///
/// None of these are fatal: the execution loop reports them and retries on
/// the next tick.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("insufficient data: {got} candles, need {need}")]
    InsufficientData { got: usize, need: usize },

    #[error("price provider error: {0}")]
    Provider(#[source] anyhow::Error),

    #[error("trade ledger error: {0}")]
    Ledger(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
