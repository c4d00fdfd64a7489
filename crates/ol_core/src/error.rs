use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettleError {
    #[error("no payout schedule for a field of {players} players")]
    MissingPayoutSchedule { players: usize },

    #[error("invalid pairing edit: {reason}")]
    InvalidMove { reason: String },

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SettleError {
    /// True for errors a caller can fix by editing league configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SettleError::MissingPayoutSchedule { .. } | SettleError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SettleError>;
