use thiserror::Error;

#[derive(Error, Debug)]
pub enum FuelPulseError {
    /// Persistence unreachable or a constraint violated. Aborts the
    /// current signal; the caller decides to skip and continue.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Notification channel failure. Contained inside the notification
    /// router — logged, never propagated past it.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
