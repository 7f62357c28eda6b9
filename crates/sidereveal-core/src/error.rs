use thiserror::Error;

/// Raised by `UiSender::send` when nothing is listening any more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("ui channel disconnected: receiver was cancelled or dropped")]
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown reveal direction `{0}` (expected `leading` or `trailing`)")]
    UnknownDirection(String),
    #[error("unknown animation preset `{0}`")]
    UnknownAnimation(String),
}
