//! Timer engine error types.

use thiserror::Error;

/// Errors returned by timer engine transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Start was requested with nothing left to count down.
    #[error("残り時間がありません。リセットするかモードを選択してください")]
    NothingRemaining,

    /// The event receiver has been dropped.
    #[error("タイマーイベントの送信に失敗しました")]
    EventChannelClosed,
}

impl TimerError {
    /// Returns true if the caller can keep using the engine after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NothingRemaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert!(TimerError::NothingRemaining.to_string().contains("残り時間"));
        assert!(TimerError::EventChannelClosed
            .to_string()
            .contains("イベント"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(TimerError::NothingRemaining.is_recoverable());
        assert!(!TimerError::EventChannelClosed.is_recoverable());
    }
}
