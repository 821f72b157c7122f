//! Settings error types.

use thiserror::Error;

/// Errors that can occur while editing settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The setting name is not recognized.
    #[error("不明な設定項目です: {0}")]
    UnknownKey(String),

    /// A flag value could not be interpreted as on/off.
    #[error("'{key}' には on/off を指定してください（入力: {value}）")]
    InvalidFlag {
        /// Setting name
        key: String,
        /// Rejected value
        value: String,
    },

    /// The value is not one of the allowed choices.
    #[error("'{key}' の値が不正です: {value}")]
    InvalidChoice {
        /// Setting name
        key: String,
        /// Rejected value
        value: String,
    },
}

impl SettingsError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::UnknownKey(_) => "'settings' で設定項目の一覧を確認してください",
            Self::InvalidFlag { .. } => "on, off, true, false, yes, no, 1, 0 のいずれかを指定してください",
            Self::InvalidChoice { .. } => "'help' で指定できる値を確認してください",
        }
    }
}
