//! Sound system error types.
//!
//! This module defines the error types for the alarm and music channels.
//! None of these errors are fatal: a failed play leaves the channel in the
//! "not playing" state and the timer carries on.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// Sound playback was turned off for this session.
    #[error("サウンドは無効化されています")]
    Disabled,

    /// Nothing is loaded on the channel.
    #[error("再生するサウンドが選択されていません")]
    NoSource,

    /// The selected track has not been downloaded.
    #[error("サウンドファイルがありません: {path}（ダウンロード元: {url}）")]
    SourceMissing {
        /// Expected location of the asset
        path: String,
        /// Where the asset can be downloaded from
        url: String,
    },

    /// Sound file could not be opened.
    #[error("サウンドファイルが見つかりません: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("サウンドファイルのデコードに失敗しました: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),

    /// The output refused to start playback.
    #[error("サウンド再生が拒否されました: {0}")]
    PlaybackRejected(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(
            self,
            Self::DeviceNotAvailable(_) | Self::StreamError(_) | Self::PlaybackRejected(_)
        )
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::SourceMissing { .. } | Self::FileNotFound(_) | Self::DecodeError(_)
        )
    }

    /// Returns true if the failure follows from the session configuration
    /// and is not worth a warning.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Disabled | Self::NoSource)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "オーディオデバイスを接続してください",
            Self::Disabled => "--no-sound を外して起動してください",
            Self::NoSource => "'set music <id>' で曲を選択してください",
            Self::SourceMissing { .. } => "表示されたURLからファイルをダウンロードしてください",
            Self::FileNotFound(_) => "アセットディレクトリを確認してください",
            Self::DecodeError(_) => "サウンドファイルが破損している可能性があります",
            Self::StreamError(_) => "オーディオ設定を確認してください",
            Self::PlaybackRejected(_) => "もう一度再生を試してください",
        }
    }
}
