//! 錯誤類型

use thiserror::Error;

/// 決策引擎錯誤
#[derive(Debug, Error)]
pub enum EngineError {
    /// 骰子格式錯誤、擲骰次數超出範圍、保留骰不屬於本次擲骰
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 呼叫時機錯誤（例如已無可用計分格）
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
