//! Yams AI 決策引擎
//!
//! - `game`: 計分格、骰型判定與計分
//! - `ai`: 個性、策略與決策引擎
//! - `service`: 牌桌、AI 玩家註冊表與批次對戰
//! - `config` / `error`: 配置與錯誤型別

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod service;

pub use ai::{AIDecision, AIPersonalityConfig, DecisionEngine, PersonalityId};
pub use config::{load_config, EngineConfig, ThinkingConfig};
pub use error::{EngineError, Result};
pub use game::{DiceRoll, ScoreCategory};
