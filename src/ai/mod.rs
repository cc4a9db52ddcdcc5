//! AI 決策模組
//!
//! - `personality`: 個性定義表與配置
//! - `decision`: 決策結果
//! - `strategy`: 四種個性策略
//! - `engine`: 綁定個性的決策引擎

pub mod decision;
pub mod engine;
pub mod personality;
pub mod strategy;

pub use decision::{AIDecision, CategoryChoice};
pub use engine::DecisionEngine;
pub use personality::{
    AIPersonalityConfig, PersonalityId, PersonalityTraits, StrategyProfile, PERSONALITY_DEFS,
};
pub use strategy::{strategy_for, Strategy};
