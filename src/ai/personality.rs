//! AI 個性定義
//!
//! 定義 4 種個性，每種都有不同的特質與策略參數
//!
//! # 架構
//!
//! 使用聲明式 `PERSONALITY_DEFS` 表定義所有個性的元數據。

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

// ============================================================================
// 個性定義系統
// ============================================================================

/// 個性定義結構
#[derive(Clone, Copy)]
pub struct PersonalityDef {
    pub name: &'static str,
    pub display_name: &'static str,
    pub traits: PersonalityTraits,
    pub strategy: StrategyProfile,
}

/// 個性定義表（順序與 PersonalityId 枚舉值一致）
pub static PERSONALITY_DEFS: [PersonalityDef; 4] = [
    // 0: Aggressive - 追 Yams 和高分組合
    PersonalityDef {
        name: "aggressive",
        display_name: "Aggressive",
        traits: PersonalityTraits { risk_tolerance: 0.9, optimality: 0.5, consistency: 0.4, aggression: 0.9 },
        strategy: StrategyProfile { prioritize_yams: true, prioritize_bonus: false, accept_low_scores: false, risk_zeros: true, thinking_time: 800, bluff_chance: 0.1 },
    },
    // 1: Prudent - 穩拿上半區獎勵
    PersonalityDef {
        name: "prudent",
        display_name: "Prudent",
        traits: PersonalityTraits { risk_tolerance: 0.2, optimality: 0.6, consistency: 0.9, aggression: 0.2 },
        strategy: StrategyProfile { prioritize_yams: false, prioritize_bonus: true, accept_low_scores: true, risk_zeros: false, thinking_time: 1500, bluff_chance: 0.0 },
    },
    // 2: Unpredictable - 隨機混合
    PersonalityDef {
        name: "unpredictable",
        display_name: "Unpredictable",
        traits: PersonalityTraits { risk_tolerance: 0.6, optimality: 0.3, consistency: 0.1, aggression: 0.6 },
        strategy: StrategyProfile { prioritize_yams: false, prioritize_bonus: false, accept_low_scores: true, risk_zeros: true, thinking_time: 1000, bluff_chance: 0.4 },
    },
    // 3: Perfect - 期望值近似
    PersonalityDef {
        name: "perfect",
        display_name: "Perfect",
        traits: PersonalityTraits { risk_tolerance: 0.5, optimality: 1.0, consistency: 1.0, aggression: 0.5 },
        strategy: StrategyProfile { prioritize_yams: true, prioritize_bonus: true, accept_low_scores: false, risk_zeros: false, thinking_time: 2000, bluff_chance: 0.0 },
    },
];

/// 個性 ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalityId {
    Aggressive = 0,
    #[default]
    Prudent = 1,
    Unpredictable = 2,
    Perfect = 3,
}

impl PersonalityId {
    pub fn all() -> &'static [PersonalityId] {
        &[
            PersonalityId::Aggressive,
            PersonalityId::Prudent,
            PersonalityId::Unpredictable,
            PersonalityId::Perfect,
        ]
    }

    pub fn name(&self) -> &'static str {
        PERSONALITY_DEFS[self.to_index()].name
    }

    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// 從名稱解析（不分大小寫）
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// 從名稱解析，未知名稱回退為 Prudent
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!(personality = name, "Unknown personality, falling back to prudent");
            PersonalityId::Prudent
        })
    }
}

/// 個性特質（0.0 ~ 1.0，僅供顯示）
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityTraits {
    pub risk_tolerance: f32,
    pub optimality: f32,
    pub consistency: f32,
    pub aggression: f32,
}

/// 策略參數
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyProfile {
    pub prioritize_yams: bool,
    pub prioritize_bonus: bool,
    pub accept_low_scores: bool,
    pub risk_zeros: bool,
    /// 模擬思考時間（毫秒）
    pub thinking_time: u64,
    pub bluff_chance: f32,
}

/// 個性配置（不可變）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIPersonalityConfig {
    pub id: PersonalityId,
    pub display_name: String,
    pub traits: PersonalityTraits,
    pub strategy: StrategyProfile,
}

impl AIPersonalityConfig {
    pub fn from_id(id: PersonalityId) -> Self {
        let def = &PERSONALITY_DEFS[id.to_index()];
        Self {
            id,
            display_name: def.display_name.to_string(),
            traits: def.traits,
            strategy: def.strategy,
        }
    }

    /// 從名稱建立，未知名稱回退為 Prudent
    pub fn from_name(name: &str) -> Self {
        Self::from_id(PersonalityId::resolve(name))
    }

    /// 模擬思考時間：`thinking_time × scale` 加上 ±`jitter_ms` 的隨機浮動，最小為 0
    pub fn thinking_delay<R: Rng + ?Sized>(&self, rng: &mut R, jitter_ms: u64, scale: f64) -> Duration {
        let base = (self.strategy.thinking_time as f64 * scale.max(0.0)) as i64;
        let jitter = if jitter_ms > 0 {
            let j = jitter_ms as i64;
            rng.gen_range(-j..=j)
        } else {
            0
        };
        Duration::from_millis((base + jitter).max(0) as u64)
    }
}

impl Default for AIPersonalityConfig {
    fn default() -> Self {
        Self::from_id(PersonalityId::default())
    }
}

// ============================================================================
// 單元測試
// ============================================================================
