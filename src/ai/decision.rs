//! AI 決策結果

use serde::{Deserialize, Serialize};

use crate::game::ScoreCategory;

/// 單次決策（由呼叫端立即消費）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIDecision {
    /// 要保留的骰子點數（本次擲骰的子多重集）
    pub dice_to_keep: Vec<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_to_score: Option<ScoreCategory>,
    /// 顯示用說明，不參與邏輯
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl AIDecision {
    /// 保留骰子的決策
    pub fn keep(mut dice: Vec<u8>, reasoning: impl Into<String>) -> Self {
        dice.sort_unstable();
        Self {
            dice_to_keep: dice,
            category_to_score: None,
            reasoning: Some(reasoning.into()),
        }
    }

    /// 回合結束的計分決策
    pub fn score(dice: &[u8], choice: CategoryChoice) -> Self {
        let mut kept = dice.to_vec();
        kept.sort_unstable();
        Self {
            dice_to_keep: kept,
            category_to_score: Some(choice.category),
            reasoning: Some(choice.reasoning),
        }
    }
}

/// 策略選出的計分格
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryChoice {
    pub category: ScoreCategory,
    pub reasoning: String,
}

impl CategoryChoice {
    pub fn new(category: ScoreCategory, reasoning: impl Into<String>) -> Self {
        Self {
            category,
            reasoning: reasoning.into(),
        }
    }
}
