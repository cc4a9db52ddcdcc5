//! 計分規則目錄
//!
//! 定義 13 個計分格、每格的分數範圍、固定分數與上半區獎勵門檻
//!
//! # 架構
//!
//! 使用聲明式 `RULE_DEFS` 表定義所有計分格的元數據。

use serde::{Deserialize, Serialize};

use super::constants::{
    FULL_HOUSE_SCORE, LARGE_STRAIGHT_SCORE, SMALL_STRAIGHT_SCORE, UPPER_BONUS_THRESHOLD,
    UPPER_BONUS_VALUE, YAMS_SCORE,
};

// ============================================================================
// 計分格定義系統
// ============================================================================

/// 計分格定義結構
#[derive(Clone, Copy)]
pub struct RuleDef {
    pub name: &'static str,
    pub min_value: u16,
    pub max_value: u16,
    pub fixed_value: Option<u16>,
    /// Perfect 個性使用的靜態重要度權重
    pub importance_weight: f32,
}

/// 計分格定義表（順序與 ScoreCategory 枚舉值一致）
pub static RULE_DEFS: [RuleDef; 13] = [
    // 0-5: 上半區，分數 = 面值 × 骰子數
    RuleDef { name: "ones", min_value: 0, max_value: 5, fixed_value: None, importance_weight: 8.0 },
    RuleDef { name: "twos", min_value: 0, max_value: 10, fixed_value: None, importance_weight: 6.0 },
    RuleDef { name: "threes", min_value: 0, max_value: 15, fixed_value: None, importance_weight: 4.0 },
    RuleDef { name: "fours", min_value: 0, max_value: 20, fixed_value: None, importance_weight: 3.0 },
    RuleDef { name: "fives", min_value: 0, max_value: 25, fixed_value: None, importance_weight: 2.0 },
    RuleDef { name: "sixes", min_value: 0, max_value: 30, fixed_value: None, importance_weight: 1.0 },
    // 6-7: N 條，分數 = 骰子總和
    RuleDef { name: "threeOfKind", min_value: 0, max_value: 30, fixed_value: None, importance_weight: 2.0 },
    RuleDef { name: "fourOfKind", min_value: 0, max_value: 30, fixed_value: None, importance_weight: 3.0 },
    // 8-11: 固定分數，只能是 0 或固定值
    RuleDef { name: "fullHouse", min_value: 0, max_value: FULL_HOUSE_SCORE, fixed_value: Some(FULL_HOUSE_SCORE), importance_weight: 5.0 },
    RuleDef { name: "smallStraight", min_value: 0, max_value: SMALL_STRAIGHT_SCORE, fixed_value: Some(SMALL_STRAIGHT_SCORE), importance_weight: 5.0 },
    RuleDef { name: "largeStraight", min_value: 0, max_value: LARGE_STRAIGHT_SCORE, fixed_value: Some(LARGE_STRAIGHT_SCORE), importance_weight: 5.0 },
    RuleDef { name: "yams", min_value: 0, max_value: YAMS_SCORE, fixed_value: Some(YAMS_SCORE), importance_weight: 0.0 },
    // 12: 機會，總是計總和
    RuleDef { name: "chance", min_value: 5, max_value: 30, fixed_value: None, importance_weight: 0.0 },
];

/// 計分格
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreCategory {
    // 上半區
    Ones = 0,
    Twos = 1,
    Threes = 2,
    Fours = 3,
    Fives = 4,
    Sixes = 5,
    // 下半區
    ThreeOfKind = 6,
    FourOfKind = 7,
    FullHouse = 8,
    SmallStraight = 9,
    LargeStraight = 10,
    Yams = 11,
    Chance = 12,
}

impl ScoreCategory {
    /// 所有計分格（計分表順序）
    pub const ALL: [ScoreCategory; 13] = [
        ScoreCategory::Ones,
        ScoreCategory::Twos,
        ScoreCategory::Threes,
        ScoreCategory::Fours,
        ScoreCategory::Fives,
        ScoreCategory::Sixes,
        ScoreCategory::ThreeOfKind,
        ScoreCategory::FourOfKind,
        ScoreCategory::FullHouse,
        ScoreCategory::SmallStraight,
        ScoreCategory::LargeStraight,
        ScoreCategory::Yams,
        ScoreCategory::Chance,
    ];

    pub const UPPER: [ScoreCategory; 6] = [
        ScoreCategory::Ones,
        ScoreCategory::Twos,
        ScoreCategory::Threes,
        ScoreCategory::Fours,
        ScoreCategory::Fives,
        ScoreCategory::Sixes,
    ];

    pub const LOWER: [ScoreCategory; 7] = [
        ScoreCategory::ThreeOfKind,
        ScoreCategory::FourOfKind,
        ScoreCategory::FullHouse,
        ScoreCategory::SmallStraight,
        ScoreCategory::LargeStraight,
        ScoreCategory::Yams,
        ScoreCategory::Chance,
    ];

    /// 組合計分格（下半區扣除機會）
    pub const COMBOS: [ScoreCategory; 6] = [
        ScoreCategory::ThreeOfKind,
        ScoreCategory::FourOfKind,
        ScoreCategory::FullHouse,
        ScoreCategory::SmallStraight,
        ScoreCategory::LargeStraight,
        ScoreCategory::Yams,
    ];

    /// 計分格識別名稱（如 "fours"、"threeOfKind"）
    pub fn name(&self) -> &'static str {
        RULE_DEFS[self.to_index()].name
    }

    /// 從識別名稱解析
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    pub fn to_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn is_upper(&self) -> bool {
        self.to_index() < Self::UPPER.len()
    }

    /// 上半區對應的骰面（1..=6），下半區回傳 None
    pub fn upper_face(&self) -> Option<u8> {
        if self.is_upper() {
            Some(self.to_index() as u8 + 1)
        } else {
            None
        }
    }

    /// 骰面對應的上半區計分格
    pub fn upper_for_face(face: u8) -> Option<Self> {
        match face {
            1..=6 => Some(Self::UPPER[(face - 1) as usize]),
            _ => None,
        }
    }

    /// 固定分數計分格（葫蘆、順子、Yams）
    pub fn fixed_value(&self) -> Option<u16> {
        RULE_DEFS[self.to_index()].fixed_value
    }

    pub fn importance_weight(&self) -> f32 {
        RULE_DEFS[self.to_index()].importance_weight
    }

    pub fn validation_rule(&self) -> ScoreValidationRule {
        let def = &RULE_DEFS[self.to_index()];
        ScoreValidationRule {
            min_value: def.min_value,
            max_value: def.max_value,
            fixed_value: def.fixed_value,
        }
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 單一計分格的分數驗證規則
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreValidationRule {
    pub min_value: u16,
    pub max_value: u16,
    pub fixed_value: Option<u16>,
}

impl ScoreValidationRule {
    /// 固定分數格只接受 0 或固定值，其餘格檢查範圍
    pub fn accepts(&self, value: u16) -> bool {
        match self.fixed_value {
            Some(fixed) => value == 0 || value == fixed,
            None => value >= self.min_value && value <= self.max_value,
        }
    }
}

/// 檢查分數對該計分格是否合法
pub fn is_valid_score(category: ScoreCategory, value: u16) -> bool {
    category.validation_rule().accepts(value)
}

/// 上半區獎勵（總和達門檻時給予）
pub fn upper_bonus(upper_total: u16) -> u16 {
    if upper_total >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS_VALUE
    } else {
        0
    }
}

// ============================================================================
// 單元測試
// ============================================================================
