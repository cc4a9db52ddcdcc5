//! 遊戲核心模組
//!
//! 包含 Yams 骰子遊戲的核心定義：
//! - `constants`: 遊戲常量
//! - `rules`: 計分格、分數驗證規則、上半區獎勵
//! - `dice`: 骰子與擲骰
//! - `patterns`: 骰型判定
//! - `scoring`: 計分引擎

pub mod constants;
pub mod dice;
pub mod patterns;
pub mod rules;
pub mod scoring;

pub use constants::*;
pub use dice::{is_sub_multiset, validate_dice, Dice, DiceRoll};
pub use patterns::{
    count_by_face, full_house, n_of_a_kind, pairs, straight_run, FaceCounts, FullHouseMatch,
    KindMatch, StraightRun,
};
pub use rules::{is_valid_score, upper_bonus, ScoreCategory, ScoreValidationRule, RULE_DEFS};
pub use scoring::{score_all, score_for, ScoreTable};
