//! Perfect 策略
//!
//! 期望值的啟發式近似（非完整搜尋）：
//! - 保留：Yams 進行中（≥4）> 四條進行中（≥3）> 三條進行中（≥3）> 對子 > 最高兩顆
//! - 計分：`即時分數 + 0.3 × 計分格重要度`，取最大值，並列時取可用格中先出現者

use rand::RngCore;

use super::Strategy;
use crate::ai::decision::{AIDecision, CategoryChoice};
use crate::ai::personality::PersonalityId;
use crate::game::dice::highest;
use crate::game::{n_of_a_kind, pairs, score_all, Dice, DiceRoll, ScoreCategory, ScoreTable};

/// 重要度權重係數
pub const IMPORTANCE_FACTOR: f32 = 0.3;

#[derive(Clone, Copy, Debug, Default)]
pub struct PerfectStrategy;

impl PerfectStrategy {
    /// 計分格估值
    pub fn category_value(table: &ScoreTable, category: ScoreCategory) -> f32 {
        table.get(category) as f32 + IMPORTANCE_FACTOR * category.importance_weight()
    }
}

impl Strategy for PerfectStrategy {
    fn personality(&self) -> PersonalityId {
        PersonalityId::Perfect
    }

    fn choose_keep(
        &self,
        roll: &DiceRoll,
        _available: &[ScoreCategory],
        _rng: &mut dyn RngCore,
    ) -> AIDecision {
        let dice = roll.dice();

        if let Some(kind) = n_of_a_kind(dice, 4) {
            return AIDecision::keep(
                kind.dice,
                format!("Yams in progress: {} {}s", kind.count, kind.face),
            );
        }

        // 三顆同點同時推進四條與三條
        if let Some(kind) = n_of_a_kind(dice, 3) {
            return AIDecision::keep(
                kind.dice,
                format!("Four of a kind in progress on {}s", kind.face),
            );
        }

        let paired = pairs(dice);
        if !paired.is_empty() {
            return AIDecision::keep(paired, "Pairs carry the best expected value");
        }

        AIDecision::keep(highest(dice, 2), "Keeping the two highest dice")
    }

    fn choose_category(
        &self,
        dice: &Dice,
        available: &[ScoreCategory],
        _rng: &mut dyn RngCore,
    ) -> Option<CategoryChoice> {
        let table = score_all(dice);

        let (category, value) = available.iter().fold(None, |best, &c| {
            let value = Self::category_value(&table, c);
            match best {
                Some((_, v)) if v >= value => best,
                _ => Some((c, value)),
            }
        })?;

        Some(CategoryChoice::new(
            category,
            format!(
                "{} scores {} (estimated value {:.1})",
                category,
                table.get(category),
                value
            ),
        ))
    }
}

// ============================================================================
// 單元測試
// ============================================================================
