//! Aggressive 策略
//!
//! 保留順序：Yams（≥3 同點）> 四條（≥3 同點）> 葫蘆（前兩擲）> 順子（前兩擲，連續 ≥4）> 最高兩顆

use rand::RngCore;

use super::{is_open, Strategy};
use crate::ai::decision::{AIDecision, CategoryChoice};
use crate::ai::personality::PersonalityId;
use crate::game::dice::highest;
use crate::game::{full_house, n_of_a_kind, score_all, straight_run, Dice, DiceRoll, ScoreCategory};

/// 計分時依序嘗試的組合格
const COMBO_PRIORITY: [ScoreCategory; 5] = [
    ScoreCategory::FourOfKind,
    ScoreCategory::FullHouse,
    ScoreCategory::LargeStraight,
    ScoreCategory::SmallStraight,
    ScoreCategory::Yams,
];

#[derive(Clone, Copy, Debug, Default)]
pub struct AggressiveStrategy;

impl AggressiveStrategy {
    pub(crate) fn keep(roll: &DiceRoll, _available: &[ScoreCategory]) -> AIDecision {
        let dice = roll.dice();

        // 三顆以上同點：同時是 Yams 與四條的起手
        if let Some(kind) = n_of_a_kind(dice, 3) {
            return AIDecision::keep(
                kind.dice,
                format!("Chasing yams with {} {}s", kind.count, kind.face),
            );
        }

        if roll.roll_number() <= 2 {
            let fh = full_house(dice);
            if fh.possible {
                return AIDecision::keep(fh.dice, "Building a full house");
            }

            let run = straight_run(dice);
            if run.run_length >= 4 {
                return AIDecision::keep(
                    run.run_faces,
                    format!("Running for a straight ({} in a row)", run.run_length),
                );
            }
        }

        AIDecision::keep(highest(dice, 2), "Keeping the two highest dice")
    }

    pub(crate) fn category(dice: &Dice, available: &[ScoreCategory]) -> Option<CategoryChoice> {
        let first = *available.first()?;
        let table = score_all(dice);

        if is_open(available, ScoreCategory::Yams) && table.get(ScoreCategory::Yams) > 0 {
            return Some(CategoryChoice::new(ScoreCategory::Yams, "Yams!"));
        }

        if let Some(&category) = COMBO_PRIORITY
            .iter()
            .find(|&&c| is_open(available, c) && table.get(c) > 0)
        {
            return Some(CategoryChoice::new(
                category,
                format!("Cashing in {} for {}", category, table.get(category)),
            ));
        }

        if is_open(available, ScoreCategory::Chance) {
            return Some(CategoryChoice::new(
                ScoreCategory::Chance,
                format!("Dumping {} into chance", table.get(ScoreCategory::Chance)),
            ));
        }

        Some(CategoryChoice::new(first, format!("Sacrificing {}", first)))
    }
}

impl Strategy for AggressiveStrategy {
    fn personality(&self) -> PersonalityId {
        PersonalityId::Aggressive
    }

    fn choose_keep(
        &self,
        roll: &DiceRoll,
        available: &[ScoreCategory],
        _rng: &mut dyn RngCore,
    ) -> AIDecision {
        Self::keep(roll, available)
    }

    fn choose_category(
        &self,
        dice: &Dice,
        available: &[ScoreCategory],
        _rng: &mut dyn RngCore,
    ) -> Option<CategoryChoice> {
        Self::category(dice, available)
    }
}

// ============================================================================
// 單元測試
// ============================================================================
