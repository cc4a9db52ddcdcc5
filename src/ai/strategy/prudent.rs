//! Prudent 策略
//!
//! 以上半區獎勵為主：先鎖定未計分的最高上半區點數，其次三條、對子，最後保留最高三顆。

use rand::RngCore;

use super::{is_open, Strategy};
use crate::ai::decision::{AIDecision, CategoryChoice};
use crate::ai::personality::PersonalityId;
use crate::game::dice::{highest, sum};
use crate::game::{
    count_by_face, n_of_a_kind, pairs, score_all, Dice, DiceRoll, ScoreCategory, FACE_MAX,
    FACE_MIN,
};

/// 機會格的最低接受總和
const CHANCE_MIN_SUM: u16 = 20;

#[derive(Clone, Copy, Debug, Default)]
pub struct PrudentStrategy;

impl PrudentStrategy {
    pub(crate) fn keep(roll: &DiceRoll, available: &[ScoreCategory]) -> AIDecision {
        let dice = roll.dice();
        let counts = count_by_face(dice);

        for face in (FACE_MIN..=FACE_MAX).rev() {
            let count = counts[face as usize];
            let open = ScoreCategory::upper_for_face(face)
                .map(|c| is_open(available, c))
                .unwrap_or(false);
            if open && count >= 2 {
                return AIDecision::keep(
                    vec![face; count as usize],
                    format!("Targeting {}s for the upper bonus", face),
                );
            }
        }

        if let Some(kind) = n_of_a_kind(dice, 3) {
            return AIDecision::keep(
                kind.dice,
                format!("Securing three of a kind on {}s", kind.face),
            );
        }

        let paired = pairs(dice);
        if !paired.is_empty() {
            return AIDecision::keep(paired, "Holding on to pairs");
        }

        AIDecision::keep(highest(dice, 3), "Keeping the three highest dice")
    }

    pub(crate) fn category(dice: &Dice, available: &[ScoreCategory]) -> Option<CategoryChoice> {
        let first = *available.first()?;
        let table = score_all(dice);

        // 上半區：至少三顆才算達標
        for &category in available {
            if let Some(face) = category.upper_face() {
                let score = table.get(category);
                if score >= 3 * face as u16 {
                    return Some(CategoryChoice::new(
                        category,
                        format!("{} scores {}, on pace for the bonus", category, score),
                    ));
                }
            }
        }

        for &category in available {
            if ScoreCategory::COMBOS.contains(&category) && table.get(category) > 0 {
                return Some(CategoryChoice::new(
                    category,
                    format!("Taking {} for {}", category, table.get(category)),
                ));
            }
        }

        if is_open(available, ScoreCategory::Chance) && sum(dice) >= CHANCE_MIN_SUM {
            return Some(CategoryChoice::new(
                ScoreCategory::Chance,
                format!("Chance is worth {}", sum(dice)),
            ));
        }

        // TODO: pick the category with the smallest expected loss instead of the first open one
        Some(CategoryChoice::new(
            first,
            format!("Filling {} with {}", first, table.get(first)),
        ))
    }
}

impl Strategy for PrudentStrategy {
    fn personality(&self) -> PersonalityId {
        PersonalityId::Prudent
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
