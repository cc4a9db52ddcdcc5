//! Unpredictable 策略
//!
//! 保留：40% 隨機保留 1~3 顆洗牌後的骰子，其餘一半交給 Aggressive、一半交給 Prudent。
//! 計分：30% 隨機選可用格，其餘同樣對半分派。

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::aggressive::AggressiveStrategy;
use super::prudent::PrudentStrategy;
use super::Strategy;
use crate::ai::decision::{AIDecision, CategoryChoice};
use crate::ai::personality::PersonalityId;
use crate::game::{Dice, DiceRoll, ScoreCategory};

pub const RANDOM_KEEP_CHANCE: f64 = 0.4;
pub const RANDOM_CATEGORY_CHANCE: f64 = 0.3;

/// 本次決策走的分支
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnpredictableBranch {
    Random,
    Aggressive,
    Prudent,
}

impl UnpredictableBranch {
    /// 先判斷是否走隨機分支，否則 50/50 選擇委派對象
    pub fn pick<R: Rng + ?Sized>(rng: &mut R, random_chance: f64) -> Self {
        if rng.gen_bool(random_chance) {
            UnpredictableBranch::Random
        } else if rng.gen_bool(0.5) {
            UnpredictableBranch::Aggressive
        } else {
            UnpredictableBranch::Prudent
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct UnpredictableStrategy {
    pub random_keep_chance: f64,
    pub random_category_chance: f64,
}

impl Default for UnpredictableStrategy {
    fn default() -> Self {
        Self {
            random_keep_chance: RANDOM_KEEP_CHANCE,
            random_category_chance: RANDOM_CATEGORY_CHANCE,
        }
    }
}

impl UnpredictableStrategy {
    /// 保留決策，並回報走的分支
    pub fn keep_with_branch(
        &self,
        roll: &DiceRoll,
        available: &[ScoreCategory],
        rng: &mut dyn RngCore,
    ) -> (UnpredictableBranch, AIDecision) {
        let branch = UnpredictableBranch::pick(rng, self.random_keep_chance);
        let decision = match branch {
            UnpredictableBranch::Random => {
                let mut shuffled = roll.dice().to_vec();
                shuffled.shuffle(rng);
                let n = rng.gen_range(1..=3);
                shuffled.truncate(n);
                AIDecision::keep(shuffled, format!("Going with a hunch, keeping {}", n))
            }
            UnpredictableBranch::Aggressive => AggressiveStrategy::keep(roll, available),
            UnpredictableBranch::Prudent => PrudentStrategy::keep(roll, available),
        };
        (branch, decision)
    }
}

impl Strategy for UnpredictableStrategy {
    fn personality(&self) -> PersonalityId {
        PersonalityId::Unpredictable
    }

    fn choose_keep(
        &self,
        roll: &DiceRoll,
        available: &[ScoreCategory],
        rng: &mut dyn RngCore,
    ) -> AIDecision {
        self.keep_with_branch(roll, available, rng).1
    }

    fn choose_category(
        &self,
        dice: &Dice,
        available: &[ScoreCategory],
        rng: &mut dyn RngCore,
    ) -> Option<CategoryChoice> {
        if available.is_empty() {
            return None;
        }
        match UnpredictableBranch::pick(rng, self.random_category_chance) {
            UnpredictableBranch::Random => {
                let category = *available.choose(rng)?;
                Some(CategoryChoice::new(category, format!("Why not {}?", category)))
            }
            UnpredictableBranch::Aggressive => AggressiveStrategy::category(dice, available),
            UnpredictableBranch::Prudent => PrudentStrategy::category(dice, available),
        }
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::is_sub_multiset;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_branch_frequency() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 10_000;
        let mut random = 0;
        let mut aggressive = 0;
        for _ in 0..trials {
            match UnpredictableBranch::pick(&mut rng, RANDOM_KEEP_CHANCE) {
                UnpredictableBranch::Random => random += 1,
                UnpredictableBranch::Aggressive => aggressive += 1,
                UnpredictableBranch::Prudent => {}
            }
        }
        let rate = random as f64 / trials as f64;
        assert!((rate - 0.4).abs() < 0.03, "random rate {}", rate);
        // 剩下 60% 對半分
        let agg_rate = aggressive as f64 / trials as f64;
        assert!((agg_rate - 0.3).abs() < 0.03, "aggressive rate {}", agg_rate);
    }

    #[test]
    fn test_strategy_keep_takes_random_branch_forty_percent() {
        let strategy = UnpredictableStrategy::default();
        let roll = DiceRoll::new(&[2, 6, 3, 6, 1], 1).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let trials = 5_000;
        let mut random = 0;
        for _ in 0..trials {
            let (branch, decision) = strategy.keep_with_branch(&roll, &ScoreCategory::ALL, &mut rng);
            if branch == UnpredictableBranch::Random {
                random += 1;
                assert!((1..=3).contains(&decision.dice_to_keep.len()));
            } else {
                let aggressive = AggressiveStrategy::keep(&roll, &ScoreCategory::ALL);
                let prudent = PrudentStrategy::keep(&roll, &ScoreCategory::ALL);
                assert!(decision == aggressive || decision == prudent);
            }
        }
        let rate = random as f64 / trials as f64;
        assert!((rate - RANDOM_KEEP_CHANCE).abs() < 0.03, "random rate {}", rate);
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let strategy = UnpredictableStrategy::default();
        let roll = DiceRoll::new(&[2, 6, 3, 6, 1], 1).unwrap();

        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| strategy.choose_keep(&roll, &ScoreCategory::ALL, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn test_random_keep_size() {
        let strategy = UnpredictableStrategy {
            random_keep_chance: 1.0,
            random_category_chance: 1.0,
        };
        let roll = DiceRoll::new(&[2, 6, 3, 6, 1], 2).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let decision = strategy.choose_keep(&roll, &ScoreCategory::ALL, &mut rng);
            assert!((1..=3).contains(&decision.dice_to_keep.len()));
            assert!(is_sub_multiset(&decision.dice_to_keep, roll.dice()));
        }
    }

    #[test]
    fn test_random_category_stays_available() {
        let strategy = UnpredictableStrategy {
            random_keep_chance: 1.0,
            random_category_chance: 1.0,
        };
        let available = [ScoreCategory::Twos, ScoreCategory::Yams, ScoreCategory::Chance];
        let mut rng = StdRng::seed_from_u64(8);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            let choice = strategy.choose_category(&[1, 1, 2, 3, 4], &available, &mut rng).unwrap();
            assert!(available.contains(&choice.category));
            seen.insert(choice.category);
        }
        assert_eq!(seen.len(), available.len());
    }

    #[test]
    fn test_never_random_delegates() {
        let strategy = UnpredictableStrategy {
            random_keep_chance: 0.0,
            random_category_chance: 0.0,
        };
        let roll = DiceRoll::new(&[6, 6, 6, 2, 2], 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let decision = strategy.choose_keep(&roll, &ScoreCategory::ALL, &mut rng);
            let aggressive = AggressiveStrategy::keep(&roll, &ScoreCategory::ALL);
            let prudent = PrudentStrategy::keep(&roll, &ScoreCategory::ALL);
            assert!(decision == aggressive || decision == prudent);
        }
    }
}
