//! 計分引擎
//!
//! 依骰型計算單一計分格或全部計分格的可得分數。所有函數皆為全函數，
//! 不符合條件的計分格回傳 0。
//!
//! 葫蘆只在 `[3,2]` 成形時計分；骰型判定把 `[2,2]` 也視為可能，那只用於保留決策。

use super::constants::{
    CATEGORY_COUNT, FULL_HOUSE_SCORE, LARGE_STRAIGHT_SCORE, SMALL_STRAIGHT_SCORE, YAMS_SCORE,
};
use super::dice::sum;
use super::patterns::{count_by_face, full_house, n_of_a_kind, FaceCounts};
use super::rules::ScoreCategory;

/// 小順子的三種組合
const SMALL_STRAIGHTS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];

/// 大順子的兩種組合
const LARGE_STRAIGHTS: [[u8; 5]; 2] = [[1, 2, 3, 4, 5], [2, 3, 4, 5, 6]];

fn contains_faces(counts: &FaceCounts, faces: &[u8]) -> bool {
    faces.iter().all(|&f| counts[f as usize] > 0)
}

/// 檢查是否為小順子（任意 4 連）
pub fn is_small_straight(dice: &[u8]) -> bool {
    let counts = count_by_face(dice);
    SMALL_STRAIGHTS.iter().any(|s| contains_faces(&counts, s))
}

/// 檢查是否為大順子（1-5 或 2-6）
pub fn is_large_straight(dice: &[u8]) -> bool {
    let counts = count_by_face(dice);
    LARGE_STRAIGHTS.iter().any(|s| contains_faces(&counts, s))
}

/// 五顆骰子點數全部相同
pub fn is_yams(dice: &[u8]) -> bool {
    !dice.is_empty() && n_of_a_kind(dice, dice.len() as u8).is_some()
}

/// 計算單一計分格的分數
pub fn score_for(category: ScoreCategory, dice: &[u8]) -> u16 {
    match category {
        ScoreCategory::Ones
        | ScoreCategory::Twos
        | ScoreCategory::Threes
        | ScoreCategory::Fours
        | ScoreCategory::Fives
        | ScoreCategory::Sixes => {
            let face = category.upper_face().unwrap_or(0);
            let count = dice.iter().filter(|&&d| d == face).count() as u16;
            face as u16 * count
        }
        ScoreCategory::ThreeOfKind => {
            if n_of_a_kind(dice, 3).is_some() {
                sum(dice)
            } else {
                0
            }
        }
        ScoreCategory::FourOfKind => {
            if n_of_a_kind(dice, 4).is_some() {
                sum(dice)
            } else {
                0
            }
        }
        ScoreCategory::FullHouse => {
            if full_house(dice).complete {
                FULL_HOUSE_SCORE
            } else {
                0
            }
        }
        ScoreCategory::SmallStraight => {
            if is_small_straight(dice) {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        ScoreCategory::LargeStraight => {
            if is_large_straight(dice) {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        ScoreCategory::Yams => {
            if is_yams(dice) {
                YAMS_SCORE
            } else {
                0
            }
        }
        ScoreCategory::Chance => sum(dice),
    }
}

/// 所有計分格的分數（索引與 `ScoreCategory::to_index` 一致）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreTable {
    scores: [u16; CATEGORY_COUNT],
}

impl ScoreTable {
    pub fn get(&self, category: ScoreCategory) -> u16 {
        self.scores[category.to_index()]
    }

    /// 依計分表順序列出 (計分格, 分數)
    pub fn iter(&self) -> impl Iterator<Item = (ScoreCategory, u16)> + '_ {
        ScoreCategory::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

/// 計算全部計分格的分數
pub fn score_all(dice: &[u8]) -> ScoreTable {
    let mut scores = [0u16; CATEGORY_COUNT];
    for category in ScoreCategory::ALL {
        scores[category.to_index()] = score_for(category, dice);
    }
    ScoreTable { scores }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rules::is_valid_score;
    use proptest::prelude::*;

    #[test]
    fn test_upper_section() {
        let dice = [4, 4, 4, 1, 2];
        assert_eq!(score_for(ScoreCategory::Fours, &dice), 12);
        assert_eq!(score_for(ScoreCategory::Ones, &dice), 1);
        assert_eq!(score_for(ScoreCategory::Sixes, &dice), 0);
    }

    #[test]
    fn test_three_and_four_of_kind() {
        assert_eq!(score_for(ScoreCategory::ThreeOfKind, &[4, 4, 4, 1, 2]), 15);
        assert_eq!(score_for(ScoreCategory::FourOfKind, &[4, 4, 4, 1, 2]), 0);
        assert_eq!(score_for(ScoreCategory::FourOfKind, &[6, 6, 6, 6, 2]), 26);
        // Yams 也算四條
        assert_eq!(score_for(ScoreCategory::FourOfKind, &[3, 3, 3, 3, 3]), 15);
    }

    #[test]
    fn test_full_house() {
        assert_eq!(score_for(ScoreCategory::FullHouse, &[2, 2, 2, 5, 5]), 25);
        assert_eq!(score_for(ScoreCategory::FullHouse, &[2, 2, 5, 5, 5]), 25);
        // 兩組對子不計分
        assert_eq!(score_for(ScoreCategory::FullHouse, &[2, 2, 5, 5, 1]), 0);
        assert_eq!(score_for(ScoreCategory::FullHouse, &[5, 5, 5, 5, 5]), 0);
    }

    #[test]
    fn test_small_straight() {
        assert_eq!(score_for(ScoreCategory::SmallStraight, &[1, 2, 3, 4, 4]), 30);
        assert_eq!(score_for(ScoreCategory::SmallStraight, &[1, 2, 3, 5, 6]), 0);
        assert_eq!(score_for(ScoreCategory::SmallStraight, &[6, 3, 5, 4, 1]), 30);
        assert_eq!(score_for(ScoreCategory::SmallStraight, &[1, 2, 3, 4, 5]), 30);
    }

    #[test]
    fn test_large_straight() {
        assert_eq!(score_for(ScoreCategory::LargeStraight, &[1, 2, 3, 4, 5]), 40);
        assert_eq!(score_for(ScoreCategory::LargeStraight, &[6, 5, 4, 3, 2]), 40);
        assert_eq!(score_for(ScoreCategory::LargeStraight, &[1, 2, 3, 4, 6]), 0);
    }

    #[test]
    fn test_yams_and_chance() {
        assert_eq!(score_for(ScoreCategory::Yams, &[6, 6, 6, 6, 6]), 50);
        assert_eq!(score_for(ScoreCategory::Yams, &[6, 6, 6, 6, 5]), 0);
        assert_eq!(score_for(ScoreCategory::Chance, &[6, 6, 6, 6, 5]), 29);
        assert_eq!(score_for(ScoreCategory::Chance, &[1, 1, 1, 1, 1]), 5);
    }

    #[test]
    fn test_score_all_matches_score_for() {
        let dice = [3, 3, 3, 5, 5];
        let table = score_all(&dice);
        for (category, score) in table.iter() {
            assert_eq!(score, score_for(category, &dice));
        }
        assert_eq!(table.get(ScoreCategory::FullHouse), 25);
        assert_eq!(table.get(ScoreCategory::ThreeOfKind), 19);
    }

    proptest! {
        #[test]
        fn prop_yams_iff_all_equal(dice in prop::array::uniform5(1u8..=6)) {
            let all_equal = dice.iter().all(|&d| d == dice[0]);
            let expected = if all_equal { 50 } else { 0 };
            prop_assert_eq!(score_for(ScoreCategory::Yams, &dice), expected);
        }

        #[test]
        fn prop_upper_is_face_times_count(dice in prop::array::uniform5(1u8..=6)) {
            for k in 1u8..=6 {
                let category = ScoreCategory::upper_for_face(k).unwrap();
                let count = dice.iter().filter(|&&d| d == k).count() as u16;
                prop_assert_eq!(score_for(category, &dice), k as u16 * count);
            }
        }

        #[test]
        fn prop_scores_respect_validation_rules(dice in prop::array::uniform5(1u8..=6)) {
            for (category, score) in score_all(&dice).iter() {
                prop_assert!(is_valid_score(category, score), "{} scored {}", category, score);
            }
        }

        #[test]
        fn prop_large_straight_implies_small(dice in prop::array::uniform5(1u8..=6)) {
            if score_for(ScoreCategory::LargeStraight, &dice) > 0 {
                prop_assert_eq!(score_for(ScoreCategory::SmallStraight, &dice), 30);
            }
        }
    }
}
