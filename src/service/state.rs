//! 牌桌狀態管理
//!
//! 引擎外部的協作者：擲骰器、每位玩家的計分表與回合流程。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::PersonalityId;
use crate::error::{EngineError, Result};
use crate::game::{
    is_sub_multiset, score_for, upper_bonus, Dice, DiceRoll, ScoreCategory, CATEGORY_COUNT,
    DICE_COUNT, FACE_MAX, FACE_MIN, MAX_ROLLS,
};

/// 單一玩家的計分表
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scorecard {
    scores: [Option<u16>; CATEGORY_COUNT],
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, category: ScoreCategory) -> bool {
        self.scores[category.to_index()].is_none()
    }

    pub fn score(&self, category: ScoreCategory) -> Option<u16> {
        self.scores[category.to_index()]
    }

    /// 尚未計分的計分格（計分表順序）
    pub fn available_categories(&self) -> Vec<ScoreCategory> {
        ScoreCategory::ALL
            .iter()
            .copied()
            .filter(|&c| self.is_open(c))
            .collect()
    }

    /// 以最終骰子計分，已計分的格回傳錯誤
    pub fn commit(&mut self, category: ScoreCategory, dice: &Dice) -> Result<u16> {
        if !self.is_open(category) {
            return Err(EngineError::InvalidState(format!(
                "category {} already scored",
                category
            )));
        }
        let score = score_for(category, dice);
        self.scores[category.to_index()] = Some(score);
        Ok(score)
    }

    pub fn upper_total(&self) -> u16 {
        ScoreCategory::UPPER.iter().filter_map(|&c| self.score(c)).sum()
    }

    pub fn bonus(&self) -> u16 {
        upper_bonus(self.upper_total())
    }

    pub fn lower_total(&self) -> u16 {
        ScoreCategory::LOWER.iter().filter_map(|&c| self.score(c)).sum()
    }

    pub fn total(&self) -> u16 {
        self.upper_total() + self.bonus() + self.lower_total()
    }

    pub fn is_complete(&self) -> bool {
        self.scores.iter().all(Option::is_some)
    }
}

/// 單一回合的結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player_id: String,
    pub rolls: u8,
    pub dice: Dice,
    pub category: ScoreCategory,
    pub score: u16,
}

/// 牌桌座位
#[derive(Clone, Debug)]
pub struct Seat {
    pub player_id: String,
    pub personality: PersonalityId,
    pub card: Scorecard,
}

/// 牌桌狀態
pub struct TableState {
    pub rng: StdRng,
    pub seats: Vec<Seat>,
    /// 目前輪到的座位
    pub current: usize,
    /// 目前回合（1..=13）
    pub round: usize,
    pub dice: Dice,
    /// 本回合已擲骰次數（0 = 尚未擲骰）
    pub roll_number: u8,
}

impl TableState {
    pub fn new(seed: u64, players: &[(String, PersonalityId)]) -> Self {
        let seats = players
            .iter()
            .map(|(player_id, personality)| Seat {
                player_id: player_id.clone(),
                personality: *personality,
                card: Scorecard::new(),
            })
            .collect();

        Self {
            rng: StdRng::seed_from_u64(seed),
            seats,
            current: 0,
            round: 1,
            dice: [FACE_MIN; DICE_COUNT],
            roll_number: 0,
        }
    }

    pub fn current_seat(&self) -> Option<&Seat> {
        self.seats.get(self.current)
    }

    pub fn available_categories(&self) -> Vec<ScoreCategory> {
        self.current_seat()
            .map(|s| s.card.available_categories())
            .unwrap_or_default()
    }

    /// 擲骰：保留 `keep`，其餘重擲
    ///
    /// 第一擲必須不保留任何骰子。
    pub fn roll(&mut self, keep: &[u8]) -> Result<DiceRoll> {
        if self.is_over() {
            return Err(EngineError::InvalidState("game is over".to_string()));
        }
        if self.roll_number >= MAX_ROLLS {
            return Err(EngineError::InvalidState(format!(
                "already rolled {} times this turn",
                MAX_ROLLS
            )));
        }
        if self.roll_number == 0 && !keep.is_empty() {
            return Err(EngineError::InvalidInput(
                "cannot keep dice before the first roll".to_string(),
            ));
        }
        if !is_sub_multiset(keep, &self.dice) {
            return Err(EngineError::InvalidInput(format!(
                "kept dice {:?} not part of {:?}",
                keep, self.dice
            )));
        }

        let mut next = [FACE_MIN; DICE_COUNT];
        for (i, slot) in next.iter_mut().enumerate() {
            *slot = match keep.get(i) {
                Some(&kept) => kept,
                None => self.rng.gen_range(FACE_MIN..=FACE_MAX),
            };
        }
        self.dice = next;
        self.roll_number += 1;
        DiceRoll::new(&self.dice, self.roll_number)
    }

    /// 以目前骰子為當前玩家計分，並輪到下一位
    pub fn commit(&mut self, category: ScoreCategory) -> Result<u16> {
        if self.roll_number == 0 {
            return Err(EngineError::InvalidState(
                "cannot score before rolling".to_string(),
            ));
        }
        let dice = self.dice;
        let seat = self
            .seats
            .get_mut(self.current)
            .ok_or_else(|| EngineError::InvalidState("table has no players".to_string()))?;
        let score = seat.card.commit(category, &dice)?;

        self.roll_number = 0;
        self.current += 1;
        if self.current >= self.seats.len() {
            self.current = 0;
            self.round += 1;
        }
        Ok(score)
    }

    pub fn is_over(&self) -> bool {
        self.seats.iter().all(|s| s.card.is_complete())
    }

    /// 各玩家總分（座位順序）
    pub fn standings(&self) -> Vec<(String, u16)> {
        self.seats
            .iter()
            .map(|s| (s.player_id.clone(), s.card.total()))
            .collect()
    }

    /// 最高分的座位（同分取座位較前者）
    pub fn leader(&self) -> Option<usize> {
        self.seats
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, u16)>, (i, s)| {
                let total = s.card.total();
                match best {
                    Some((_, t)) if t >= total => best,
                    _ => Some((i, total)),
                }
            })
            .map(|(i, _)| i)
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableState {
        TableState::new(
            3,
            &[
                ("alice".to_string(), PersonalityId::Aggressive),
                ("bob".to_string(), PersonalityId::Perfect),
            ],
        )
    }

    #[test]
    fn test_scorecard_commit_and_totals() {
        let mut card = Scorecard::new();
        assert_eq!(card.available_categories().len(), 13);
        assert_eq!(card.commit(ScoreCategory::Sixes, &[6, 6, 6, 6, 1]).unwrap(), 24);
        assert_eq!(card.commit(ScoreCategory::Fives, &[5, 5, 5, 5, 1]).unwrap(), 20);
        assert_eq!(card.commit(ScoreCategory::Fours, &[4, 4, 4, 4, 1]).unwrap(), 16);
        assert_eq!(card.upper_total(), 60);
        assert_eq!(card.bonus(), 0);
        card.commit(ScoreCategory::Threes, &[3, 2, 1, 1, 1]).unwrap();
        assert_eq!(card.upper_total(), 63);
        assert_eq!(card.bonus(), 35);
        card.commit(ScoreCategory::Chance, &[6, 6, 6, 6, 6]).unwrap();
        assert_eq!(card.total(), 63 + 35 + 30);
        assert!(!card.available_categories().contains(&ScoreCategory::Chance));
    }

    #[test]
    fn test_scorecard_rejects_double_commit() {
        let mut card = Scorecard::new();
        card.commit(ScoreCategory::Yams, &[1, 2, 3, 4, 5]).unwrap();
        let err = card.commit(ScoreCategory::Yams, &[1, 1, 1, 1, 1]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn test_roll_keeps_dice() {
        let mut t = table();
        let first = t.roll(&[]).unwrap();
        assert_eq!(first.roll_number(), 1);
        let keep = vec![first.dice()[0], first.dice()[1]];
        let second = t.roll(&keep).unwrap();
        assert_eq!(second.roll_number(), 2);
        assert_eq!(&second.dice()[..2], &keep[..]);
    }

    #[test]
    fn test_roll_limits() {
        let mut t = table();
        assert!(t.roll(&[1]).is_err());
        t.roll(&[]).unwrap();
        t.roll(&[]).unwrap();
        t.roll(&[]).unwrap();
        assert!(matches!(t.roll(&[]).unwrap_err(), EngineError::InvalidState(_)));
    }

    #[test]
    fn test_roll_rejects_foreign_keep() {
        let mut t = table();
        let roll = t.roll(&[]).unwrap();
        let missing = (1..=6).find(|f| !roll.dice().contains(f)).unwrap();
        assert!(matches!(t.roll(&[missing]).unwrap_err(), EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_commit_advances_turn() {
        let mut t = table();
        assert!(t.commit(ScoreCategory::Chance).is_err());
        t.roll(&[]).unwrap();
        t.commit(ScoreCategory::Chance).unwrap();
        assert_eq!(t.current, 1);
        assert_eq!(t.roll_number, 0);
        t.roll(&[]).unwrap();
        t.commit(ScoreCategory::Chance).unwrap();
        assert_eq!(t.current, 0);
        assert_eq!(t.round, 2);
        assert_eq!(t.available_categories().len(), 12);
    }

    #[test]
    fn test_game_over_after_all_rounds() {
        let mut t = table();
        for _ in 0..13 {
            for _ in 0..2 {
                t.roll(&[]).unwrap();
                let category = t.available_categories()[0];
                t.commit(category).unwrap();
            }
        }
        assert!(t.is_over());
        assert!(t.roll(&[]).is_err());
        assert!(t.leader().is_some());
        assert_eq!(t.standings().len(), 2);
    }
}
