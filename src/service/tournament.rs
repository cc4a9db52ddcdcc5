//! 批次對戰
//!
//! 關閉思考延遲，以同步決策跑完整局，並用 rayon 平行跑多局。
//! 第 i 局使用種子 `base_seed + i`，結果與執行緒數無關。

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::ai::{AIPersonalityConfig, DecisionEngine, PersonalityId};
use crate::config::ThinkingConfig;
use crate::error::{EngineError, Result};
use crate::game::{DiceRoll, ScoreCategory, DICE_COUNT, YAMS_SCORE};

use super::state::{TableState, TurnReport};

/// 同步跑一個回合：擲骰、依決策保留重擲、計分
pub fn play_turn(table: &mut TableState, engine: &mut DecisionEngine) -> Result<TurnReport> {
    let player_id = table
        .current_seat()
        .map(|s| s.player_id.clone())
        .ok_or_else(|| EngineError::InvalidState("table has no players".to_string()))?;
    let available = table.available_categories();

    let mut roll = table.roll(&[])?;
    while !roll.is_final() {
        let decision = engine.plan_keep(&roll, &available)?;
        // 全部保留視為停手
        if decision.dice_to_keep.len() == DICE_COUNT {
            break;
        }
        roll = table.roll(&decision.dice_to_keep)?;
    }

    score_roll(table, engine, &roll, &available, player_id)
}

fn score_roll(
    table: &mut TableState,
    engine: &mut DecisionEngine,
    roll: &DiceRoll,
    available: &[ScoreCategory],
    player_id: String,
) -> Result<TurnReport> {
    let decision = engine.plan_category(roll.dice(), available)?;
    let category = decision
        .category_to_score
        .ok_or_else(|| EngineError::InvalidState("category decision without category".to_string()))?;
    let score = table.commit(category)?;
    Ok(TurnReport {
        player_id,
        rolls: roll.roll_number(),
        dice: *roll.dice(),
        category,
        score,
    })
}

/// 單局結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub seed: u64,
    /// 各座位總分
    pub scores: Vec<u16>,
    /// 各座位拿到 50 分 Yams 的次數
    pub yams: Vec<u32>,
    /// 勝者座位（同分取座位較前者）
    pub winner: usize,
}

/// 跑完一整局
///
/// 牌桌用 `seed`，第 k 個座位的引擎用 `seed + k + 1`。
pub fn play_game(personalities: &[PersonalityId], seed: u64) -> Result<GameResult> {
    if personalities.is_empty() {
        return Err(EngineError::InvalidInput("a game needs at least one player".to_string()));
    }

    let players: Vec<(String, PersonalityId)> = personalities
        .iter()
        .enumerate()
        .map(|(i, p)| (format!("{}-{}", p.name(), i), *p))
        .collect();
    let mut table = TableState::new(seed, &players);
    let mut engines: Vec<DecisionEngine> = personalities
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64 + 1));
            DecisionEngine::new(AIPersonalityConfig::from_id(*p), rng)
                .with_thinking(ThinkingConfig::disabled())
        })
        .collect();
    let mut yams = vec![0u32; personalities.len()];

    while !table.is_over() {
        let seat = table.current;
        let report = play_turn(&mut table, &mut engines[seat])?;
        if report.category == ScoreCategory::Yams && report.score == YAMS_SCORE {
            yams[seat] += 1;
        }
    }

    let scores: Vec<u16> = table.seats.iter().map(|s| s.card.total()).collect();
    let winner = table.leader().unwrap_or(0);
    debug!(seed, ?scores, winner, "Game finished");

    Ok(GameResult {
        seed,
        scores,
        yams,
        winner,
    })
}

/// 單一座位的累計統計
#[derive(Clone, Debug, PartialEq)]
pub struct SeatStats {
    pub personality: PersonalityId,
    pub games: usize,
    pub total_score: u64,
    pub best_score: u16,
    pub wins: usize,
    pub yams: u32,
}

impl SeatStats {
    fn new(personality: PersonalityId) -> Self {
        Self {
            personality,
            games: 0,
            total_score: 0,
            best_score: 0,
            wins: 0,
            yams: 0,
        }
    }

    pub fn average_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games as f64
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TournamentSummary {
    pub games: usize,
    pub seats: Vec<SeatStats>,
}

/// 平行跑 `games` 局並彙總
pub fn run_tournament(
    personalities: &[PersonalityId],
    games: usize,
    base_seed: u64,
) -> Result<TournamentSummary> {
    let results: Vec<GameResult> = (0..games)
        .into_par_iter()
        .map(|i| play_game(personalities, base_seed.wrapping_add(i as u64)))
        .collect::<Result<Vec<_>>>()?;

    let mut seats: Vec<SeatStats> = personalities.iter().map(|p| SeatStats::new(*p)).collect();
    for result in &results {
        for (k, stats) in seats.iter_mut().enumerate() {
            let score = result.scores[k];
            stats.games += 1;
            stats.total_score += u64::from(score);
            stats.best_score = stats.best_score.max(score);
            stats.yams += result.yams[k];
            if result.winner == k {
                stats.wins += 1;
            }
        }
    }

    info!(games, seats = seats.len(), "Tournament finished");
    Ok(TournamentSummary { games, seats })
}

// ============================================================================
// 單元測試
// ============================================================================
