//! 決策引擎註冊表
//!
//! 每位 AI 玩家一個引擎，以 `tokio::sync::Mutex` 包住：
//! 同一玩家的決策依呼叫順序排隊，不同玩家可同時思考。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::ai::{AIDecision, DecisionEngine};
use crate::error::{EngineError, Result};
use crate::game::{DiceRoll, ScoreCategory, DICE_COUNT};

use super::state::{TableState, TurnReport};

pub type SharedEngine = Arc<Mutex<DecisionEngine>>;

#[derive(Default)]
pub struct EngineRegistry {
    engines: DashMap<String, SharedEngine>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 註冊（或取代）玩家的引擎
    pub fn register(&self, player_id: impl Into<String>, engine: DecisionEngine) -> SharedEngine {
        let player_id = player_id.into();
        info!(
            player = %player_id,
            personality = engine.personality_id().name(),
            "AI player registered"
        );
        let shared = Arc::new(Mutex::new(engine));
        self.engines.insert(player_id, shared.clone());
        shared
    }

    pub fn get(&self, player_id: &str) -> Option<SharedEngine> {
        self.engines.get(player_id).map(|e| e.value().clone())
    }

    pub fn remove(&self, player_id: &str) -> Option<SharedEngine> {
        self.engines.remove(player_id).map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    fn engine(&self, player_id: &str) -> Result<SharedEngine> {
        self.get(player_id)
            .ok_or_else(|| EngineError::InvalidState(format!("no engine for player {}", player_id)))
    }

    pub async fn decide_keep_dice(
        &self,
        player_id: &str,
        roll: &DiceRoll,
        available: &[ScoreCategory],
    ) -> Result<AIDecision> {
        // 先取出 Arc，不跨 await 持有 DashMap 的鎖
        let engine = self.engine(player_id)?;
        let mut engine = engine.lock().await;
        engine.decide_keep_dice(roll, available, player_id).await
    }

    pub async fn decide_category(
        &self,
        player_id: &str,
        dice: &[u8],
        available: &[ScoreCategory],
    ) -> Result<AIDecision> {
        let engine = self.engine(player_id)?;
        let mut engine = engine.lock().await;
        engine.decide_category(dice, available, player_id).await
    }

    /// 以註冊的引擎為目前玩家跑一個回合（含思考延遲）
    pub async fn play_turn(&self, table: &mut TableState) -> Result<TurnReport> {
        let player_id = table
            .current_seat()
            .map(|s| s.player_id.clone())
            .ok_or_else(|| EngineError::InvalidState("table has no players".to_string()))?;
        let available = table.available_categories();

        let mut roll = table.roll(&[])?;
        while !roll.is_final() {
            let decision = self.decide_keep_dice(&player_id, &roll, &available).await?;
            debug!(player = %player_id, kept = ?decision.dice_to_keep, "Keep");
            if decision.dice_to_keep.len() == DICE_COUNT {
                break;
            }
            roll = table.roll(&decision.dice_to_keep)?;
        }

        let decision = self.decide_category(&player_id, roll.dice(), &available).await?;
        let category = decision
            .category_to_score
            .ok_or_else(|| EngineError::InvalidState("category decision without category".to_string()))?;
        let score = table.commit(category)?;
        info!(
            player = %player_id,
            dice = ?roll.dice(),
            category = %category,
            score,
            reasoning = decision.reasoning.as_deref().unwrap_or_default(),
            "Scored"
        );

        Ok(TurnReport {
            player_id,
            rolls: roll.roll_number(),
            dice: *roll.dice(),
            category,
            score,
        })
    }
}

// ============================================================================
// 單元測試
// ============================================================================
