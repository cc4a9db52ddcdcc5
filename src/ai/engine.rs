//! 決策引擎
//!
//! 綁定單一個性，先等待模擬思考時間，再分派給該個性的策略。
//!
//! 思考延遲是唯一的暫停點，使用 `tokio::time::sleep`，可以隨時丟棄 future
//! 或透過 `*_until` 傳入取消信號；取消時不會產生任何決策。

use std::future::Future;
use std::time::Duration;

use rand::rngs::StdRng;
use tracing::debug;

use super::decision::AIDecision;
use super::personality::{AIPersonalityConfig, PersonalityId};
use super::strategy::{strategy_for, Strategy};
use crate::config::ThinkingConfig;
use crate::error::{EngineError, Result};
use crate::game::{is_sub_multiset, validate_dice, DiceRoll, ScoreCategory};

/// 單一 AI 玩家的決策引擎
pub struct DecisionEngine {
    personality: AIPersonalityConfig,
    strategy: Box<dyn Strategy>,
    rng: StdRng,
    thinking: ThinkingConfig,
}

impl DecisionEngine {
    /// 以個性配置與注入的隨機來源建立
    pub fn new(personality: AIPersonalityConfig, rng: StdRng) -> Self {
        let strategy = strategy_for(personality.id);
        debug!(personality = personality.id.name(), "Decision engine created");
        Self {
            personality,
            strategy,
            rng,
            thinking: ThinkingConfig::default(),
        }
    }

    /// 以個性名稱建立，未知名稱回退為 Prudent
    pub fn from_name(name: &str, rng: StdRng) -> Self {
        Self::new(AIPersonalityConfig::from_name(name), rng)
    }

    pub fn with_thinking(mut self, thinking: ThinkingConfig) -> Self {
        self.thinking = thinking;
        self
    }

    pub fn personality(&self) -> &AIPersonalityConfig {
        &self.personality
    }

    pub fn personality_id(&self) -> PersonalityId {
        self.personality.id
    }

    /// 下一次決策的思考延遲（不推進隨機來源）
    pub fn thinking_delay(&self) -> Duration {
        self.delay_with(&mut self.rng.clone())
    }

    fn delay_with(&self, rng: &mut StdRng) -> Duration {
        if !self.thinking.enabled {
            return Duration::ZERO;
        }
        self.personality
            .thinking_delay(rng, self.thinking.jitter_ms, self.thinking.time_scale)
    }

    // ========================================================================
    // 同步決策（無延遲）
    // ========================================================================

    /// 決定保留哪些骰子
    pub fn plan_keep(&mut self, roll: &DiceRoll, available: &[ScoreCategory]) -> Result<AIDecision> {
        let decision = self.strategy.choose_keep(roll, available, &mut self.rng);
        if !is_sub_multiset(&decision.dice_to_keep, roll.dice()) {
            return Err(EngineError::InvalidState(format!(
                "{} kept {:?}, not part of roll {:?}",
                self.personality.id.name(),
                decision.dice_to_keep,
                roll.dice()
            )));
        }
        debug!(
            personality = self.personality.id.name(),
            roll = roll.roll_number(),
            dice = ?roll.dice(),
            kept = ?decision.dice_to_keep,
            "Keep decision"
        );
        Ok(decision)
    }

    /// 決定計分格
    pub fn plan_category(&mut self, dice: &[u8], available: &[ScoreCategory]) -> Result<AIDecision> {
        let dice = validate_dice(dice)?;
        if available.is_empty() {
            return Err(EngineError::InvalidState(
                "no categories left to score".to_string(),
            ));
        }
        let choice = self
            .strategy
            .choose_category(&dice, available, &mut self.rng)
            .ok_or_else(|| EngineError::InvalidState("no category chosen".to_string()))?;
        if !available.contains(&choice.category) {
            return Err(EngineError::InvalidState(format!(
                "{} chose unavailable category {}",
                self.personality.id.name(),
                choice.category
            )));
        }
        debug!(
            personality = self.personality.id.name(),
            dice = ?dice,
            category = %choice.category,
            "Category decision"
        );
        Ok(AIDecision::score(&dice, choice))
    }

    // ========================================================================
    // 非同步決策（含思考延遲）
    // ========================================================================

    /// 等待思考時間後決定保留的骰子
    ///
    /// `player_id` 保留給未來依玩家調整，目前只用於日誌。
    pub async fn decide_keep_dice(
        &mut self,
        roll: &DiceRoll,
        available: &[ScoreCategory],
        player_id: &str,
    ) -> Result<AIDecision> {
        self.think(player_id).await;
        self.plan_keep(roll, available)
    }

    /// 等待思考時間後決定計分格
    pub async fn decide_category(
        &mut self,
        dice: &[u8],
        available: &[ScoreCategory],
        player_id: &str,
    ) -> Result<AIDecision> {
        validate_dice(dice)?;
        if available.is_empty() {
            return Err(EngineError::InvalidState(
                "no categories left to score".to_string(),
            ));
        }
        self.think(player_id).await;
        self.plan_category(dice, available)
    }

    /// 可取消版本：`cancel` 先完成時回傳 `Ok(None)`
    pub async fn decide_keep_dice_until<C>(
        &mut self,
        roll: &DiceRoll,
        available: &[ScoreCategory],
        player_id: &str,
        cancel: C,
    ) -> Result<Option<AIDecision>>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;

            _ = cancel => {
                debug!(player = player_id, "Keep decision cancelled");
                Ok(None)
            }

            decision = self.decide_keep_dice(roll, available, player_id) => decision.map(Some),
        }
    }

    /// 可取消版本：`cancel` 先完成時回傳 `Ok(None)`
    pub async fn decide_category_until<C>(
        &mut self,
        dice: &[u8],
        available: &[ScoreCategory],
        player_id: &str,
        cancel: C,
    ) -> Result<Option<AIDecision>>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;

            _ = cancel => {
                debug!(player = player_id, "Category decision cancelled");
                Ok(None)
            }

            decision = self.decide_category(dice, available, player_id) => decision.map(Some),
        }
    }

    /// 等待思考時間
    ///
    /// 抖動從隨機來源的副本抽取，等待結束後才寫回；
    /// 等待中被取消時引擎狀態不變。
    async fn think(&mut self, player_id: &str) {
        let mut rng = self.rng.clone();
        let delay = self.delay_with(&mut rng);
        if !delay.is_zero() {
            debug!(
                player = player_id,
                personality = self.personality.id.name(),
                delay_ms = delay.as_millis() as u64,
                "Thinking"
            );
            tokio::time::sleep(delay).await;
        }
        self.rng = rng;
    }
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("personality", &self.personality.id)
            .field("thinking", &self.thinking)
            .finish()
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tokio::time::Instant;

    fn engine(name: &str) -> DecisionEngine {
        DecisionEngine::from_name(name, StdRng::seed_from_u64(1))
    }

    fn roll(dice: [u8; 5], n: u8) -> DiceRoll {
        DiceRoll::new(&dice, n).unwrap()
    }

    #[test]
    fn test_unknown_personality_is_prudent() {
        assert_eq!(engine("chaotic-evil").personality_id(), PersonalityId::Prudent);
        assert_eq!(engine("perfect").personality_id(), PersonalityId::Perfect);
    }

    #[test]
    fn test_plan_category_empty_available() {
        let err = engine("perfect").plan_category(&[1, 2, 3, 4, 5], &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn test_plan_category_malformed_dice() {
        let err = engine("perfect")
            .plan_category(&[1, 2, 3, 4], &ScoreCategory::ALL)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        let err = engine("perfect")
            .plan_category(&[1, 2, 3, 4, 9], &ScoreCategory::ALL)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn test_plan_category_returns_available() {
        let available = [ScoreCategory::Fours, ScoreCategory::Chance];
        let decision = engine("prudent").plan_category(&[4, 4, 4, 1, 2], &available).unwrap();
        assert_eq!(decision.category_to_score, Some(ScoreCategory::Fours));
        assert_eq!(decision.dice_to_keep, vec![1, 2, 4, 4, 4]);
    }

    #[test]
    fn test_disabled_thinking_has_no_delay() {
        let e = engine("perfect").with_thinking(ThinkingConfig::disabled());
        assert_eq!(e.thinking_delay(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decide_keep_waits_thinking_time() {
        let mut e = engine("aggressive");
        let start = Instant::now();
        let decision = e
            .decide_keep_dice(&roll([6, 6, 6, 2, 2], 1), &ScoreCategory::ALL, "p1")
            .await
            .unwrap();
        let elapsed = start.elapsed();
        assert_eq!(decision.dice_to_keep, vec![6, 6, 6]);
        // Aggressive: 800ms ± 250ms
        assert!(elapsed >= Duration::from_millis(550), "elapsed {:?}", elapsed);
        assert!(elapsed <= Duration::from_millis(1050), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decide_category_rejects_before_waiting() {
        let mut e = engine("prudent");
        let start = Instant::now();
        let err = e.decide_category(&[1, 2, 3, 4, 5], &[], "p1").await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_decision() {
        let mut e = engine("perfect");
        let cancel = tokio::time::sleep(Duration::from_millis(100));
        let result = e
            .decide_category_until(&[1, 2, 3, 4, 5], &ScoreCategory::ALL, "p1", cancel)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_signal_after_decision_is_ignored() {
        let mut e = engine("perfect");
        let (_tx, rx) = tokio::sync::oneshot::channel::<()>();
        let cancel = async move {
            let _ = rx.await;
        };
        // 不送出取消；_tx 存活直到決策完成
        let result = e
            .decide_keep_dice_until(&roll([5, 5, 5, 5, 1], 2), &ScoreCategory::ALL, "p1", cancel)
            .await
            .unwrap();
        assert_eq!(result.unwrap().dice_to_keep, vec![5, 5, 5, 5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_usable_after_cancel() {
        let mut e = engine("prudent");
        let cancelled = e
            .decide_keep_dice_until(
                &roll([1, 1, 2, 3, 4], 1),
                &ScoreCategory::ALL,
                "p1",
                std::future::ready(()),
            )
            .await
            .unwrap();
        assert!(cancelled.is_none());

        let decision = e
            .decide_keep_dice(&roll([1, 1, 2, 3, 4], 1), &ScoreCategory::ALL, "p1")
            .await
            .unwrap();
        assert_eq!(decision.dice_to_keep, vec![1, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_call_leaves_no_trace() {
        let roll = roll([3, 1, 6, 3, 2], 1);
        let mut cancelled = DecisionEngine::from_name("unpredictable", StdRng::seed_from_u64(5));
        let mut untouched = DecisionEngine::from_name("unpredictable", StdRng::seed_from_u64(5));

        let result = cancelled
            .decide_keep_dice_until(
                &roll,
                &ScoreCategory::ALL,
                "p1",
                tokio::time::sleep(Duration::from_millis(10)),
            )
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(cancelled.thinking_delay(), untouched.thinking_delay());

        for _ in 0..10 {
            let a = cancelled.decide_keep_dice(&roll, &ScoreCategory::ALL, "p1").await.unwrap();
            let b = untouched.decide_keep_dice(&roll, &ScoreCategory::ALL, "p1").await.unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_thinking_delay_preview_is_stable() {
        let e = engine("prudent");
        let first = e.thinking_delay();
        assert_eq!(e.thinking_delay(), first);
        assert!(first >= Duration::from_millis(1250) && first <= Duration::from_millis(1750));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_same_unpredictable_decisions() {
        let run = || async {
            let mut e = DecisionEngine::from_name("unpredictable", StdRng::seed_from_u64(77));
            let mut out = Vec::new();
            for _ in 0..20 {
                out.push(
                    e.decide_keep_dice(&roll([3, 1, 6, 3, 2], 1), &ScoreCategory::ALL, "p")
                        .await
                        .unwrap(),
                );
            }
            out
        };
        assert_eq!(run().await, run().await);
    }
}
