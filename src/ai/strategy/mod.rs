//! 策略模組
//!
//! 每種個性一個實作，建構引擎時選定一次：
//! - `aggressive`: 追 Yams 與高分組合
//! - `prudent`: 優先上半區，穩定得分
//! - `unpredictable`: 隨機分支，混合前兩者
//! - `perfect`: 期望值近似的啟發式
//!
//! 只有 Unpredictable 會使用隨機來源，其餘策略對相同輸入結果固定。

use rand::RngCore;

use super::decision::{AIDecision, CategoryChoice};
use super::personality::PersonalityId;
use crate::game::{Dice, DiceRoll, ScoreCategory};

pub mod aggressive;
pub mod perfect;
pub mod prudent;
pub mod unpredictable;

pub use aggressive::AggressiveStrategy;
pub use perfect::PerfectStrategy;
pub use prudent::PrudentStrategy;
pub use unpredictable::{UnpredictableBranch, UnpredictableStrategy};

/// 個性策略
pub trait Strategy: Send + Sync {
    fn personality(&self) -> PersonalityId;

    /// 決定重擲前要保留的骰子
    fn choose_keep(
        &self,
        roll: &DiceRoll,
        available: &[ScoreCategory],
        rng: &mut dyn RngCore,
    ) -> AIDecision;

    /// 決定回合結束時的計分格；`available` 為空時回傳 None
    fn choose_category(
        &self,
        dice: &Dice,
        available: &[ScoreCategory],
        rng: &mut dyn RngCore,
    ) -> Option<CategoryChoice>;
}

/// 依個性建立策略
pub fn strategy_for(id: PersonalityId) -> Box<dyn Strategy> {
    match id {
        PersonalityId::Aggressive => Box::new(AggressiveStrategy),
        PersonalityId::Prudent => Box::new(PrudentStrategy),
        PersonalityId::Unpredictable => Box::new(UnpredictableStrategy::default()),
        PersonalityId::Perfect => Box::new(PerfectStrategy),
    }
}

#[inline]
pub(crate) fn is_open(available: &[ScoreCategory], category: ScoreCategory) -> bool {
    available.contains(&category)
}

// ============================================================================
// 單元測試
// ============================================================================
