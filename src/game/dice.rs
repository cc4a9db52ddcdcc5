//! 骰子與擲骰定義

use serde::{Deserialize, Serialize};

use super::constants::{DICE_COUNT, FACE_MAX, FACE_MIN, MAX_ROLLS};
use crate::error::{EngineError, Result};

/// 五顆骰子的點數
pub type Dice = [u8; DICE_COUNT];

/// 驗證骰子（長度必須為 5，點數在 1..=6）
pub fn validate_dice(dice: &[u8]) -> Result<Dice> {
    let dice: Dice = dice.try_into().map_err(|_| {
        EngineError::InvalidInput(format!(
            "expected {} dice, got {}",
            DICE_COUNT,
            dice.len()
        ))
    })?;
    if let Some(face) = dice.iter().find(|&&d| !(FACE_MIN..=FACE_MAX).contains(&d)) {
        return Err(EngineError::InvalidInput(format!(
            "die face {} outside {}..={}",
            face, FACE_MIN, FACE_MAX
        )));
    }
    Ok(dice)
}

/// 單次擲骰結果（由外部擲骰器產生，不可變）
///
/// 反序列化同樣經過 `DiceRoll::new` 驗證。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDiceRoll")]
pub struct DiceRoll {
    dice: Dice,
    roll_number: u8,
}

#[derive(Deserialize)]
struct RawDiceRoll {
    dice: Vec<u8>,
    roll_number: u8,
}

impl TryFrom<RawDiceRoll> for DiceRoll {
    type Error = EngineError;

    fn try_from(raw: RawDiceRoll) -> Result<Self> {
        DiceRoll::new(&raw.dice, raw.roll_number)
    }
}

impl DiceRoll {
    pub fn new(dice: &[u8], roll_number: u8) -> Result<Self> {
        let dice = validate_dice(dice)?;
        if !(1..=MAX_ROLLS).contains(&roll_number) {
            return Err(EngineError::InvalidInput(format!(
                "roll number {} outside 1..={}",
                roll_number, MAX_ROLLS
            )));
        }
        Ok(Self { dice, roll_number })
    }

    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    pub fn roll_number(&self) -> u8 {
        self.roll_number
    }

    /// 是否為本回合最後一次擲骰
    pub fn is_final(&self) -> bool {
        self.roll_number == MAX_ROLLS
    }
}

/// 骰子總和
pub fn sum(dice: &[u8]) -> u16 {
    dice.iter().map(|&d| d as u16).sum()
}

/// 取點數最高的 n 顆骰子（由大到小）
pub fn highest(dice: &[u8], n: usize) -> Vec<u8> {
    let mut sorted = dice.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.truncate(n);
    sorted
}

/// 檢查 `kept` 是否為 `dice` 的子多重集（每個點數的數量不超過原骰）
pub fn is_sub_multiset(kept: &[u8], dice: &[u8]) -> bool {
    let mut counts = [0i8; FACE_MAX as usize + 1];
    for &d in dice {
        if let Some(c) = counts.get_mut(d as usize) {
            *c += 1;
        }
    }
    for &k in kept {
        match counts.get_mut(k as usize) {
            Some(c) if *c > 0 => *c -= 1,
            _ => return false,
        }
    }
    true
}

// ============================================================================
// 單元測試
// ============================================================================
