//! 遊戲常量定義

// ============================================================================
// 骰子規則常量
// ============================================================================

pub const DICE_COUNT: usize = 5;        // 每次擲骰的骰子數
pub const FACE_MIN: u8 = 1;             // 骰面最小值
pub const FACE_MAX: u8 = 6;             // 骰面最大值
pub const FACE_COUNT: usize = 6;        // 骰面種類數
pub const MAX_ROLLS: u8 = 3;            // 每回合最多擲骰次數

// ============================================================================
// 計分常量
// ============================================================================

pub const CATEGORY_COUNT: usize = 13;   // 計分格數量（上半區 6 + 下半區 7）
pub const UPPER_COUNT: usize = 6;       // 上半區計分格數

pub const FULL_HOUSE_SCORE: u16 = 25;
pub const SMALL_STRAIGHT_SCORE: u16 = 30;
pub const LARGE_STRAIGHT_SCORE: u16 = 40;
pub const YAMS_SCORE: u16 = 50;

pub const UPPER_BONUS_THRESHOLD: u16 = 63;  // 上半區獎勵門檻
pub const UPPER_BONUS_VALUE: u16 = 35;      // 上半區獎勵分數

// ============================================================================
// AI 思考時間常量
// ============================================================================

pub const THINKING_JITTER_MS: u64 = 250;    // 思考時間隨機浮動上限
