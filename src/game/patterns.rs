//! 骰型判定
//!
//! 純函數：N 條、葫蘆、順子、對子
//!
//! 同點數並列時一律從 1 掃到 6，回傳點數最小者，確保結果可重現。

use super::constants::{FACE_COUNT, FACE_MAX, FACE_MIN};

/// 各點數出現次數，索引 1..=6（索引 0 不使用）
pub type FaceCounts = [u8; FACE_COUNT + 1];

/// N 條判定結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindMatch {
    pub face: u8,
    pub count: u8,
    /// 構成 N 條的骰子（`count` 顆 `face`）
    pub dice: Vec<u8>,
}

/// 葫蘆判定結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullHouseMatch {
    pub possible: bool,
    /// 三條 + 對子已成形（嚴格葫蘆）
    pub complete: bool,
    /// 參與組成的骰子（三條與對子，或兩組對子）
    pub dice: Vec<u8>,
}

/// 順子判定結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StraightRun {
    pub run_length: usize,
    /// 最長連續段的點數（由小到大）
    pub run_faces: Vec<u8>,
    pub unique_faces_sorted: Vec<u8>,
}

/// 計算各點數出現次數
pub fn count_by_face(dice: &[u8]) -> FaceCounts {
    let mut counts = [0u8; FACE_COUNT + 1];
    for &d in dice {
        if (FACE_MIN..=FACE_MAX).contains(&d) {
            counts[d as usize] += 1;
        }
    }
    counts
}

/// 找出至少 `n` 顆相同點數的骰子
///
/// 多個點數同時符合時回傳點數最小者。
pub fn n_of_a_kind(dice: &[u8], n: u8) -> Option<KindMatch> {
    let counts = count_by_face(dice);
    (FACE_MIN..=FACE_MAX)
        .find(|&face| counts[face as usize] >= n)
        .map(|face| {
            let count = counts[face as usize];
            KindMatch {
                face,
                count,
                dice: vec![face; count as usize],
            }
        })
}

/// 葫蘆判定
///
/// 把出現 2 次以上的點數次數排序後，`[3,2]` 或 `[2,2]` 都視為可能成形。
/// `[2,2]`（兩組對子）只是差一顆的候選，`complete` 僅在 `[3,2]` 時為真。
pub fn full_house(dice: &[u8]) -> FullHouseMatch {
    let counts = count_by_face(dice);

    let mut groups: Vec<(u8, u8)> = (FACE_MIN..=FACE_MAX)
        .map(|face| (face, counts[face as usize]))
        .filter(|&(_, count)| count >= 2)
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1));

    let distribution: Vec<u8> = groups.iter().map(|&(_, count)| count).collect();
    let complete = distribution == [3, 2];
    let possible = complete || distribution == [2, 2];

    let dice = if possible {
        let mut kept: Vec<u8> = groups
            .iter()
            .flat_map(|&(face, count)| std::iter::repeat(face).take(count as usize))
            .collect();
        kept.sort_unstable();
        kept
    } else {
        Vec::new()
    };

    FullHouseMatch {
        possible,
        complete,
        dice,
    }
}

/// 最長連續點數段
pub fn straight_run(dice: &[u8]) -> StraightRun {
    let counts = count_by_face(dice);
    let unique_faces_sorted: Vec<u8> = (FACE_MIN..=FACE_MAX)
        .filter(|&face| counts[face as usize] > 0)
        .collect();

    let mut best_start = 0usize;
    let mut best_len = 0usize;
    let mut start = 0usize;
    for i in 0..unique_faces_sorted.len() {
        if i > 0 && unique_faces_sorted[i] != unique_faces_sorted[i - 1] + 1 {
            start = i;
        }
        let len = i - start + 1;
        if len > best_len {
            best_len = len;
            best_start = start;
        }
    }

    StraightRun {
        run_length: best_len,
        run_faces: unique_faces_sorted[best_start..best_start + best_len].to_vec(),
        unique_faces_sorted,
    }
}

/// 對子骰子（攤平）
///
/// 每個點數取完整的對子數，例如 `[6,6,6,2,2]` → `[2,2,6,6]`。
pub fn pairs(dice: &[u8]) -> Vec<u8> {
    let counts = count_by_face(dice);
    (FACE_MIN..=FACE_MAX)
        .flat_map(|face| {
            let paired = counts[face as usize] - counts[face as usize] % 2;
            std::iter::repeat(face).take(paired as usize)
        })
        .collect()
}

// ============================================================================
// 單元測試
// ============================================================================
