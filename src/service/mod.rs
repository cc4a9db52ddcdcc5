//! 服務層模組
//!
//! 引擎之外的對局協作者：牌桌狀態、AI 玩家註冊表與批次對戰

pub mod registry;
pub mod state;
pub mod tournament;

pub use registry::{EngineRegistry, SharedEngine};
pub use state::{Scorecard, Seat, TableState, TurnReport};
pub use tournament::{play_game, play_turn, run_tournament, GameResult, SeatStats, TournamentSummary};
