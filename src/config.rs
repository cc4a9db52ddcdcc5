//! 配置載入
//!
//! JSON 配置檔，所有欄位皆有預設值。載入後套用環境變數覆寫。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::PersonalityId;
use crate::error::{EngineError, Result};
use crate::game::THINKING_JITTER_MS;

/// 預設搜尋位置
pub const CONFIG_SEARCH_PATHS: &[&str] = &["yams_ai.json"];

/// 指定配置檔路徑的環境變數
pub const CONFIG_ENV: &str = "YAMS_AI_CONFIG";

/// 模擬思考時間
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThinkingConfig {
    pub enabled: bool,
    /// 隨機浮動上限（毫秒）
    pub jitter_ms: u64,
    /// 乘在個性 thinking_time 上的倍數
    pub time_scale: f64,
}

impl ThinkingConfig {
    /// 不延遲（模擬、批次對戰用）
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for ThinkingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jitter_ms: THINKING_JITTER_MS,
            time_scale: 1.0,
        }
    }
}

/// 示範牌桌
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub seed: u64,
    pub personalities: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            personalities: PersonalityId::all()
                .iter()
                .map(|p| p.name().to_string())
                .collect(),
        }
    }
}

/// 批次對戰
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub games: usize,
    pub base_seed: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            games: 200,
            base_seed: 7,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub thinking: ThinkingConfig,
    pub table: TableConfig,
    pub tournament: TournamentConfig,
}

/// 載入配置
///
/// 搜尋順序：
/// 1. `YAMS_AI_CONFIG` 環境變數指定的路徑
/// 2. 目前目錄的 `yams_ai.json`
/// 3. 內建預設值
///
/// 檔案無法讀取或解析時記錄警告並使用預設值。
pub fn load_config() -> EngineConfig {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_ENV, path.display());
            return load_or_default(&path);
        }
        warn!("{}={} not found, searching defaults", CONFIG_ENV, path.display());
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_or_default(&path);
        }
    }

    debug!("No config file found, using built-in defaults");
    apply_env_overrides(EngineConfig::default())
}

fn load_or_default(path: &Path) -> EngineConfig {
    match load_from_path(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            apply_env_overrides(EngineConfig::default())
        }
    }
}

/// 從指定路徑載入（嚴格版本，錯誤時回傳 Err）
pub fn load_from_path(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| EngineError::Config(format!("failed to read {}: {}", path.display(), e)))?;
    let config = parse_config(&content)
        .map_err(|e| EngineError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
    Ok(apply_env_overrides(config))
}

/// 解析 JSON 配置內容
pub fn parse_config(content: &str) -> std::result::Result<EngineConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// 套用環境變數覆寫
pub fn apply_env_overrides(config: EngineConfig) -> EngineConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

fn apply_overrides<F>(mut config: EngineConfig, get: F) -> EngineConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = get("YAMS_AI_SEED") {
        match v.parse() {
            Ok(seed) => config.table.seed = seed,
            Err(_) => warn!("Ignoring invalid YAMS_AI_SEED={}", v),
        }
    }
    if let Some(v) = get("YAMS_AI_THINKING") {
        config.thinking.enabled = !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off");
    }
    if let Some(v) = get("YAMS_AI_GAMES") {
        match v.parse() {
            Ok(games) => config.tournament.games = games,
            Err(_) => warn!("Ignoring invalid YAMS_AI_GAMES={}", v),
        }
    }
    config
}

// ============================================================================
// 單元測試
// ============================================================================
