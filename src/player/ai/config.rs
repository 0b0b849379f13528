use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// "count" | "mobility" | "compound"
    pub evaluator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// 引数で指定されなかったときの持ち時間 (秒)
    pub default_time_limit_secs: u64,
    /// 反復深化の深さ上限
    pub max_depth: u32,
    /// 自己対局の1手あたりの持ち時間 (ミリ秒)
    pub selfplay_move_time_ms: u64,
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = "ai_config.json";
        let config_str = std::fs::read_to_string(config_path)?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }

    /// 起動時に1度だけ読むキャッシュ済み設定
    pub fn get() -> &'static AIConfig {
        static CONFIG: Lazy<AIConfig> = Lazy::new(AIConfig::load_or_default);
        &CONFIG
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            evaluation: EvaluationConfig {
                evaluator: "compound".to_string(),
            },
            search: SearchConfig {
                default_time_limit_secs: 5,
                max_depth: 60,
                selfplay_move_time_ms: 200,
            },
        }
    }
}
