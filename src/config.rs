use std::path::PathBuf;

use serde::Deserialize;

use crate::goals::repo_types::GoalSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    /// Nothing survives a restart; handy for demos.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub default_locale: String,
    /// Goals used until the user saves their own.
    pub default_goals: GoalSet,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage_backend = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "file".into())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "file" => StorageBackend::File,
            "memory" => StorageBackend::Memory,
            other => anyhow::bail!("STORAGE_BACKEND must be 'file' or 'memory', got '{other}'"),
        };
        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let default_locale = std::env::var("DEFAULT_LOCALE")
            .map(|v| v.trim().to_lowercase())
            .unwrap_or_else(|_| "en".into());
        let default_goals = GoalSet {
            calories: env_f64("DEFAULT_CALORIES_GOAL", 2000.0)?,
            protein: env_f64("DEFAULT_PROTEIN_GOAL", 150.0)?,
            carbs: env_f64("DEFAULT_CARBS_GOAL", 250.0)?,
            fat: env_f64("DEFAULT_FAT_GOAL", 70.0)?,
        };
        Ok(Self {
            storage_backend,
            data_dir,
            default_locale,
            default_goals,
        })
    }
}

fn env_f64(key: &str, default: f64) -> anyhow::Result<f64> {
    match std::env::var(key) {
        Ok(v) => {
            let parsed = v
                .trim()
                .parse::<f64>()
                .map_err(|e| anyhow::anyhow!("{key} must be a number: {e}"))?;
            if !parsed.is_finite() || parsed < 0.0 {
                anyhow::bail!("{key} must be a non-negative number");
            }
            Ok(parsed)
        }
        Err(_) => Ok(default),
    }
}
