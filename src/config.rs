use crate::error::{DashboardError, Result};
use interview_common::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 状態ファイルの場所を上書きする環境変数
pub const STATE_ENV: &str = "INTERVIEW_DASHBOARD_STATE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// データセットJSON（未設定なら同梱データ）
    pub dataset: Option<PathBuf>,
    pub page_size: usize,
    /// 選択・表示状態の保存先
    pub state_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            page_size: DEFAULT_PAGE_SIZE,
            state_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("interview-dashboard"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 状態ファイルのパス
    ///
    /// 優先順: 引数 > 環境変数 > 設定ファイル > 既定（設定ディレクトリ/state.json）
    pub fn resolve_state_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(STATE_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        if let Some(path) = &self.state_path {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join("state.json"))
    }

    /// データセットのパス（引数 > 設定ファイル）
    pub fn resolve_dataset<'a>(&'a self, cli_override: Option<&'a Path>) -> Option<&'a Path> {
        cli_override.or(self.dataset.as_deref())
    }

    pub fn set_page_size(&mut self, value: i64) -> Result<()> {
        if value < 1 {
            return Err(DashboardError::Config(format!(
                "ページサイズは1以上を指定してください: {}",
                value
            )));
        }
        self.page_size = value as usize;
        Ok(())
    }
}
