//! 游戏设置
//!
//! JSON 文件保存在 `<config_dir>/othello/settings.json`，
//! 读取失败时使用默认设置。

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use othello_ai::{AiBackend, AiConfig};
use othello_core::Side;
use serde::{Deserialize, Serialize};

/// 一方由谁操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Ai,
}

/// 游戏设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub black: PlayerKind,
    pub white: PlayerKind,
    pub ai: AiConfig,
    pub backend: AiBackend,
    /// 人类走棋时显示合法走法
    pub show_hints: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            black: PlayerKind::Human,
            white: PlayerKind::Ai,
            ai: AiConfig::default(),
            backend: AiBackend::default(),
            show_hints: true,
        }
    }
}

impl Settings {
    /// 指定阵营由谁操作
    pub fn player(&self, side: Side) -> PlayerKind {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    /// 获取设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("othello");
            path.push("settings.json");
            path
        })
    }

    /// 从默认位置加载设置
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("No config directory available, using default settings");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// 从指定文件加载设置，文件不存在或无效时使用默认设置
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("Settings file {:?} not found, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("Invalid settings file {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Cannot read settings file {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// 保存到默认位置
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path().context("No config directory available")?;
        self.save_to(&path)
    }

    /// 保存到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create config directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings file {:?}", path))?;

        tracing::info!("Settings saved to {:?}", path);
        Ok(())
    }
}
