use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_fps_cap")]
    pub fps_cap: u32,

    #[serde(default = "default_run_seconds")]
    pub run_seconds: f32,

    /// Pace frames against the wall clock instead of running as fast as possible.
    #[serde(default)]
    pub realtime: bool,

    #[serde(default = "default_print_interval")]
    pub print_interval: f32,

    #[serde(default = "default_viewport")]
    pub viewport: Size,

    #[serde(default = "default_scroll_script")]
    pub scroll_script: Vec<ScrollInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// A wheel event replayed at `at` seconds after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollInput {
    pub at: f32,
    pub delta: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps_cap: default_fps_cap(),
            run_seconds: default_run_seconds(),
            realtime: false,
            print_interval: default_print_interval(),
            viewport: default_viewport(),
            scroll_script: default_scroll_script(),
        }
    }
}

fn default_viewport() -> Size {
    Size {
        width: 1440,
        height: 900,
    }
}

fn default_fps_cap() -> u32 {
    60
}

fn default_run_seconds() -> f32 {
    14.0
}

fn default_print_interval() -> f32 {
    0.5
}

fn default_scroll_script() -> Vec<ScrollInput> {
    // One early flick that the locked page swallows, then a slow scroll
    // down through the pinned span and a quick one back up.
    let mut script = vec![ScrollInput { at: 1.0, delta: 300.0 }];
    script.extend((0..10).map(|i| ScrollInput {
        at: 3.5 + i as f32 * 0.25,
        delta: 200.0,
    }));
    script.push(ScrollInput { at: 10.0, delta: -2000.0 });
    script
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("heroreel").join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Reading {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Parsing {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps_cap.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heroreel").join("config.toml");
        let mut config = Config::default();
        config.fps_cap = 30;
        config.scroll_script = vec![ScrollInput { at: 4.0, delta: 2000.0 }];
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("fps_cap = 24\nrealtime = true\n").unwrap();
        assert_eq!(config.fps_cap, 24);
        assert!(config.realtime);
        assert_eq!(config.viewport, default_viewport());
        assert_eq!(config.scroll_script, default_scroll_script());
        assert!((config.frame_dt() - 1.0 / 24.0).abs() < 1e-6);
    }

    #[test]
    fn bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fps_cap = \"fast\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
