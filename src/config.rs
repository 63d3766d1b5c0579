use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::detect::ModelLayout;

const DEFAULT_MIN_CONFIDENCE: f32 = 0.3;
const DEFAULT_MAX_DETECTED: usize = 1;
const DEFAULT_SKIP_FRAMES: u32 = 16;
const DEFAULT_INPUT_SIZE: u32 = 192;

#[derive(Debug, Deserialize, Default)]
struct PoseConfigFile {
    min_confidence: Option<f32>,
    max_detected: Option<usize>,
    skip_allowed: Option<bool>,
    skip_frames: Option<u32>,
    model: Option<ModelConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct ModelConfigFile {
    path: Option<PathBuf>,
    layout: Option<String>,
    input_size: Option<u32>,
}

/// Pipeline configuration.
///
/// Consumed by `process_frame`; the pipeline never mutates it. Loaded from an
/// optional TOML file named by `POSETRACK_CONFIG`, with environment-variable
/// overrides applied on top.
#[derive(Debug, Clone)]
pub struct PoseConfig {
    /// Keypoints and multi-pose slots at or below this score are dropped.
    pub min_confidence: f32,
    /// Hard cap on poses returned per frame.
    pub max_detected: usize,
    /// Enables the cached-region skip path. When false every frame runs
    /// full-frame inference.
    pub skip_allowed: bool,
    /// Consecutive frames allowed on cached regions before a full-frame
    /// refresh is forced.
    pub skip_frames: u32,
    pub model: ModelSettings,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub path: Option<PathBuf>,
    pub layout: ModelLayout,
    pub input_size: u32,
}

impl Default for PoseConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            max_detected: DEFAULT_MAX_DETECTED,
            skip_allowed: true,
            skip_frames: DEFAULT_SKIP_FRAMES,
            model: ModelSettings {
                path: None,
                layout: ModelLayout::SinglePose,
                input_size: DEFAULT_INPUT_SIZE,
            },
        }
    }
}

impl PoseConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("POSETRACK_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: PoseConfigFile) -> Result<Self> {
        let defaults = Self::default();
        let model_file = file.model.unwrap_or_default();
        let layout = match model_file.layout.as_deref() {
            Some(name) => parse_layout(name)?,
            None => defaults.model.layout,
        };
        Ok(Self {
            min_confidence: file.min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE),
            max_detected: file.max_detected.unwrap_or(DEFAULT_MAX_DETECTED),
            skip_allowed: file.skip_allowed.unwrap_or(true),
            skip_frames: file.skip_frames.unwrap_or(DEFAULT_SKIP_FRAMES),
            model: ModelSettings {
                path: model_file.path,
                layout,
                input_size: model_file.input_size.unwrap_or(DEFAULT_INPUT_SIZE),
            },
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("POSETRACK_MIN_CONFIDENCE") {
            self.min_confidence = value
                .parse()
                .context("POSETRACK_MIN_CONFIDENCE must be a float")?;
        }
        if let Ok(value) = std::env::var("POSETRACK_MAX_DETECTED") {
            self.max_detected = value
                .parse()
                .context("POSETRACK_MAX_DETECTED must be an integer")?;
        }
        if let Ok(value) = std::env::var("POSETRACK_SKIP_FRAMES") {
            self.skip_frames = value
                .parse()
                .context("POSETRACK_SKIP_FRAMES must be an integer")?;
        }
        if let Ok(value) = std::env::var("POSETRACK_TRACKING") {
            self.skip_allowed = match value.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                other => return Err(anyhow!("POSETRACK_TRACKING must be a bool, got '{other}'")),
            };
        }
        if let Ok(value) = std::env::var("POSETRACK_MODEL") {
            self.model.path = Some(PathBuf::from(value));
        }
        if let Ok(value) = std::env::var("POSETRACK_MODEL_LAYOUT") {
            self.model.layout = parse_layout(&value)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(anyhow!(
                "min_confidence must be in [0,1], got {}",
                self.min_confidence
            ));
        }
        if self.max_detected == 0 {
            return Err(anyhow!("max_detected must be >= 1"));
        }
        if self.model.input_size == 0 {
            return Err(anyhow!("model input_size must be >= 1"));
        }
        Ok(())
    }
}

fn parse_layout(name: &str) -> Result<ModelLayout> {
    match name {
        "single-pose" => Ok(ModelLayout::SinglePose),
        "multi-pose" => Ok(ModelLayout::MultiPose),
        other => Err(anyhow!(
            "unknown model layout '{}', expected 'single-pose' or 'multi-pose'",
            other
        )),
    }
}

fn read_config_file(path: &Path) -> Result<PoseConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
