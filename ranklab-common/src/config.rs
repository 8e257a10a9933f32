//! Configuration loading and root folder resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority, applied by the binary)
//! 2. Environment variable (also applied by the binary, via clap `env`)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Inclusive ranges for the per-trial condition parameter draw
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConditionRanges {
    /// Speaker id range (inclusive)
    pub speaker: (u32, u32),
    /// Text id range (inclusive)
    pub text: (u32, u32),
    /// Emotion id range (inclusive); ids map onto the fixed emotion set
    pub emotion: (u8, u8),
}

impl Default for ConditionRanges {
    fn default() -> Self {
        Self {
            speaker: (1, 10),
            text: (20, 50),
            emotion: (0, 4),
        }
    }
}

/// Trial controller settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Root folder containing the `wav/` audio assets; the local `log/`
    /// copy of the results CSV is written here as well
    pub root_folder: PathBuf,

    /// External submission endpoint; when absent, delivery is skipped and
    /// only the local CSV copy is kept
    pub submit_url: Option<String>,

    /// Destination directory field sent to the submission endpoint
    pub log_dir: String,

    /// Total number of trials in a run
    pub trials: usize,

    /// Number of samples presented (and ranking slots) per trial
    pub samples: usize,

    /// Condition parameter draw ranges
    pub ranges: ConditionRanges,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5731".to_string(),
            root_folder: PathBuf::from("."),
            submit_url: None,
            log_dir: "log/".to_string(),
            trials: 2,
            samples: 5,
            ranges: ConditionRanges::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a config file.
    ///
    /// An explicitly given path must exist. With no path, the default
    /// per-user config location is tried and compiled defaults are used
    /// when no file is present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Settings::default()),
            },
        };

        tracing::info!("Loading settings from {}", path.display());
        let text = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&text)
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(Error::Config("trials must be at least 1".to_string()));
        }
        // Rank column letters run A..Z
        if self.samples == 0 || self.samples > 26 {
            return Err(Error::Config(
                "samples must be between 1 and 26".to_string(),
            ));
        }
        for (name, lo, hi) in [
            ("speaker", self.ranges.speaker.0 as u64, self.ranges.speaker.1 as u64),
            ("text", self.ranges.text.0 as u64, self.ranges.text.1 as u64),
            ("emotion", self.ranges.emotion.0 as u64, self.ranges.emotion.1 as u64),
        ] {
            if lo > hi {
                return Err(Error::Config(format!(
                    "{name} range is empty: {lo}..={hi}"
                )));
            }
        }
        // Emotion ids map onto a fixed five-label set
        if self.ranges.emotion.1 > 4 {
            return Err(Error::Config(format!(
                "emotion range upper bound {} exceeds the defined set (0..=4)",
                self.ranges.emotion.1
            )));
        }
        Ok(())
    }

    /// Directory the audio assets are served from
    pub fn audio_dir(&self) -> PathBuf {
        self.root_folder.join("wav")
    }

    /// Directory the local results CSV copy is written to
    pub fn local_log_dir(&self) -> PathBuf {
        self.root_folder.join("log")
    }
}

/// Default per-user config file location (`<config dir>/ranklab/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ranklab").join("config.toml"))
}
