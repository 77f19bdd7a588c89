//! Engine configuration
//!
//! Loaded from an optional TOML file. Every field has a default, so the file
//! is a partial overlay:
//!
//! ```toml
//! [resolver]
//! safety_threshold = 0.75
//!
//! [resolver.commands]
//! stop = ["stop", "halt", "enough"]
//!
//! [stabilizer]
//! min_frames = 8
//!
//! [actuator]
//! port = "/dev/ttyACM0"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::kernel::emotion::{EmotionGrouping, EmotionStabilizer, StabilizerParams};
use crate::kernel::intent::resolver::{DEFAULT_NEAR_MISS_FLOOR, DEFAULT_SAFETY_THRESHOLD};
use crate::kernel::intent::{CommandResolver, CommandTable, Intent};
use crate::kernel::reactor::ReactorConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub resolver: ResolverConfig,
    pub stabilizer: StabilizerParams,
    pub vision: VisionConfig,
    pub actuator: ActuatorConfig,
    pub reactor: ReactorConfig,
}

/// Command resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum similarity for a match to be acted on
    pub safety_threshold: f64,

    /// Best scores above this (but under the threshold) are logged as near misses
    pub near_miss_floor: f64,

    /// Intent name -> aliases. Replaces the default list of each named intent.
    pub commands: BTreeMap<String, Vec<String>>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            safety_threshold: DEFAULT_SAFETY_THRESHOLD,
            near_miss_floor: DEFAULT_NEAR_MISS_FLOOR,
            commands: BTreeMap::new(),
        }
    }
}

/// Frame source pacing. The binary has no camera of its own; this section
/// is read by `VisionPipeline::from_config` when a classifier is plugged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Minimum time between two inferences (120ms ~ 8 Hz)
    pub inference_interval_ms: u64,

    /// Weight of the previous face box in the display smoothing
    pub smooth_alpha: f32,
}

impl VisionConfig {
    pub fn inference_interval(&self) -> Duration {
        Duration::from_millis(self.inference_interval_ms)
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            inference_interval_ms: 120,
            smooth_alpha: 0.7,
        }
    }
}

/// Head controller connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorConfig {
    /// Serial port name (None = no hardware, commands are only logged)
    pub port: Option<String>,

    pub baud_rate: u32,

    /// Wait after opening the port while the controller resets
    pub settle_ms: u64,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: 9600,
            settle_ms: 2000,
        }
    }
}

impl EngineConfig {
    /// Defaults when `path` is None.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |name: &str, v: f64| {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{} must be within 0.0..=1.0, got {}", name, v)))
            }
        };

        unit("resolver.safety_threshold", self.resolver.safety_threshold)?;
        unit("resolver.near_miss_floor", self.resolver.near_miss_floor)?;

        let s = &self.stabilizer;
        unit("stabilizer.min_dominance", s.min_dominance)?;
        unit("stabilizer.angry_min_dominance", s.angry_min_dominance)?;
        unit("stabilizer.sad_angry_penalty", s.sad_angry_penalty)?;
        if !(s.history_window_secs > 0.0) {
            return Err(ConfigError::Invalid("stabilizer.history_window_secs must be positive".into()));
        }
        if s.min_frames == 0 {
            return Err(ConfigError::Invalid("stabilizer.min_frames must be at least 1".into()));
        }
        if !(s.min_state_duration_secs >= 0.0) {
            return Err(ConfigError::Invalid("stabilizer.min_state_duration_secs must not be negative".into()));
        }

        unit("vision.smooth_alpha", self.vision.smooth_alpha as f64)?;
        if self.vision.inference_interval_ms == 0 {
            return Err(ConfigError::Invalid("vision.inference_interval_ms must be positive".into()));
        }
        if self.reactor.tick_ms == 0 {
            return Err(ConfigError::Invalid("reactor.tick_ms must be positive".into()));
        }

        self.command_table().map(|_| ())
    }

    pub fn command_table(&self) -> Result<CommandTable, ConfigError> {
        let mut overrides: HashMap<Intent, Vec<String>> = HashMap::new();
        for (name, aliases) in &self.resolver.commands {
            overrides.insert(name.parse()?, aliases.clone());
        }
        CommandTable::with_overrides(&overrides)
    }

    pub fn build_resolver(&self) -> Result<CommandResolver, ConfigError> {
        Ok(CommandResolver::new(self.command_table()?, self.resolver.safety_threshold)
            .with_near_miss_floor(self.resolver.near_miss_floor))
    }

    pub fn build_stabilizer(&self) -> EmotionStabilizer {
        EmotionStabilizer::new(self.stabilizer.clone(), EmotionGrouping::default())
    }
}
