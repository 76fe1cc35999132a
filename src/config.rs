use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::playback::EndpointPolicy;
use crate::types::Position;

/// Environment variable holding the path of the config file.
pub const CONFIG_PATH_VAR: &str = "KINECT_AVATAR_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./avatar.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Recorded captures, one or more poses packed in a single row.
    pub input: PathBuf,
    /// File kept up to date by the capture process in live mode.
    pub live_input: PathBuf,
    pub live: bool,
    /// Magnification applied to every parsed coordinate.
    pub scale: f64,
    /// Number of segments each captured interval is split into.
    pub subdivisions: usize,
    /// Keep the captured poses in the dense sequence, or only the interpolated ones.
    pub keep_captured_poses: bool,
    pub target_fps: u32,
    pub default_joint_position: [f64; 3],
    pub scene_offset: [f64; 3],
}

impl Default for AvatarConfig {
    fn default() -> Self {
        AvatarConfig {
            input: PathBuf::from("KinectJoints.csv"),
            live_input: PathBuf::from("KinectJointsRealtime.csv"),
            live: false,
            scale: 2.0,
            subdivisions: 10,
            keep_captured_poses: true,
            target_fps: 60,
            default_joint_position: [3.0, 3.0, 3.0],
            scene_offset: [6.0, 2.5, 2.0],
        }
    }
}

impl AvatarConfig {
    /// Load from `$KINECT_AVATAR_CONFIG` or `./avatar.toml`. A missing file means defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        if !path.exists() {
            info!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&data).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(data: &str) -> Result<Self, ConfigError> {
        let config: AvatarConfig = toml::from_str(data).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(ConfigError::Invalid {
                field: "scale",
                reason: format!("{} is not a usable magnification", self.scale),
            });
        }
        if self.subdivisions == 0 {
            return Err(ConfigError::Invalid {
                field: "subdivisions",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid {
                field: "target_fps",
                reason: "must be at least 1".to_string(),
            });
        }
        let vectors = [
            ("default_joint_position", self.default_joint_position),
            ("scene_offset", self.scene_offset),
        ];
        for (field, value) in vectors {
            if value.iter().any(|v| !v.is_finite()) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{:?} has a non-finite component", value),
                });
            }
        }
        if self.subdivisions == 1 && !self.keep_captured_poses {
            warn!("subdivisions = 1 without captured poses leaves nothing to interpolate; playing captures as-is");
        }
        Ok(())
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps
    }

    pub fn endpoint_policy(&self) -> EndpointPolicy {
        if self.keep_captured_poses {
            EndpointPolicy::KeepCaptured
        } else {
            EndpointPolicy::InteriorOnly
        }
    }

    pub fn default_position(&self) -> Position {
        let [x, y, z] = self.default_joint_position;
        Position::new(x, y, z)
    }

    pub fn offset(&self) -> Position {
        let [x, y, z] = self.scene_offset;
        Position::new(x, y, z)
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AvatarConfig::from_toml("").unwrap();
        assert_eq!(config, AvatarConfig::default());
        assert_eq!(config.scale, 2.0);
        assert_eq!(config.subdivisions, 10);
        assert_eq!(config.default_position(), Position::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn partial_toml_overrides_only_given_fields() {
        let config = AvatarConfig::from_toml(
            r#"
            live = true
            subdivisions = 4
            scene_offset = [0.0, 0.0, 0.0]
            "#,
        )
        .unwrap();
        assert!(config.live);
        assert_eq!(config.subdivisions, 4);
        assert_eq!(config.offset(), Position::new(0.0, 0.0, 0.0));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.endpoint_policy(), EndpointPolicy::KeepCaptured);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            AvatarConfig::from_toml("subdivisions = 0"),
            Err(ConfigError::Invalid { field: "subdivisions", .. })
        ));
        assert!(matches!(
            AvatarConfig::from_toml("target_fps = 0"),
            Err(ConfigError::Invalid { field: "target_fps", .. })
        ));
        assert!(matches!(
            AvatarConfig::from_toml("scale = 0.0"),
            Err(ConfigError::Invalid { field: "scale", .. })
        ));
        assert!(matches!(
            AvatarConfig::from_toml("scale = \"big\""),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn frame_budget_follows_target_fps() {
        let config = AvatarConfig {
            target_fps: 50,
            ..AvatarConfig::default()
        };
        assert_eq!(config.frame_budget(), Duration::from_millis(20));
    }
}
