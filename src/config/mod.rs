use std::collections::HashSet;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{
    FEATURE_CONE_ANGLE_DEGREES, FEATURE_MAX_DISTANCE, FEATURE_MAX_RESULTS, FEATURE_MIN_DISTANCE,
    HORIZON_RAY_THRESHOLD,
};
use crate::geometry::ConeSearch;
use crate::objects::Gesture;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Tuning for world position resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    pub cone_angle_degrees: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub max_results: usize,
    /// Rays with a normalized Y above this never hit the infinite plane
    pub horizon_threshold: f32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            cone_angle_degrees: FEATURE_CONE_ANGLE_DEGREES,
            min_distance: FEATURE_MIN_DISTANCE,
            max_distance: FEATURE_MAX_DISTANCE,
            max_results: FEATURE_MAX_RESULTS,
            horizon_threshold: HORIZON_RAY_THRESHOLD,
        }
    }
}

impl PlacementSettings {
    pub fn cone_search(&self) -> ConeSearch {
        ConeSearch {
            cone_angle_degrees: self.cone_angle_degrees,
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            max_results: self.max_results,
        }
    }
}

/// Settings for the desktop tracking simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Number of synthetic feature points scattered around the scene
    pub feature_point_count: usize,
    /// Seed for the feature point cloud
    pub seed: u64,
    /// Half-size of the detected ground plane anchor (meters)
    pub ground_half_extent: f32,
    /// Gestures allowed on objects spawned from the simulator
    pub spawn_gestures: HashSet<Gesture>,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            feature_point_count: 400,
            seed: 7,
            ground_half_extent: 1.5,
            spawn_gestures: HashSet::from([Gesture::Pan, Gesture::Rotation]),
        }
    }
}

/// Engine configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfigData {
    #[serde(default)]
    pub placement: PlacementSettings,

    #[serde(default)]
    pub simulator: SimulatorSettings,
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct EngineConfig {
    /// The persisted configuration data
    pub data: EngineConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data: EngineConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

impl EngineConfig {
    pub fn placement(&self) -> &PlacementSettings {
        &self.data.placement
    }
}

/// Resource to notify the user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Result of loading config from disk
struct LoadConfigResult {
    data: EngineConfigData,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from a file, falling back to defaults
fn load_config(config_path: &Path) -> LoadConfigResult {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return LoadConfigResult {
            data: EngineConfigData::default(),
            reset_reason: None,
        };
    }

    let (data, reset_reason) = match std::fs::read_to_string(config_path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(data) => {
                info!("Loaded config from {:?}", config_path);
                (data, None)
            }
            Err(e) => {
                warn!("Failed to parse config file: {}", e);
                (
                    EngineConfigData::default(),
                    Some(format!("Configuration file was corrupted: {}", e)),
                )
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                EngineConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    };

    LoadConfigResult { data, reset_reason }
}

/// Save configuration to disk
fn save_config(config: &EngineConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<EngineConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(mut events: MessageReader<SaveConfigRequest>, mut config: ResMut<EngineConfig>) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                save_config_system.run_if(on_message::<SaveConfigRequest>),
            );
    }
}
