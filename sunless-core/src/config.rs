use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub assets_path: String,
    pub scene_path:  String,
    pub log_path:    String,
    pub log_level:   String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width:  u32,
    pub height: u32,
    pub title:  String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub walk_speed:     f32,
    pub sprint_speed:   f32,
    pub developer_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// How far ahead of the player the camera looks while moving.
    pub offset_factor: f32,
    /// Lerp factor per frame toward the look-ahead offset.
    pub acceleration:  f32,
    pub shake_trauma:  f32,
    /// Trauma removed per frame.
    pub shake_falloff: f32,
}

/// Every section the core reads, gathered so the game can be built
/// without touching the global store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    pub system:   SystemConfig,
    pub window:   WindowConfig,
    pub gameplay: GameplayConfig,
    pub camera:   CameraConfig,
}

impl CoreConfig {
    pub fn from_global() -> Self {
        Self {
            system:   sunless_shared::config::get("system"),
            window:   sunless_shared::config::get("window"),
            gameplay: sunless_shared::config::get("gameplay"),
            camera:   sunless_shared::config::get("camera"),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            assets_path: "assets/".into(),
            scene_path:  "scenes/main.scene".into(),
            log_path:    "logs/".into(),
            log_level:   "info".into(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width:  1280,
            height: 720,
            title:  "Who Stole The Sun".into(),
        }
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            walk_speed:     5.0,
            sprint_speed:   10.0,
            developer_mode: true,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset_factor: 25.0,
            acceleration:  0.03,
            shake_trauma:  0.5,
            shake_falloff: 0.7 * crate::FRAME_TIME,
        }
    }
}
