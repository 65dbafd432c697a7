//! Game settings and preferences
//!
//! Persisted as JSON next to the executable. Only the frame rate and the
//! resolution reach the simulation (tick duration and arena rectangle).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, SIM_HZ};
use crate::error::SettingsError;
use crate::sim::Arena;

/// Window presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayMode {
    #[default]
    Windowed,
    Fullscreen,
    Borderless,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Windowed => "windowed",
            DisplayMode::Fullscreen => "fullscreen",
            DisplayMode::Borderless => "borderless",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "windowed" | "window" => Some(DisplayMode::Windowed),
            "fullscreen" => Some(DisplayMode::Fullscreen),
            "borderless" => Some(DisplayMode::Borderless),
            _ => None,
        }
    }

    /// Fullscreen <-> windowed; borderless goes to fullscreen
    pub fn toggled_fullscreen(&self) -> Self {
        match self {
            DisplayMode::Fullscreen => DisplayMode::Windowed,
            _ => DisplayMode::Fullscreen,
        }
    }
}

/// Difficulty preset (menu-level only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Controller layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    #[default]
    Default,
    Southpaw,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Default => "default",
            ControlScheme::Southpaw => "southpaw",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default" => Some(ControlScheme::Default),
            "southpaw" => Some(ControlScheme::Southpaw),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub display_mode: DisplayMode,
    /// Window size in pixels; also the arena size
    pub resolution: (u32, u32),
    /// Target frame rate; one simulation tick per frame
    pub framerate: u32,

    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Gameplay ===
    pub difficulty: Difficulty,
    pub control_scheme: ControlScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::Windowed,
            resolution: (ARENA_WIDTH as u32, ARENA_HEIGHT as u32),
            framerate: SIM_HZ,

            music_volume: 0.7,
            sfx_volume: 0.5,

            difficulty: Difficulty::Normal,
            control_scheme: ControlScheme::Default,
        }
    }
}

impl Settings {
    /// Duration of one simulation tick in seconds
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.framerate.max(1) as f32
    }

    /// Arena rectangle derived from the resolution
    pub fn arena(&self) -> Arena {
        Arena::new(0.0, 0.0, self.resolution.0 as f32, self.resolution.1 as f32)
    }

    pub fn toggle_fullscreen(&mut self) {
        self.display_mode = self.display_mode.toggled_fullscreen();
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution = (width.max(1), height.max(1));
    }

    pub fn set_framerate(&mut self, framerate: u32) {
        self.framerate = framerate.max(1);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// Returns false (and leaves the setting alone) for unknown names
    pub fn set_difficulty(&mut self, name: &str) -> bool {
        match Difficulty::from_str(name) {
            Some(difficulty) => {
                self.difficulty = difficulty;
                true
            }
            None => {
                log::warn!("Invalid difficulty setting: {}", name);
                false
            }
        }
    }

    /// Returns false (and leaves the setting alone) for unknown names
    pub fn set_control_scheme(&mut self, name: &str) -> bool {
        match ControlScheme::from_str(name) {
            Some(scheme) => {
                self.control_scheme = scheme;
                true
            }
            None => {
                log::warn!("Invalid control scheme: {}", name);
                false
            }
        }
    }

    /// Read settings from a JSON file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        settings.sanitize();
        Ok(settings)
    }

    /// Read settings, falling back to defaults when the file is missing or bad
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path.as_ref()) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Clamp hand-edited values back into range
    fn sanitize(&mut self) {
        self.set_music_volume(self.music_volume);
        self.set_sfx_volume(self.sfx_volume);
        self.set_framerate(self.framerate);
        self.set_resolution(self.resolution.0, self.resolution.1);
    }
}
