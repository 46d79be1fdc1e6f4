//! 3D viewer UI state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lighting environment for the model viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentPreset {
    #[default]
    Studio,
    Sunset,
    Dawn,
    Night,
    Warehouse,
}

impl EnvironmentPreset {
    pub const ALL: [Self; 5] = [
        Self::Studio,
        Self::Sunset,
        Self::Dawn,
        Self::Night,
        Self::Warehouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::Sunset => "sunset",
            Self::Dawn => "dawn",
            Self::Night => "night",
            Self::Warehouse => "warehouse",
        }
    }
}

impl fmt::Display for EnvironmentPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentPreset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|p| p.as_str() == s).ok_or(())
    }
}

/// Session-lifetime viewer controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerState {
    pub model_loading: bool,
    /// Load progress in percent.
    pub model_progress: f64,
    /// Light rotation angle.
    pub light_rotation: f64,
    pub auto_rotate: bool,
    pub show_grid: bool,
    pub show_stats: bool,
    pub environment_preset: EnvironmentPreset,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            model_loading: false,
            model_progress: 0.0,
            light_rotation: 0.0,
            auto_rotate: true,
            show_grid: true,
            show_stats: false,
            environment_preset: EnvironmentPreset::Studio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let json = serde_json::to_value(ViewerState::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "modelLoading": false,
                "modelProgress": 0.0,
                "lightRotation": 0.0,
                "autoRotate": true,
                "showGrid": true,
                "showStats": false,
                "environmentPreset": "studio"
            })
        );
    }

    #[test]
    fn test_preset_parse() {
        for preset in EnvironmentPreset::ALL {
            assert_eq!(preset.as_str().parse(), Ok(preset));
        }
        assert_eq!("forest".parse::<EnvironmentPreset>(), Err(()));
    }
}
