use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use log::warn;
use serde::{Deserialize, Serialize};

const CONFIG_KEY: &str = "raffle_wheel_config";
const MIN_CANVAS_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub canvas_size: u32,
    pub min_turns: u32,
    pub spin_duration_ms: u32,
    /// Pointer position in degrees, 90 is the top of the wheel.
    pub pointer_angle: f64,
    pub saturation: u8,
    pub lightness: u8,
    pub label_font: String,
    pub label_inset: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            canvas_size: 500,
            min_turns: 10,
            spin_duration_ms: 3500,
            pointer_angle: 90.0,
            saturation: 70,
            lightness: 50,
            label_font: "18px Arial".to_string(),
            label_inset: 10.0,
        }
    }
}

impl WheelConfig {
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.canvas_size = self.canvas_size.max(MIN_CANVAS_SIZE);
        self.min_turns = self.min_turns.max(1);
        self.saturation = self.saturation.min(100);
        self.lightness = self.lightness.min(100);
        if !self.pointer_angle.is_finite() {
            self.pointer_angle = defaults.pointer_angle;
        }
        if !self.label_inset.is_finite() || self.label_inset < 0.0 {
            self.label_inset = defaults.label_inset;
        }
        if self.label_font.trim().is_empty() {
            self.label_font = defaults.label_font;
        }
        self
    }

    pub fn slice_color(&self, hue: f64) -> String {
        format!("hsl({}, {}%, {}%)", hue, self.saturation, self.lightness)
    }

    pub fn spin_duration_secs(&self) -> f64 {
        f64::from(self.spin_duration_ms) / 1000.0
    }
}

/// Reads optional overrides from local storage. Participant data is never
/// stored, only these display settings.
pub fn load_config() -> WheelConfig {
    match LocalStorage::get::<WheelConfig>(CONFIG_KEY) {
        Ok(config) => config.sanitized(),
        Err(StorageError::KeyNotFound(_)) => WheelConfig::default(),
        Err(err) => {
            warn!("Falling back to default wheel config: {}", err);
            WheelConfig::default()
        }
    }
}
