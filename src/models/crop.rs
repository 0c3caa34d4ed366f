use super::soil::SoilType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoistureRegime {
    Wet,
    Dry,
}

impl MoistureRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoistureRegime::Wet => "Wet",
            MoistureRegime::Dry => "Dry",
        }
    }
}

impl std::fmt::Display for MoistureRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suitability {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl Suitability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suitability::Poor => "Poor",
            Suitability::Fair => "Fair",
            Suitability::Good => "Good",
            Suitability::Excellent => "Excellent",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Suitability::Poor => Color::Red,
            Suitability::Fair => Color::Yellow,
            Suitability::Good => Color::Green,
            Suitability::Excellent => Color::LightGreen,
        }
    }
}

impl std::fmt::Display for Suitability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the crop suitability table, keyed by `(soil_type, moisture_regime)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSuitabilityEntry {
    pub crop_name: String,
    pub soil_type: SoilType,
    pub moisture_regime: MoistureRegime,
    pub suitability: Suitability,
    pub planting_window: String,
    pub harvest_window: String,
    pub expected_yield_range: String,
    pub notes: Vec<String>,
}

impl CropSuitabilityEntry {
    pub fn new(
        crop_name: impl Into<String>,
        soil_type: SoilType,
        moisture_regime: MoistureRegime,
        suitability: Suitability,
    ) -> Self {
        Self {
            crop_name: crop_name.into(),
            soil_type,
            moisture_regime,
            suitability,
            planting_window: String::new(),
            harvest_window: String::new(),
            expected_yield_range: String::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_windows(mut self, planting: &str, harvest: &str) -> Self {
        self.planting_window = planting.to_string();
        self.harvest_window = harvest.to_string();
        self
    }

    pub fn with_yield(mut self, expected: &str) -> Self {
        self.expected_yield_range = expected.to_string();
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.notes.push(note.to_string());
        self
    }
}
