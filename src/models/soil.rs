use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Clay,
    Sand,
    Loam,
    Silt,
    Peat,
    Chalk,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "Clay",
            SoilType::Sand => "Sand",
            SoilType::Loam => "Loam",
            SoilType::Silt => "Silt",
            SoilType::Peat => "Peat",
            SoilType::Chalk => "Chalk",
        }
    }

    pub fn all() -> &'static [SoilType] {
        &[
            SoilType::Clay,
            SoilType::Sand,
            SoilType::Loam,
            SoilType::Silt,
            SoilType::Peat,
            SoilType::Chalk,
        ]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clay" => Some(SoilType::Clay),
            "sand" | "sandy" => Some(SoilType::Sand),
            "loam" | "loamy" => Some(SoilType::Loam),
            "silt" | "silty" => Some(SoilType::Silt),
            "peat" | "peaty" => Some(SoilType::Peat),
            "chalk" | "chalky" => Some(SoilType::Chalk),
            _ => None,
        }
    }

    /// Like `from_str`, but an unknown label is an input error rather than `None`
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s)
            .ok_or_else(|| AdvisorError::InvalidInput(format!("unknown soil type '{}'", s)))
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Five-step ordinal used for retention and watering frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Level {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::VeryLow => "Very Low",
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
            Level::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference irrigation characteristics for one soil type.
///
/// `schedule_note` is the rationale the scheduler starts from. Soils without
/// a dedicated watering regime leave it `None` and use the default base values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilProfile {
    pub soil_type: SoilType,
    pub water_retention: Level,
    pub irrigation_frequency: Level,
    pub base_duration_minutes: f64,
    pub base_volume_liters_per_m2: f64,
    pub schedule_note: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soil_type_from_str_valid() {
        assert_eq!(SoilType::from_str("clay"), Some(SoilType::Clay));
        assert_eq!(SoilType::from_str("Loam"), Some(SoilType::Loam));
        assert_eq!(SoilType::from_str("SANDY"), Some(SoilType::Sand));
        assert_eq!(SoilType::from_str(" chalk "), Some(SoilType::Chalk));
    }

    #[test]
    fn soil_type_from_str_invalid() {
        assert_eq!(SoilType::from_str("dirt"), None);
        assert_eq!(SoilType::from_str(""), None);
        assert_eq!(SoilType::from_str("silt loam"), None);
    }

    #[test]
    fn soil_type_parse_reports_invalid_input() {
        match SoilType::parse("gravel") {
            Err(AdvisorError::InvalidInput(msg)) => assert!(msg.contains("gravel")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn soil_type_round_trip() {
        for soil in SoilType::all() {
            let debug_str = format!("{:?}", soil);
            assert_eq!(
                SoilType::from_str(&debug_str),
                Some(*soil),
                "Round-trip failed for {:?}",
                soil
            );
        }
    }

    #[test]
    fn soil_type_serde_is_lowercase() {
        let json = serde_json::to_string(&SoilType::Chalk).unwrap();
        assert_eq!(json, "\"chalk\"");
        let back: SoilType = serde_json::from_str("\"peat\"").unwrap();
        assert_eq!(back, SoilType::Peat);
    }

    #[test]
    fn level_ordering() {
        assert!(Level::VeryLow < Level::Low);
        assert!(Level::High < Level::VeryHigh);
        assert_eq!(Level::VeryHigh.as_str(), "Very High");
    }
}
