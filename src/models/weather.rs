use crate::error::{AdvisorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition categories, resolved from OpenWeatherMap condition ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Other,
}

impl WeatherCondition {
    pub fn from_owm_id(id: u32) -> Self {
        match id {
            200..=232 => WeatherCondition::Thunderstorm,
            300..=321 => WeatherCondition::Drizzle,
            500..=531 => WeatherCondition::Rain,
            600..=622 => WeatherCondition::Snow,
            701..=781 => WeatherCondition::Mist,
            800 => WeatherCondition::Clear,
            801..=804 => WeatherCondition::Clouds,
            _ => WeatherCondition::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Clouds",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Other => "Other",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀",
            WeatherCondition::Clouds => "☁",
            WeatherCondition::Rain => "🌧",
            WeatherCondition::Drizzle => "🌦",
            WeatherCondition::Thunderstorm => "⛈",
            WeatherCondition::Snow => "❄",
            WeatherCondition::Mist => "🌫",
            WeatherCondition::Other => "?",
        }
    }

    /// Irrigation outlook for a day dominated by this condition
    pub fn outlook(&self) -> DayOutlook {
        match self {
            WeatherCondition::Clear => DayOutlook::Sunny,
            WeatherCondition::Rain
            | WeatherCondition::Drizzle
            | WeatherCondition::Thunderstorm => DayOutlook::Rain,
            WeatherCondition::Clouds
            | WeatherCondition::Snow
            | WeatherCondition::Mist
            | WeatherCondition::Other => DayOutlook::Cloudy,
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-day weather outlook consumed by the irrigation scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOutlook {
    Sunny,
    Cloudy,
    Rain,
}

impl DayOutlook {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOutlook::Sunny => "sunny",
            DayOutlook::Cloudy => "cloudy",
            DayOutlook::Rain => "rain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sunny" | "sun" | "clear" => Some(DayOutlook::Sunny),
            "cloudy" | "clouds" | "overcast" => Some(DayOutlook::Cloudy),
            "rain" | "rainy" | "drizzle" | "thunderstorm" | "storm" => Some(DayOutlook::Rain),
            _ => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s)
            .ok_or_else(|| AdvisorError::InvalidInput(format!("unknown weather outlook '{}'", s)))
    }

    /// Parse a comma-separated list such as `sunny,rain,cloudy`.
    ///
    /// Positions map to weekdays, so a blank item is an error rather than skipped.
    pub fn parse_list(s: &str) -> Result<Vec<Self>> {
        s.split(',')
            .enumerate()
            .map(|(i, part)| {
                if part.trim().is_empty() {
                    return Err(AdvisorError::InvalidInput(format!(
                        "missing weather outlook for day {}",
                        i + 1
                    )));
                }
                Self::parse(part)
            })
            .collect()
    }

    pub fn next(&self) -> Self {
        match self {
            DayOutlook::Sunny => DayOutlook::Cloudy,
            DayOutlook::Cloudy => DayOutlook::Rain,
            DayOutlook::Rain => DayOutlook::Sunny,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            DayOutlook::Sunny => "☀",
            DayOutlook::Cloudy => "☁",
            DayOutlook::Rain => "🌧",
        }
    }
}

impl std::fmt::Display for DayOutlook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day_label: String,
    pub temp_c: f64,
    pub condition: WeatherCondition,
    pub rain_mm: f64,
}

impl ForecastDay {
    pub fn new(day_label: &str, temp_c: f64, condition: WeatherCondition, rain_mm: f64) -> Self {
        Self {
            day_label: day_label.to_string(),
            temp_c,
            condition,
            rain_mm,
        }
    }
}

/// Where a snapshot came from. Display only; advice never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeatherOrigin {
    Live,
    #[default]
    Fallback,
}

impl WeatherOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherOrigin::Live => "OpenWeatherMap",
            WeatherOrigin::Fallback => "Fallback",
        }
    }
}

impl std::fmt::Display for WeatherOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
    pub wind_speed_ms: f64,
    pub condition: WeatherCondition,
    pub forecast: Vec<ForecastDay>,
    pub origin: WeatherOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    /// Fixed substitute used whenever the weather provider is unavailable
    pub fn fallback() -> Self {
        Self {
            location: "Unknown".to_string(),
            temperature_c: 22.0,
            humidity_pct: 65.0,
            rainfall_mm: 2.5,
            wind_speed_ms: 3.5,
            condition: WeatherCondition::Clouds,
            forecast: vec![
                ForecastDay::new("Mon", 23.0, WeatherCondition::Clouds, 0.0),
                ForecastDay::new("Tue", 25.0, WeatherCondition::Clear, 0.0),
                ForecastDay::new("Wed", 21.0, WeatherCondition::Rain, 5.2),
                ForecastDay::new("Thu", 24.0, WeatherCondition::Clouds, 1.0),
                ForecastDay::new("Fri", 26.0, WeatherCondition::Clear, 0.0),
            ],
            origin: WeatherOrigin::Fallback,
            fetched_at: None,
        }
    }

    /// Snapshot carrying only the two readings the crop recommender needs
    pub fn from_readings(rainfall_mm: f64, humidity_pct: f64) -> Self {
        Self {
            location: String::new(),
            temperature_c: 0.0,
            humidity_pct,
            rainfall_mm,
            wind_speed_ms: 0.0,
            condition: WeatherCondition::Other,
            forecast: Vec::new(),
            origin: WeatherOrigin::Live,
            fetched_at: None,
        }
    }

    /// Readings must be finite; everything except temperature must be non-negative
    pub fn validate(&self) -> Result<()> {
        if !self.temperature_c.is_finite() {
            return Err(AdvisorError::InvalidInput(
                "temperature must be a finite number".into(),
            ));
        }

        let readings = [
            ("humidity", self.humidity_pct),
            ("rainfall", self.rainfall_mm),
            ("wind speed", self.wind_speed_ms),
        ];
        for (name, value) in readings {
            if !value.is_finite() || value < 0.0 {
                return Err(AdvisorError::InvalidInput(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }

        Ok(())
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == WeatherOrigin::Fallback
    }
}
