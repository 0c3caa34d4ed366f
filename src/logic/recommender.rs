use super::tables;
use crate::error::Result;
use crate::models::{CropSuitabilityEntry, MoistureRegime, SoilType, WeatherSnapshot};

/// Rainfall above this many millimetres counts as wet conditions
pub const WET_RAINFALL_MM: f64 = 1.0;
/// Relative humidity above this percentage counts as wet conditions
pub const WET_HUMIDITY_PCT: f64 = 70.0;

/// Classify current conditions as wet or dry.
///
/// Wet if rainfall exceeds 1 mm or humidity exceeds 70%; both bounds are strict.
pub fn moisture_regime(weather: &WeatherSnapshot) -> MoistureRegime {
    if weather.rainfall_mm > WET_RAINFALL_MM || weather.humidity_pct > WET_HUMIDITY_PCT {
        MoistureRegime::Wet
    } else {
        MoistureRegime::Dry
    }
}

/// Crops suited to `soil_type` under the current weather, in table order.
///
/// An empty result means there is no specific advice for these conditions.
pub fn recommend(soil_type: SoilType, weather: &WeatherSnapshot) -> Result<Vec<CropSuitabilityEntry>> {
    weather.validate()?;

    let regime = moisture_regime(weather);
    let entries = tables::crop_entries(soil_type, regime);

    tracing::debug!(
        soil = %soil_type,
        regime = %regime,
        rainfall_mm = weather.rainfall_mm,
        humidity_pct = weather.humidity_pct,
        matches = entries.len(),
        "Evaluated crop suitability"
    );

    Ok(entries)
}
