use super::{Adjustment, DayContext, DraftEntry};
use crate::models::DayOutlook;

/// Crops that get extra water on every planned day
pub const WATER_LOVING_CROPS: &[&str] = &["Tomatoes", "Lettuce"];

const SUNNY_FACTOR: f64 = 1.2;
const WATER_LOVING_FACTOR: f64 = 1.1;

/// Sunny days: duration and volume up by 20%
pub struct SunnyWeatherAdjustment;

impl Adjustment for SunnyWeatherAdjustment {
    fn id(&self) -> &'static str {
        "sunny_weather"
    }

    fn name(&self) -> &'static str {
        "Sunny weather increase"
    }

    fn apply(&self, day: &DayContext<'_>, draft: &mut DraftEntry) {
        if day.outlook != DayOutlook::Sunny {
            return;
        }
        draft.duration_minutes *= SUNNY_FACTOR;
        draft.volume_liters *= SUNNY_FACTOR;
        draft.rationale.push_str(" (increased for sunny weather)");
    }
}

/// Volume up by 10% when any selected crop is water-loving
pub struct WaterLovingCropAdjustment;

impl WaterLovingCropAdjustment {
    pub fn detects(crops: &[String]) -> bool {
        crops.iter().any(|crop| {
            WATER_LOVING_CROPS
                .iter()
                .any(|w| w.eq_ignore_ascii_case(crop.trim()))
        })
    }
}

impl Adjustment for WaterLovingCropAdjustment {
    fn id(&self) -> &'static str {
        "water_loving_crops"
    }

    fn name(&self) -> &'static str {
        "Water-loving crop increase"
    }

    fn apply(&self, day: &DayContext<'_>, draft: &mut DraftEntry) {
        if !Self::detects(day.crops) {
            return;
        }
        draft.volume_liters *= WATER_LOVING_FACTOR;
        draft.rationale.push_str(" (water-loving crops detected)");
    }
}

/// Per-square-metre volume scaled by planted area
pub struct AreaScaling;

impl Adjustment for AreaScaling {
    fn id(&self) -> &'static str {
        "area_scaling"
    }

    fn name(&self) -> &'static str {
        "Area scaling"
    }

    fn apply(&self, day: &DayContext<'_>, draft: &mut DraftEntry) {
        draft.volume_liters *= day.area_hectares;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn draft() -> DraftEntry {
        DraftEntry {
            duration_minutes: 30.0,
            volume_liters: 5.0,
            rationale: "Loam soil - balanced watering".to_string(),
        }
    }

    fn context<'a>(outlook: DayOutlook, crops: &'a [String]) -> DayContext<'a> {
        DayContext {
            index: 0,
            day: Weekday::Monday,
            outlook,
            crops,
            area_hectares: 3.0,
        }
    }

    #[test]
    fn sunny_adjustment_only_on_sunny_days() {
        let crops = vec!["Maize".to_string()];

        let mut d = draft();
        SunnyWeatherAdjustment.apply(&context(DayOutlook::Sunny, &crops), &mut d);
        assert!((d.duration_minutes - 36.0).abs() < 1e-9);
        assert!((d.volume_liters - 6.0).abs() < 1e-9);
        assert!(d.rationale.ends_with("(increased for sunny weather)"));

        let mut d = draft();
        SunnyWeatherAdjustment.apply(&context(DayOutlook::Cloudy, &crops), &mut d);
        assert_eq!(d, draft());
    }

    #[test]
    fn water_loving_detection() {
        assert!(WaterLovingCropAdjustment::detects(&["Tomatoes".to_string()]));
        assert!(WaterLovingCropAdjustment::detects(&[
            "Maize".to_string(),
            "lettuce".to_string()
        ]));
        assert!(!WaterLovingCropAdjustment::detects(&["Maize".to_string()]));
        assert!(!WaterLovingCropAdjustment::detects(&[]));
    }

    #[test]
    fn water_loving_adjustment_leaves_duration_alone() {
        let crops = vec!["Tomatoes".to_string()];
        let mut d = draft();
        WaterLovingCropAdjustment.apply(&context(DayOutlook::Cloudy, &crops), &mut d);
        assert_eq!(d.duration_minutes, 30.0);
        assert!((d.volume_liters - 5.5).abs() < 1e-9);
        assert!(d.rationale.ends_with("(water-loving crops detected)"));
    }

    #[test]
    fn area_scaling_multiplies_volume() {
        let crops = vec!["Maize".to_string()];
        let mut d = draft();
        AreaScaling.apply(&context(DayOutlook::Cloudy, &crops), &mut d);
        assert_eq!(d.volume_liters, 15.0);
        assert_eq!(d.rationale, draft().rationale);
    }
}
