//! Static reference data: soil irrigation profiles and crop suitability rows.

use crate::models::{
    CropSuitabilityEntry, Level, MoistureRegime, SoilProfile, SoilType, Suitability,
};

/// Default irrigation parameters for soils without a dedicated regime
pub const DEFAULT_DURATION_MINUTES: f64 = 30.0;
pub const DEFAULT_VOLUME_LITERS_PER_M2: f64 = 5.0;
pub const DEFAULT_RATIONALE: &str = "Regular irrigation schedule.";

static SOIL_PROFILES: [SoilProfile; 6] = [
    SoilProfile {
        soil_type: SoilType::Clay,
        water_retention: Level::High,
        irrigation_frequency: Level::Low,
        base_duration_minutes: 45.0,
        base_volume_liters_per_m2: 8.0,
        schedule_note: Some("Clay soil - deep, less frequent watering"),
    },
    SoilProfile {
        soil_type: SoilType::Sand,
        water_retention: Level::VeryLow,
        irrigation_frequency: Level::VeryHigh,
        base_duration_minutes: 20.0,
        base_volume_liters_per_m2: 3.0,
        schedule_note: Some("Sandy soil - frequent, light watering"),
    },
    SoilProfile {
        soil_type: SoilType::Loam,
        water_retention: Level::Medium,
        irrigation_frequency: Level::Medium,
        base_duration_minutes: 30.0,
        base_volume_liters_per_m2: 5.0,
        schedule_note: Some("Loam soil - balanced watering"),
    },
    SoilProfile {
        soil_type: SoilType::Silt,
        water_retention: Level::High,
        irrigation_frequency: Level::Medium,
        base_duration_minutes: DEFAULT_DURATION_MINUTES,
        base_volume_liters_per_m2: DEFAULT_VOLUME_LITERS_PER_M2,
        schedule_note: None,
    },
    SoilProfile {
        soil_type: SoilType::Peat,
        water_retention: Level::VeryHigh,
        irrigation_frequency: Level::Low,
        base_duration_minutes: DEFAULT_DURATION_MINUTES,
        base_volume_liters_per_m2: DEFAULT_VOLUME_LITERS_PER_M2,
        schedule_note: None,
    },
    SoilProfile {
        soil_type: SoilType::Chalk,
        water_retention: Level::Low,
        irrigation_frequency: Level::High,
        base_duration_minutes: DEFAULT_DURATION_MINUTES,
        base_volume_liters_per_m2: DEFAULT_VOLUME_LITERS_PER_M2,
        schedule_note: None,
    },
];

pub fn soil_profiles() -> &'static [SoilProfile] {
    &SOIL_PROFILES
}

pub fn soil_profile(soil_type: SoilType) -> &'static SoilProfile {
    // One row per variant, in declaration order
    match soil_type {
        SoilType::Clay => &SOIL_PROFILES[0],
        SoilType::Sand => &SOIL_PROFILES[1],
        SoilType::Loam => &SOIL_PROFILES[2],
        SoilType::Silt => &SOIL_PROFILES[3],
        SoilType::Peat => &SOIL_PROFILES[4],
        SoilType::Chalk => &SOIL_PROFILES[5],
    }
}

struct CropRow {
    crop: &'static str,
    soil: SoilType,
    regime: MoistureRegime,
    suitability: Suitability,
    planting: &'static str,
    harvest: &'static str,
    yield_range: &'static str,
    notes: &'static [&'static str],
}

impl CropRow {
    fn to_entry(&self) -> CropSuitabilityEntry {
        let entry = CropSuitabilityEntry::new(self.crop, self.soil, self.regime, self.suitability)
            .with_windows(self.planting, self.harvest)
            .with_yield(self.yield_range);
        self.notes.iter().fold(entry, |e, note| e.with_note(note))
    }
}

// Rows are returned in stored order, so keep the strongest candidate first
const CROP_ROWS: &[CropRow] = &[
    // Loam
    CropRow {
        crop: "Maize",
        soil: SoilType::Loam,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Excellent,
        planting: "March - April",
        harvest: "July - August",
        yield_range: "4-6 tons/hectare",
        notes: &[
            "Plant at the onset of the long rains",
            "Apply nitrogen top-dressing at knee height",
        ],
    },
    CropRow {
        crop: "Tomatoes",
        soil: SoilType::Loam,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Good,
        planting: "February - March",
        harvest: "May - July",
        yield_range: "20-30 tons/hectare",
        notes: &[
            "Stake plants early to keep fruit off wet soil",
            "Watch for blight in humid spells",
        ],
    },
    CropRow {
        crop: "Lettuce",
        soil: SoilType::Loam,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Good,
        planting: "Year-round",
        harvest: "6-8 weeks after planting",
        yield_range: "15-25 tons/hectare",
        notes: &["Succession-sow every 2-3 weeks"],
    },
    CropRow {
        crop: "Sorghum",
        soil: SoilType::Loam,
        regime: MoistureRegime::Dry,
        suitability: Suitability::Excellent,
        planting: "March - April",
        harvest: "August - September",
        yield_range: "2-4 tons/hectare",
        notes: &["Tolerates dry spells once established"],
    },
    CropRow {
        crop: "Beans",
        soil: SoilType::Loam,
        regime: MoistureRegime::Dry,
        suitability: Suitability::Good,
        planting: "March or October",
        harvest: "June or January",
        yield_range: "1-2 tons/hectare",
        notes: &[
            "Fixes nitrogen for the following crop",
            "Mulch to conserve moisture",
        ],
    },
    // Clay
    CropRow {
        crop: "Rice",
        soil: SoilType::Clay,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Excellent,
        planting: "April - May",
        harvest: "September - October",
        yield_range: "4-7 tons/hectare",
        notes: &["Clay holds standing water for paddy cultivation"],
    },
    CropRow {
        crop: "Cabbage",
        soil: SoilType::Clay,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Good,
        planting: "February - March",
        harvest: "May - June",
        yield_range: "30-40 tons/hectare",
        notes: &["Ensure drainage to avoid root rot"],
    },
    CropRow {
        crop: "Wheat",
        soil: SoilType::Clay,
        regime: MoistureRegime::Dry,
        suitability: Suitability::Good,
        planting: "October - November",
        harvest: "March - April",
        yield_range: "3-5 tons/hectare",
        notes: &["Break up clods before sowing"],
    },
    CropRow {
        crop: "Sunflower",
        soil: SoilType::Clay,
        regime: MoistureRegime::Dry,
        suitability: Suitability::Fair,
        planting: "April - May",
        harvest: "August - September",
        yield_range: "1-2 tons/hectare",
        notes: &["Deep taproot reaches stored subsoil moisture"],
    },
    // Sand
    CropRow {
        crop: "Carrots",
        soil: SoilType::Sand,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Good,
        planting: "March - May",
        harvest: "June - August",
        yield_range: "25-35 tons/hectare",
        notes: &["Loose soil gives straight, uniform roots"],
    },
    CropRow {
        crop: "Watermelon",
        soil: SoilType::Sand,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Good,
        planting: "April - May",
        harvest: "July - August",
        yield_range: "20-40 tons/hectare",
        notes: &["Feed regularly; sandy soil leaches nutrients"],
    },
    CropRow {
        crop: "Cassava",
        soil: SoilType::Sand,
        regime: MoistureRegime::Dry,
        suitability: Suitability::Excellent,
        planting: "March - May",
        harvest: "9-12 months after planting",
        yield_range: "10-20 tons/hectare",
        notes: &["Highly drought tolerant"],
    },
    CropRow {
        crop: "Groundnuts",
        soil: SoilType::Sand,
        regime: MoistureRegime::Dry,
        suitability: Suitability::Good,
        planting: "April - May",
        harvest: "August - September",
        yield_range: "1-3 tons/hectare",
        notes: &["Pegs penetrate light soil easily"],
    },
    // Silt
    CropRow {
        crop: "Onions",
        soil: SoilType::Silt,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Excellent,
        planting: "January - February",
        harvest: "May - June",
        yield_range: "25-35 tons/hectare",
        notes: &["Stop watering two weeks before harvest"],
    },
    CropRow {
        crop: "Spinach",
        soil: SoilType::Silt,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Good,
        planting: "Year-round",
        harvest: "5-7 weeks after planting",
        yield_range: "10-15 tons/hectare",
        notes: &["Harvest outer leaves continuously"],
    },
    CropRow {
        crop: "Barley",
        soil: SoilType::Silt,
        regime: MoistureRegime::Dry,
        suitability: Suitability::Fair,
        planting: "October - November",
        harvest: "April - May",
        yield_range: "2-4 tons/hectare",
        notes: &["Avoid crusting by shallow cultivation after rain"],
    },
    // Peat
    CropRow {
        crop: "Potatoes",
        soil: SoilType::Peat,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Good,
        planting: "March - April",
        harvest: "July - September",
        yield_range: "20-30 tons/hectare",
        notes: &["Add lime to correct acidity", "Earth up as stems grow"],
    },
    CropRow {
        crop: "Celery",
        soil: SoilType::Peat,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Fair,
        planting: "April - May",
        harvest: "August - October",
        yield_range: "40-60 tons/hectare",
        notes: &["Needs constant moisture"],
    },
    CropRow {
        crop: "Blueberries",
        soil: SoilType::Peat,
        regime: MoistureRegime::Dry,
        suitability: Suitability::Fair,
        planting: "November - March",
        harvest: "June - August",
        yield_range: "5-10 tons/hectare",
        notes: &["Thrives in acidic soil", "Mulch heavily in dry weather"],
    },
    // Chalk has no dry-season rows
    CropRow {
        crop: "Spinach",
        soil: SoilType::Chalk,
        regime: MoistureRegime::Wet,
        suitability: Suitability::Fair,
        planting: "March - April",
        harvest: "May - June",
        yield_range: "8-12 tons/hectare",
        notes: &["Add organic matter to improve retention"],
    },
];

/// All rows for the given key, in stored order. May be empty.
pub fn crop_entries(soil_type: SoilType, regime: MoistureRegime) -> Vec<CropSuitabilityEntry> {
    CROP_ROWS
        .iter()
        .filter(|row| row.soil == soil_type && row.regime == regime)
        .map(CropRow::to_entry)
        .collect()
}
