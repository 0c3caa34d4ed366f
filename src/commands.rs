//! Non-interactive subcommands. Each returns the text to print so the
//! binary stays a thin dispatcher.

use crate::config::{split_list, Config};
use crate::db::{load_plan, save_plan, PlanStore};
use crate::error::{AdvisorError, Result};
use crate::logic::tables::soil_profiles;
use crate::logic::{generate_schedule, moisture_regime, recommend};
use crate::models::{
    CropSuitabilityEntry, DayOutlook, PlanState, SavedPlan, SoilType, WeatherSnapshot, Weekday,
};
use std::fmt::Write;

/// Flag values for `schedule`; `None` falls back to the farm config
#[derive(Debug, Default)]
pub struct ScheduleArgs {
    pub soil: Option<String>,
    pub crops: Option<String>,
    pub area: Option<f64>,
    pub forecast: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAction {
    Complete,
    Undo,
}

pub fn resolve_soil(flag: Option<&str>, config: &Config) -> Result<Option<SoilType>> {
    match flag {
        Some(label) => SoilType::parse(label).map(Some),
        None => config.farm.soil(),
    }
}

pub fn soils_report() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<7} {:<10} {:<10} {:>8} {:>8}  {}",
        "Soil", "Retention", "Frequency", "Minutes", "L/m²", "Regime"
    );
    for profile in soil_profiles() {
        let _ = writeln!(
            out,
            "{:<7} {:<10} {:<10} {:>8.0} {:>8.0}  {}",
            profile.soil_type.as_str(),
            profile.water_retention.as_str(),
            profile.irrigation_frequency.as_str(),
            profile.base_duration_minutes,
            profile.base_volume_liters_per_m2,
            profile.schedule_note.unwrap_or("default")
        );
    }
    out
}

pub fn weather_report(weather: &WeatherSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Location:    {} ({})", weather.location, weather.origin);
    let _ = writeln!(
        out,
        "Conditions:  {} {:.1}°C, humidity {:.0}%, rain {:.1} mm, wind {:.1} m/s",
        weather.condition,
        weather.temperature_c,
        weather.humidity_pct,
        weather.rainfall_mm,
        weather.wind_speed_ms
    );
    let _ = writeln!(out, "Regime:      {}", moisture_regime(weather));
    for day in &weather.forecast {
        let _ = writeln!(
            out,
            "  {:<4} {:>5.1}°C  {:<12} {:>5.1} mm",
            day.day_label,
            day.temp_c,
            day.condition.as_str(),
            day.rain_mm
        );
    }
    out
}

pub fn recommend_report(
    soil: Option<SoilType>,
    weather: &WeatherSnapshot,
) -> Result<String> {
    let soil = soil.ok_or_else(|| {
        AdvisorError::Validation("select a soil type (--soil or farm.soil_type)".into())
    })?;
    let entries = recommend(soil, weather)?;
    Ok(format_recommendations(soil, weather, &entries))
}

fn format_recommendations(
    soil: SoilType,
    weather: &WeatherSnapshot,
    entries: &[CropSuitabilityEntry],
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} soil, {} conditions ({} weather)",
        soil,
        moisture_regime(weather),
        weather.origin
    );

    if entries.is_empty() {
        let _ = writeln!(out, "No specific recommendations for these conditions.");
        return out;
    }

    for entry in entries {
        let _ = writeln!(out, "- {} [{}]", entry.crop_name, entry.suitability);
        if !entry.planting_window.is_empty() {
            let _ = writeln!(
                out,
                "    plant {} / harvest {}",
                entry.planting_window, entry.harvest_window
            );
        }
        if !entry.expected_yield_range.is_empty() {
            let _ = writeln!(out, "    yield {}", entry.expected_yield_range);
        }
        for note in &entry.notes {
            let _ = writeln!(out, "    {}", note);
        }
    }
    out
}

/// Generate a plan from flags and config, persist it and return it
pub fn schedule(store: &dyn PlanStore, config: &Config, args: &ScheduleArgs) -> Result<SavedPlan> {
    let soil = resolve_soil(args.soil.as_deref(), config)?;

    let crops = match args.crops {
        Some(ref raw) => split_list(raw),
        None => config.farm.crops.clone(),
    };

    let area = args
        .area
        .or(config.farm.area_hectares)
        .ok_or_else(|| AdvisorError::Validation("enter the planted area (--area)".into()))?;

    let forecast = match args.forecast {
        Some(ref raw) => DayOutlook::parse_list(raw)?,
        None => config.farm.outlook()?.ok_or_else(|| {
            AdvisorError::Validation(
                "provide a 7-day outlook (--forecast or farm.weekly_outlook)".into(),
            )
        })?,
    };

    let entries = generate_schedule(soil, &crops, area, &forecast)?;
    let soil = soil.ok_or_else(|| AdvisorError::Validation("select a soil type".into()))?;

    let plan = SavedPlan::new(soil, crops, area, entries);
    save_plan(store, &plan)?;
    Ok(plan)
}

/// Apply a completion change to the saved plan and persist it
pub fn update_plan(store: &dyn PlanStore, day_label: &str, action: PlanAction) -> Result<SavedPlan> {
    let day = Weekday::from_str(day_label)
        .ok_or_else(|| AdvisorError::InvalidInput(format!("unknown day '{}'", day_label)))?;

    let mut plan = load_plan(store)?.ok_or_else(|| {
        AdvisorError::NotFound("no saved plan - run `farm2city schedule` first".into())
    })?;

    let entry = plan.entry_mut(day)?;
    match action {
        PlanAction::Complete => entry.complete()?,
        PlanAction::Undo => entry.reopen()?,
    }

    save_plan(store, &plan)?;
    Ok(plan)
}

pub fn plan_report(plan: &SavedPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} soil, {:.2} ha, crops: {} (generated {})",
        plan.soil_type,
        plan.area_hectares,
        plan.crops.join(", "),
        plan.generated_at.format("%Y-%m-%d %H:%M UTC")
    );

    for entry in &plan.entries {
        let _ = write!(out, "{} {:<9} ", entry.state.symbol(), entry.day.as_str());
        if entry.state == PlanState::Skipped {
            let _ = writeln!(out, "-      skipped    {}", entry.rationale);
        } else {
            let _ = writeln!(
                out,
                "{} {:>3} min {:>8.1} L  {}",
                entry.scheduled_time, entry.duration_minutes, entry.volume_liters, entry.rationale
            );
        }
    }

    let _ = writeln!(
        out,
        "Completed {}/{} watering days, {:.1} L planned",
        plan.completed_count(),
        plan.entries.len() - plan.skipped_count(),
        plan.total_volume_liters()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn config() -> Config {
        let mut config = Config::default();
        config.farm.soil_type = Some("clay".into());
        config.farm.crops = vec!["Tomatoes".into()];
        config.farm.area_hectares = Some(2.0);
        config
    }

    fn midweek_rain_args() -> ScheduleArgs {
        ScheduleArgs {
            forecast: Some("sunny,cloudy,rain,cloudy,sunny,sunny,cloudy".into()),
            ..Default::default()
        }
    }

    #[test]
    fn schedule_uses_config_defaults_and_persists() {
        let db = Database::open_in_memory().unwrap();
        let plan = schedule(&db, &config(), &midweek_rain_args()).unwrap();

        assert_eq!(plan.entries[0].duration_minutes, 54);
        assert_eq!(plan.entries[0].volume_liters, 21.1);
        assert_eq!(plan.entries[3].scheduled_time, "18:00");
        assert!(plan.entries[2].is_skipped());
        assert_eq!(load_plan(&db).unwrap().unwrap().entries, plan.entries);
    }

    #[test]
    fn flags_override_config() {
        let db = Database::open_in_memory().unwrap();
        let args = ScheduleArgs {
            soil: Some("sand".into()),
            crops: Some("Maize".into()),
            area: Some(0.5),
            forecast: Some("sunny,sunny,sunny,sunny,sunny,sunny,sunny".into()),
        };
        let plan = schedule(&db, &config(), &args).unwrap();
        assert_eq!(plan.soil_type, SoilType::Sand);
        assert_eq!(plan.entries[0].duration_minutes, 24);
        assert_eq!(plan.entries[0].volume_liters, 1.8);
    }

    #[test]
    fn schedule_without_outlook_fails_validation() {
        let db = Database::open_in_memory().unwrap();
        let err = schedule(&db, &config(), &ScheduleArgs::default()).unwrap_err();
        assert!(matches!(err, AdvisorError::Validation(_)));
        assert!(load_plan(&db).unwrap().is_none());
    }

    #[test]
    fn short_forecast_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let args = ScheduleArgs {
            forecast: Some("sunny,rain".into()),
            ..Default::default()
        };
        assert!(matches!(
            schedule(&db, &config(), &args),
            Err(AdvisorError::Validation(_))
        ));
    }

    #[test]
    fn complete_and_undo_round_trip() {
        let db = Database::open_in_memory().unwrap();
        schedule(&db, &config(), &midweek_rain_args()).unwrap();

        let plan = update_plan(&db, "mon", PlanAction::Complete).unwrap();
        assert_eq!(plan.entries[0].state, PlanState::Completed);
        assert_eq!(plan.entries[0].duration_minutes, 54);

        let plan = update_plan(&db, "Monday", PlanAction::Undo).unwrap();
        assert_eq!(plan.entries[0].state, PlanState::Scheduled);
    }

    #[test]
    fn completing_skipped_day_fails() {
        let db = Database::open_in_memory().unwrap();
        schedule(&db, &config(), &midweek_rain_args()).unwrap();

        let err = update_plan(&db, "wed", PlanAction::Complete).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidTransition { .. }));
        let stored = load_plan(&db).unwrap().unwrap();
        assert_eq!(stored.entries[2].state, PlanState::Skipped);
    }

    #[test]
    fn update_without_plan_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            update_plan(&db, "mon", PlanAction::Complete),
            Err(AdvisorError::NotFound(_))
        ));
        assert!(matches!(
            update_plan(&db, "someday", PlanAction::Complete),
            Err(AdvisorError::InvalidInput(_))
        ));
    }

    #[test]
    fn recommend_report_lists_crops() {
        let weather = WeatherSnapshot::from_readings(3.0, 80.0);
        let text = recommend_report(Some(SoilType::Loam), &weather).unwrap();
        assert!(text.contains("- Maize [Excellent]"));

        let text = recommend_report(Some(SoilType::Chalk), &WeatherSnapshot::from_readings(0.0, 30.0))
            .unwrap();
        assert!(text.contains("No specific recommendations"));

        assert!(recommend_report(None, &weather).is_err());
    }

    #[test]
    fn unknown_soil_flag_is_invalid_input() {
        assert!(matches!(
            resolve_soil(Some("gravel"), &config()),
            Err(AdvisorError::InvalidInput(_))
        ));
        assert_eq!(resolve_soil(None, &config()).unwrap(), Some(SoilType::Clay));
    }

    #[test]
    fn soils_report_has_every_soil() {
        let text = soils_report();
        for soil in SoilType::all() {
            assert!(text.contains(soil.as_str()));
        }
        assert!(text.contains("Clay soil - deep, less frequent watering"));
    }

    #[test]
    fn plan_report_summarises() {
        let db = Database::open_in_memory().unwrap();
        let plan = schedule(&db, &config(), &midweek_rain_args()).unwrap();
        let text = plan_report(&plan);
        assert!(text.contains("Skipped due to expected rainfall"));
        assert!(text.contains("Completed 0/6 watering days"));
    }
}
