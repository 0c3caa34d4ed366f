use super::adjustments::{AreaScaling, SunnyWeatherAdjustment, WaterLovingCropAdjustment};
use super::{Adjustment, DayContext, DraftEntry};
use crate::error::{AdvisorError, Result};
use crate::logic::tables::{self, DEFAULT_RATIONALE};
use crate::models::{DayOutlook, IrrigationPlanEntry, PlanState, SoilType, Weekday};

/// Length of the planning horizon
pub const PLAN_DAYS: usize = 7;

const MORNING_SLOT: &str = "06:00";
const EVENING_SLOT: &str = "18:00";
const RAIN_RATIONALE: &str = "Skipped due to expected rainfall";

#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub soil_type: Option<SoilType>,
    pub crops: Vec<String>,
    pub area_hectares: f64,
    pub weekly_forecast: Vec<DayOutlook>,
}

impl ScheduleRequest {
    pub fn new(
        soil_type: Option<SoilType>,
        crops: Vec<String>,
        area_hectares: f64,
        weekly_forecast: Vec<DayOutlook>,
    ) -> Self {
        Self {
            soil_type,
            crops,
            area_hectares,
            weekly_forecast,
        }
    }

    pub fn validate(&self) -> Result<SoilType> {
        let soil_type = self
            .soil_type
            .ok_or_else(|| AdvisorError::Validation("select a soil type".into()))?;

        if self.crops.iter().all(|c| c.trim().is_empty()) {
            return Err(AdvisorError::Validation("select at least one crop".into()));
        }

        if !self.area_hectares.is_finite() || self.area_hectares <= 0.0 {
            return Err(AdvisorError::Validation(format!(
                "area must be a positive number of hectares (got {})",
                self.area_hectares
            )));
        }

        if self.weekly_forecast.len() != PLAN_DAYS {
            return Err(AdvisorError::Validation(format!(
                "weekly forecast needs exactly {} days (got {})",
                PLAN_DAYS,
                self.weekly_forecast.len()
            )));
        }

        Ok(soil_type)
    }
}

pub struct IrrigationScheduler {
    adjustments: Vec<Box<dyn Adjustment>>,
}

impl IrrigationScheduler {
    pub fn new() -> Self {
        // weather -> crops -> area
        let adjustments: Vec<Box<dyn Adjustment>> = vec![
            Box::new(SunnyWeatherAdjustment),
            Box::new(WaterLovingCropAdjustment),
            Box::new(AreaScaling),
        ];

        Self { adjustments }
    }

    /// Build the Monday..Sunday plan for a validated request
    pub fn generate(&self, request: &ScheduleRequest) -> Result<Vec<IrrigationPlanEntry>> {
        let soil_type = request.validate()?;
        let profile = tables::soil_profile(soil_type);
        let base_rationale = profile.schedule_note.unwrap_or(DEFAULT_RATIONALE);

        tracing::debug!(
            soil = %soil_type,
            duration = profile.base_duration_minutes,
            volume = profile.base_volume_liters_per_m2,
            crops = request.crops.len(),
            area_hectares = request.area_hectares,
            "Generating irrigation schedule"
        );

        let entries = Weekday::all()
            .iter()
            .zip(request.weekly_forecast.iter())
            .enumerate()
            .map(|(index, (day, outlook))| {
                let ctx = DayContext {
                    index,
                    day: *day,
                    outlook: *outlook,
                    crops: &request.crops,
                    area_hectares: request.area_hectares,
                };
                let draft = DraftEntry {
                    duration_minutes: profile.base_duration_minutes,
                    volume_liters: profile.base_volume_liters_per_m2,
                    rationale: base_rationale.to_string(),
                };
                self.plan_day(&ctx, draft)
            })
            .collect();

        Ok(entries)
    }

    fn plan_day(&self, ctx: &DayContext<'_>, mut draft: DraftEntry) -> IrrigationPlanEntry {
        let scheduled_time = if ctx.index % 2 == 0 {
            MORNING_SLOT
        } else {
            EVENING_SLOT
        };

        if ctx.outlook == DayOutlook::Rain {
            tracing::debug!(day = %ctx.day, "Skipping irrigation for expected rain");
            return IrrigationPlanEntry {
                day: ctx.day,
                scheduled_time: scheduled_time.to_string(),
                duration_minutes: 0,
                volume_liters: 0.0,
                rationale: RAIN_RATIONALE.to_string(),
                state: PlanState::Skipped,
                outlook: ctx.outlook,
            };
        }

        for adjustment in &self.adjustments {
            adjustment.apply(ctx, &mut draft);
        }

        IrrigationPlanEntry {
            day: ctx.day,
            scheduled_time: scheduled_time.to_string(),
            duration_minutes: draft.duration_minutes.round() as u32,
            volume_liters: round_to_tenth(draft.volume_liters),
            rationale: draft.rationale,
            state: PlanState::Scheduled,
            outlook: ctx.outlook,
        }
    }

    pub fn list_adjustments(&self) -> Vec<(&'static str, &'static str)> {
        self.adjustments.iter().map(|a| (a.id(), a.name())).collect()
    }
}

impl Default for IrrigationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a 7-day irrigation plan with the standard adjustment order
pub fn generate_schedule(
    soil_type: Option<SoilType>,
    selected_crops: &[String],
    area_hectares: f64,
    weekly_forecast: &[DayOutlook],
) -> Result<Vec<IrrigationPlanEntry>> {
    let request = ScheduleRequest::new(
        soil_type,
        selected_crops.to_vec(),
        area_hectares,
        weekly_forecast.to_vec(),
    );
    IrrigationScheduler::new().generate(&request)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn crops(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn week(labels: &[&str]) -> Vec<DayOutlook> {
        labels.iter().map(|l| DayOutlook::parse(l).unwrap()).collect()
    }

    #[test]
    fn clay_tomatoes_two_hectares() {
        let forecast = week(&[
            "sunny", "sunny", "rain", "cloudy", "sunny", "sunny", "cloudy",
        ]);
        let plan =
            generate_schedule(Some(SoilType::Clay), &crops(&["Tomatoes"]), 2.0, &forecast)
                .unwrap();

        let wednesday = &plan[2];
        assert_eq!(wednesday.day, Weekday::Wednesday);
        assert_eq!(wednesday.state, PlanState::Skipped);
        assert_eq!(wednesday.duration_minutes, 0);
        assert_eq!(wednesday.volume_liters, 0.0);
        assert_eq!(wednesday.rationale, "Skipped due to expected rainfall");

        let monday = &plan[0];
        assert_eq!(monday.day, Weekday::Monday);
        assert_eq!(monday.duration_minutes, 54);
        assert_eq!(monday.volume_liters, 21.1);
        assert_eq!(monday.scheduled_time, "06:00");
        assert_eq!(monday.state, PlanState::Scheduled);
        assert_eq!(
            monday.rationale,
            "Clay soil - deep, less frequent watering (increased for sunny weather) \
             (water-loving crops detected)"
        );

        let thursday = &plan[3];
        assert_eq!(thursday.duration_minutes, 45);
        assert_eq!(thursday.volume_liters, 17.6);
        assert_eq!(thursday.scheduled_time, "18:00");
    }

    #[test]
    fn time_slots_alternate_by_day_index() {
        let plan = generate_schedule(
            Some(SoilType::Loam),
            &crops(&["Maize"]),
            1.0,
            &[DayOutlook::Cloudy; PLAN_DAYS],
        )
        .unwrap();

        let slots: Vec<&str> = plan.iter().map(|e| e.scheduled_time.as_str()).collect();
        assert_eq!(
            slots,
            vec!["06:00", "18:00", "06:00", "18:00", "06:00", "18:00", "06:00"]
        );
    }

    #[test]
    fn soils_without_custom_regime_use_defaults() {
        for soil in [SoilType::Silt, SoilType::Peat, SoilType::Chalk] {
            let plan = generate_schedule(
                Some(soil),
                &crops(&["Maize"]),
                1.0,
                &[DayOutlook::Cloudy; PLAN_DAYS],
            )
            .unwrap();
            assert!(plan.iter().all(|e| e.duration_minutes == 30));
            assert!(plan.iter().all(|e| e.volume_liters == 5.0));
            assert!(plan.iter().all(|e| e.rationale == DEFAULT_RATIONALE));
        }
    }

    #[test]
    fn sandy_soil_sunny_day() {
        let plan = generate_schedule(
            Some(SoilType::Sand),
            &crops(&["Cassava"]),
            0.5,
            &[DayOutlook::Sunny; PLAN_DAYS],
        )
        .unwrap();

        assert_eq!(plan[0].duration_minutes, 24);
        assert_eq!(plan[0].volume_liters, 1.8);
        assert_eq!(
            plan[0].rationale,
            "Sandy soil - frequent, light watering (increased for sunny weather)"
        );
    }

    #[test]
    fn missing_soil_type_is_a_validation_error() {
        let err = generate_schedule(
            None,
            &crops(&["Maize"]),
            1.0,
            &[DayOutlook::Sunny; PLAN_DAYS],
        )
        .unwrap_err();
        assert!(matches!(err, AdvisorError::Validation(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn empty_crop_selection_is_a_validation_error() {
        for selection in [crops(&[]), crops(&["  "])] {
            assert!(matches!(
                generate_schedule(
                    Some(SoilType::Loam),
                    &selection,
                    1.0,
                    &[DayOutlook::Sunny; PLAN_DAYS]
                ),
                Err(AdvisorError::Validation(_))
            ));
        }
    }

    #[test]
    fn non_positive_area_is_rejected() {
        for area in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                generate_schedule(
                    Some(SoilType::Loam),
                    &crops(&["Maize"]),
                    area,
                    &[DayOutlook::Sunny; PLAN_DAYS]
                ),
                Err(AdvisorError::Validation(_))
            ));
        }
    }

    #[test]
    fn forecast_must_cover_exactly_seven_days() {
        for len in [0, 5, 6, 8] {
            let forecast = vec![DayOutlook::Cloudy; len];
            assert!(matches!(
                generate_schedule(Some(SoilType::Loam), &crops(&["Maize"]), 1.0, &forecast),
                Err(AdvisorError::Validation(_))
            ));
        }
    }

    #[test]
    fn adjustments_run_in_fixed_order() {
        let ids: Vec<&str> = IrrigationScheduler::new()
            .list_adjustments()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec!["sunny_weather", "water_loving_crops", "area_scaling"]);
    }

    #[test]
    fn round_to_tenth_values() {
        assert_eq!(round_to_tenth(21.12), 21.1);
        assert_eq!(round_to_tenth(17.66), 17.7);
        assert_eq!(round_to_tenth(3.0), 3.0);
    }

    fn outlook_strategy() -> impl Strategy<Value = DayOutlook> {
        prop_oneof![
            Just(DayOutlook::Sunny),
            Just(DayOutlook::Cloudy),
            Just(DayOutlook::Rain),
        ]
    }

    fn soil_strategy() -> impl Strategy<Value = SoilType> {
        prop::sample::select(SoilType::all().to_vec())
    }

    fn crop_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop::sample::select(vec!["Tomatoes", "Lettuce", "Maize", "Beans", "Rice"]),
            1..4,
        )
        .prop_map(|v| v.into_iter().map(String::from).collect())
    }

    proptest! {
        #[test]
        fn schedule_is_deterministic(
            soil in soil_strategy(),
            selection in crop_strategy(),
            area in 0.1f64..50.0,
            forecast in prop::collection::vec(outlook_strategy(), PLAN_DAYS),
        ) {
            let first = generate_schedule(Some(soil), &selection, area, &forecast).unwrap();
            let second = generate_schedule(Some(soil), &selection, area, &forecast).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn rain_always_skips(
            soil in soil_strategy(),
            selection in crop_strategy(),
            area in 0.1f64..50.0,
            forecast in prop::collection::vec(outlook_strategy(), PLAN_DAYS),
        ) {
            let plan = generate_schedule(Some(soil), &selection, area, &forecast).unwrap();
            for (entry, outlook) in plan.iter().zip(forecast.iter()) {
                if *outlook == DayOutlook::Rain {
                    prop_assert_eq!(entry.state, PlanState::Skipped);
                    prop_assert_eq!(entry.duration_minutes, 0);
                    prop_assert_eq!(entry.volume_liters, 0.0);
                } else {
                    prop_assert_eq!(entry.state, PlanState::Scheduled);
                }
            }
        }

        #[test]
        fn plan_is_seven_days_monday_first(
            soil in soil_strategy(),
            selection in crop_strategy(),
            forecast in prop::collection::vec(outlook_strategy(), PLAN_DAYS),
        ) {
            let plan = generate_schedule(Some(soil), &selection, 1.0, &forecast).unwrap();
            prop_assert_eq!(plan.len(), PLAN_DAYS);
            for (entry, day) in plan.iter().zip(Weekday::all().iter()) {
                prop_assert_eq!(entry.day, *day);
            }
        }
    }
}
