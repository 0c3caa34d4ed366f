use crate::config::Config;
use crate::db::{load_plan, save_plan, Database};
use crate::error::{AdvisorError, Result};
use crate::logic::{generate_schedule, recommend};
use crate::logic::schedule::PLAN_DAYS;
use crate::models::{CropSuitabilityEntry, DayOutlook, SavedPlan, SoilType, WeatherSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Schedule,
    Crops,
    Weather,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Schedule),
            '2' => Some(Screen::Crops),
            '3' => Some(Screen::Weather),
            _ => None,
        }
    }
}

pub struct SelectionState {
    pub selected_index: usize,
}

impl SelectionState {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub config: Config,
    pub db: Database,

    // Farm inputs
    pub soil_type: Option<SoilType>,
    pub crops: Vec<String>,
    pub area_hectares: Option<f64>,
    /// Outlook the next regenerate will use; `None` until one is configured or saved
    pub weekly_outlook: Option<Vec<DayOutlook>>,

    // Derived data
    pub weather: WeatherSnapshot,
    pub recommendations: Vec<CropSuitabilityEntry>,
    pub plan: Option<SavedPlan>,

    // Screen states
    pub schedule_state: SelectionState,
    pub crops_state: SelectionState,

    // UI state
    pub status_message: Option<String>,
    pub refreshing: bool,
    pub needs_refresh: bool,
}

impl App {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let soil_type = config.farm.soil()?;
        let configured_outlook = config.farm.outlook()?;
        let plan = load_plan(&db)?;

        // A saved plan wins over the configured outlook so the grid matches what is shown.
        // A configured outlook of the wrong length is kept as-is and rejected on regenerate.
        let weekly_outlook = match plan {
            Some(ref p) if p.entries.len() == PLAN_DAYS => {
                Some(p.entries.iter().map(|e| e.outlook).collect())
            }
            _ => configured_outlook,
        };
        let area_hectares = config
            .farm
            .area_hectares
            .or_else(|| plan.as_ref().map(|p| p.area_hectares));

        Ok(Self {
            screen: Screen::Schedule,
            should_quit: false,
            soil_type,
            crops: config.farm.crops.clone(),
            area_hectares,
            weekly_outlook,
            config,
            db,
            weather: WeatherSnapshot::fallback(),
            recommendations: Vec::new(),
            plan,
            schedule_state: SelectionState::new(),
            crops_state: SelectionState::new(),
            status_message: None,
            refreshing: false,
            needs_refresh: false,
        })
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Refreshing weather...");
    }

    pub fn update_weather(&mut self, snapshot: WeatherSnapshot) {
        self.weather = snapshot;
        self.evaluate_crops();
    }

    pub fn evaluate_crops(&mut self) {
        let Some(soil_type) = self.soil_type else {
            self.recommendations.clear();
            self.set_status("No soil type configured - set farm.soil_type in config");
            return;
        };

        match recommend(soil_type, &self.weather) {
            Ok(entries) => {
                self.recommendations = entries;
                self.crops_state.selected_index = 0;
            }
            Err(e) => self.set_status(&e.to_string()),
        }
    }

    /// Build a fresh plan from the current inputs and persist it.
    ///
    /// On a validation failure the existing plan is left as it was.
    pub fn regenerate_plan(&mut self) {
        let plan = match self.build_plan() {
            Ok(plan) => plan,
            Err(e) => {
                self.set_status(&e.to_string());
                return;
            }
        };

        self.plan = Some(plan);
        self.persist_plan("Schedule generated");
    }

    fn build_plan(&self) -> Result<SavedPlan> {
        let area = self.area_hectares.ok_or_else(|| {
            AdvisorError::Validation("enter the planted area (farm.area_hectares)".into())
        })?;
        let outlook = self.weekly_outlook.as_deref().ok_or_else(|| {
            AdvisorError::Validation("provide a 7-day outlook (farm.weekly_outlook)".into())
        })?;

        let entries = generate_schedule(self.soil_type, &self.crops, area, outlook)?;
        let soil_type = self
            .soil_type
            .ok_or_else(|| AdvisorError::Validation("select a soil type".into()))?;

        Ok(SavedPlan::new(soil_type, self.crops.clone(), area, entries))
    }

    /// Flip the selected day between scheduled and completed
    pub fn toggle_selected(&mut self) {
        let index = self.schedule_state.selected_index;
        let Some(ref mut plan) = self.plan else {
            self.set_status("No plan yet - press g to generate one");
            return;
        };
        let Some(entry) = plan.entries.get_mut(index) else {
            return;
        };

        match entry.toggle() {
            Ok(state) => {
                let message = format!("{} marked {}", entry.day, state);
                self.persist_plan(&message);
            }
            Err(e) => self.set_status(&e.to_string()),
        }
    }

    /// Advance the selected day's outlook; takes effect on the next regenerate
    pub fn cycle_outlook(&mut self) {
        let index = self.schedule_state.selected_index;
        let Some(ref mut outlook) = self.weekly_outlook else {
            self.set_status("No weekly outlook - set farm.weekly_outlook in config");
            return;
        };
        if let Some(day) = outlook.get_mut(index) {
            *day = day.next();
            let message = format!("Outlook set to {} - press g to regenerate", day);
            self.set_status(&message);
        }
    }

    fn persist_plan(&mut self, success: &str) {
        let Some(ref plan) = self.plan else {
            return;
        };
        match save_plan(&self.db, plan) {
            Ok(()) => self.set_status(success),
            Err(e) => {
                tracing::warn!("Failed to save plan: {}", e);
                self.set_status(&format!("Save failed: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IrrigationPlanEntry, PlanState};

    fn test_config() -> Config {
        let mut config = Config::default();
        config.farm.soil_type = Some("loam".into());
        config.farm.crops = vec!["Tomatoes".into()];
        config.farm.area_hectares = Some(2.0);
        config.farm.weekly_outlook = Some(
            ["sunny", "cloudy", "rain", "cloudy", "sunny", "sunny", "cloudy"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        config
    }

    fn entries(app: &App) -> &[IrrigationPlanEntry] {
        app.plan.as_ref().map(|p| p.entries.as_slice()).unwrap_or(&[])
    }

    fn test_app() -> App {
        App::new(test_config(), Database::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn starts_without_plan_using_configured_outlook() {
        let app = test_app();
        assert!(app.plan.is_none());
        assert_eq!(app.weekly_outlook.as_ref().unwrap()[2], DayOutlook::Rain);
        assert_eq!(app.soil_type, Some(SoilType::Loam));
    }

    #[test]
    fn regenerate_persists_plan() {
        let mut app = test_app();
        app.regenerate_plan();
        assert_eq!(entries(&app).len(), PLAN_DAYS);

        let stored = load_plan(&app.db).unwrap().unwrap();
        assert_eq!(stored.entries, entries(&app));
    }

    #[test]
    fn toggle_round_trips_and_persists() {
        let mut app = test_app();
        app.regenerate_plan();

        app.toggle_selected();
        assert_eq!(entries(&app)[0].state, PlanState::Completed);
        let stored = load_plan(&app.db).unwrap().unwrap();
        assert_eq!(stored.entries[0].state, PlanState::Completed);

        app.toggle_selected();
        assert_eq!(entries(&app)[0].state, PlanState::Scheduled);
    }

    #[test]
    fn toggling_skipped_day_reports_error() {
        let mut app = test_app();
        app.regenerate_plan();
        app.schedule_state.selected_index = 2;

        app.toggle_selected();
        assert_eq!(entries(&app)[2].state, PlanState::Skipped);
        assert!(app
            .status_message
            .as_deref()
            .unwrap_or_default()
            .contains("skipped"));
    }

    #[test]
    fn validation_failure_keeps_existing_plan() {
        let mut app = test_app();
        app.regenerate_plan();
        let before = entries(&app).to_vec();

        app.crops.clear();
        app.regenerate_plan();
        assert_eq!(entries(&app), before.as_slice());
        assert_validation_status(&app);
    }

    #[test]
    fn cycle_then_regenerate_changes_day() {
        let mut app = test_app();
        app.regenerate_plan();
        app.schedule_state.selected_index = 2;

        app.cycle_outlook();
        assert_eq!(app.weekly_outlook.as_ref().unwrap()[2], DayOutlook::Sunny);
        assert!(entries(&app)[2].is_skipped());

        app.regenerate_plan();
        assert!(!entries(&app)[2].is_skipped());
    }

    #[test]
    fn reopening_restores_saved_outlook() {
        let db = Database::open_in_memory().unwrap();
        let mut app = App::new(test_config(), db.clone()).unwrap();
        app.schedule_state.selected_index = 0;
        app.cycle_outlook();
        app.cycle_outlook();
        app.regenerate_plan();

        let reopened = App::new(test_config(), db).unwrap();
        assert_eq!(reopened.weekly_outlook.as_ref().unwrap()[0], DayOutlook::Rain);
        assert!(entries(&reopened)[0].is_skipped());
    }

    fn assert_validation_status(app: &App) {
        assert!(app
            .status_message
            .as_deref()
            .unwrap_or_default()
            .starts_with("Validation error"));
    }

    #[test]
    fn missing_area_is_not_guessed() {
        let mut config = test_config();
        config.farm.area_hectares = None;
        let mut app = App::new(config, Database::open_in_memory().unwrap()).unwrap();
        assert_eq!(app.area_hectares, None);

        app.regenerate_plan();
        assert!(app.plan.is_none());
        assert!(load_plan(&app.db).unwrap().is_none());
        assert_validation_status(&app);
    }

    #[test]
    fn short_outlook_is_kept_and_rejected() {
        let mut config = test_config();
        config.farm.weekly_outlook = Some(vec!["rain".into(), "rain".into()]);
        let mut app = App::new(config, Database::open_in_memory().unwrap()).unwrap();
        assert_eq!(
            app.weekly_outlook,
            Some(vec![DayOutlook::Rain, DayOutlook::Rain])
        );

        app.regenerate_plan();
        assert!(app.plan.is_none());
        assert!(load_plan(&app.db).unwrap().is_none());
        assert_validation_status(&app);
    }

    #[test]
    fn missing_outlook_blocks_generation_and_editing() {
        let mut config = test_config();
        config.farm.weekly_outlook = None;
        let mut app = App::new(config, Database::open_in_memory().unwrap()).unwrap();
        assert!(app.weekly_outlook.is_none());

        app.cycle_outlook();
        assert!(app.weekly_outlook.is_none());

        app.regenerate_plan();
        assert!(app.plan.is_none());
        assert_validation_status(&app);
    }

    #[test]
    fn saved_plan_supplies_area_when_config_has_none() {
        let db = Database::open_in_memory().unwrap();
        let mut app = App::new(test_config(), db.clone()).unwrap();
        app.regenerate_plan();

        let mut config = test_config();
        config.farm.area_hectares = None;
        let reopened = App::new(config, db).unwrap();
        assert_eq!(reopened.area_hectares, Some(2.0));
    }

    #[test]
    fn weather_update_recomputes_crops() {
        let mut app = test_app();
        app.update_weather(WeatherSnapshot::from_readings(3.0, 80.0));
        assert_eq!(app.recommendations[0].crop_name, "Maize");

        app.update_weather(WeatherSnapshot::from_readings(0.0, 40.0));
        assert!(app.recommendations.iter().any(|e| e.crop_name == "Sorghum"));
    }

    #[test]
    fn screen_keys() {
        assert_eq!(Screen::from_key('2'), Some(Screen::Crops));
        assert_eq!(Screen::from_key('x'), None);
    }
}
