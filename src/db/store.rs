use crate::db::Database;
use crate::error::{AdvisorError, Result};
use crate::models::SavedPlan;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;

/// Key under which the current irrigation plan is stored
pub const PLAN_KEY: &str = "irrigation_plan";

/// Minimal key/value persistence used by the presentation layer.
///
/// Values are JSON documents; a missing key reads as `None`.
pub trait PlanStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: &Value) -> Result<()>;
}

impl PlanStore for Database {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let raw: Option<String> = self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, text, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
    }
}

pub fn load_plan(store: &dyn PlanStore) -> Result<Option<SavedPlan>> {
    match store.get(PLAN_KEY)? {
        Some(value) => {
            let plan: SavedPlan = serde_json::from_value(value).map_err(|e| {
                AdvisorError::InvalidInput(format!("stored plan is unreadable: {}", e))
            })?;
            Ok(Some(plan))
        }
        None => Ok(None),
    }
}

pub fn save_plan(store: &dyn PlanStore, plan: &SavedPlan) -> Result<()> {
    let value = serde_json::to_value(plan)?;
    store.set(PLAN_KEY, &value)?;
    tracing::debug!(
        entries = plan.entries.len(),
        completed = plan.completed_count(),
        "Saved irrigation plan"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::generate_schedule;
    use crate::models::{DayOutlook, PlanState, SoilType, Weekday};
    use serde_json::json;

    fn sample_plan() -> SavedPlan {
        let crops = vec!["Tomatoes".to_string()];
        let forecast = vec![
            DayOutlook::Sunny,
            DayOutlook::Cloudy,
            DayOutlook::Rain,
            DayOutlook::Cloudy,
            DayOutlook::Sunny,
            DayOutlook::Sunny,
            DayOutlook::Cloudy,
        ];
        let entries = generate_schedule(Some(SoilType::Loam), &crops, 2.0, &forecast).unwrap();
        SavedPlan::new(SoilType::Loam, crops, 2.0, entries)
    }

    #[test]
    fn missing_key_reads_as_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get("nothing").unwrap().is_none());
        assert!(load_plan(&db).unwrap().is_none());
    }

    #[test]
    fn set_overwrites_existing_value() {
        let db = Database::open_in_memory().unwrap();
        db.set("k", &json!({"a": 1})).unwrap();
        db.set("k", &json!({"a": 2})).unwrap();
        assert_eq!(db.get("k").unwrap(), Some(json!({"a": 2})));
    }

    #[test]
    fn plan_survives_save_and_load() {
        let db = Database::open_in_memory().unwrap();
        let mut plan = sample_plan();
        plan.entry_mut(Weekday::Monday).unwrap().complete().unwrap();
        save_plan(&db, &plan).unwrap();

        let loaded = load_plan(&db).unwrap().unwrap();
        assert_eq!(loaded.entries, plan.entries);
        assert_eq!(loaded.soil_type, SoilType::Loam);
        assert_eq!(
            loaded.entry(Weekday::Monday).unwrap().state,
            PlanState::Completed
        );
        assert_eq!(
            loaded.entry(Weekday::Wednesday).unwrap().state,
            PlanState::Skipped
        );
    }

    #[test]
    fn corrupt_plan_value_is_reported() {
        let db = Database::open_in_memory().unwrap();
        db.set(PLAN_KEY, &json!({"entries": "nope"})).unwrap();
        assert!(matches!(
            load_plan(&db),
            Err(AdvisorError::InvalidInput(_))
        ));
    }
}
