use crate::config::OpenWeatherMapConfig;
use crate::error::{AdvisorError, Result};
use crate::models::{ForecastDay, WeatherCondition, WeatherOrigin, WeatherSnapshot};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    name: String,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    #[serde(default)]
    rain: Option<OwmCurrentPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmCurrentPrecipitation {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
    #[serde(default)]
    snow: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

/// One 3-hour forecast step after unit and condition conversion
#[derive(Debug, Clone)]
struct ForecastStep {
    timestamp: DateTime<Utc>,
    temp_c: f64,
    precipitation_mm: f64,
    condition: WeatherCondition,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions plus the 5-day outlook as one snapshot
    pub async fn fetch_snapshot(&self) -> Result<WeatherSnapshot> {
        let current: OwmCurrentResponse = self.get_json("weather").await?;
        let forecast: OwmForecastResponse = self.get_json("forecast").await?;

        let steps: Vec<ForecastStep> = forecast.list.iter().map(convert_forecast_item).collect();

        Ok(WeatherSnapshot {
            location: current.name,
            temperature_c: current.main.temp,
            humidity_pct: current.main.humidity,
            rainfall_mm: current.rain.map(|r| r.one_hour).unwrap_or(0.0),
            wind_speed_ms: current.wind.speed,
            condition: primary_condition(&current.weather),
            forecast: aggregate_daily(&steps),
            origin: WeatherOrigin::Live,
            fetched_at: Some(Utc::now()),
        })
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.endpoint("weather"))
            .send()
            .await
            .map_err(|e| AdvisorError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, path, self.config.latitude, self.config.longitude, self.config.api_key
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|e| AdvisorError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            AdvisorError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })
    }
}

fn convert_forecast_item(item: &OwmForecastItem) -> ForecastStep {
    let timestamp = DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now);

    // Combine rain and snow precipitation
    let rain_mm = item.rain.as_ref().map(|r| r.three_hour).unwrap_or(0.0);
    let snow_mm = item.snow.as_ref().map(|s| s.three_hour).unwrap_or(0.0);

    ForecastStep {
        timestamp,
        temp_c: item.main.temp,
        precipitation_mm: rain_mm + snow_mm,
        condition: primary_condition(&item.weather),
    }
}

/// First listed condition; an empty list is `Other`, never a sunny default
fn primary_condition(weather: &[OwmWeather]) -> WeatherCondition {
    weather
        .first()
        .map(|w| WeatherCondition::from_owm_id(w.id))
        .unwrap_or(WeatherCondition::Other)
}

fn aggregate_daily(steps: &[ForecastStep]) -> Vec<ForecastDay> {
    // BTreeMap keeps days in calendar order
    let mut by_date: BTreeMap<NaiveDate, Vec<&ForecastStep>> = BTreeMap::new();
    for step in steps {
        by_date
            .entry(step.timestamp.date_naive())
            .or_default()
            .push(step);
    }

    by_date
        .into_iter()
        .map(|(date, points)| aggregate_day(date, &points))
        .collect()
}

fn aggregate_day(date: NaiveDate, points: &[&ForecastStep]) -> ForecastDay {
    let high_temp_c = points
        .iter()
        .map(|p| p.temp_c)
        .fold(f64::NEG_INFINITY, f64::max);

    let rain_mm: f64 = points.iter().map(|p| p.precipitation_mm).sum();

    // Find dominant weather condition (most frequent)
    let mut condition_counts: HashMap<WeatherCondition, usize> = HashMap::new();
    for point in points {
        *condition_counts.entry(point.condition).or_insert(0) += 1;
    }
    let dominant = condition_counts
        .into_iter()
        .max_by_key(|(condition, count)| (*count, wetness_rank(*condition)))
        .map(|(condition, _)| condition)
        .unwrap_or(WeatherCondition::Other);

    ForecastDay {
        day_label: date.format("%a").to_string(),
        temp_c: if high_temp_c.is_finite() { high_temp_c } else { 0.0 },
        condition: dominant,
        rain_mm,
    }
}

/// Tie-break so equal counts resolve the same way on every run
fn wetness_rank(condition: WeatherCondition) -> u8 {
    match condition {
        WeatherCondition::Thunderstorm => 7,
        WeatherCondition::Rain => 6,
        WeatherCondition::Drizzle => 5,
        WeatherCondition::Snow => 4,
        WeatherCondition::Clouds => 3,
        WeatherCondition::Mist => 2,
        WeatherCondition::Clear => 1,
        WeatherCondition::Other => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayOutlook;

    fn sample_config() -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            latitude: -1.2921,
            longitude: 36.8219,
            enabled: true,
        }
    }

    fn step(ts: i64, temp_c: f64, rain: f64, condition: WeatherCondition) -> ForecastStep {
        ForecastStep {
            timestamp: DateTime::from_timestamp(ts, 0).unwrap(),
            temp_c,
            precipitation_mm: rain,
            condition,
        }
    }

    #[test]
    fn endpoint_uses_metric_units() {
        let client = OpenWeatherMapClient::new(sample_config());
        let url = client.endpoint("forecast");
        assert!(url.starts_with("https://api.openweathermap.org/data/2.5/forecast?"));
        assert!(url.contains("units=metric"));
        assert!(url.contains("lat=-1.2921"));
    }

    #[test]
    fn forecast_item_parses_and_sums_precipitation() {
        let json = r#"{
            "dt": 1700000000,
            "main": {"temp": 18.5, "humidity": 82},
            "weather": [{"id": 501, "main": "Rain", "description": "moderate rain"}],
            "rain": {"3h": 2.0},
            "snow": {"3h": 0.5}
        }"#;
        let item: OwmForecastItem = serde_json::from_str(json).unwrap();
        let converted = convert_forecast_item(&item);
        assert_eq!(converted.condition, WeatherCondition::Rain);
        assert!((converted.precipitation_mm - 2.5).abs() < 1e-9);
        assert_eq!(converted.temp_c, 18.5);
    }

    #[test]
    fn current_response_without_rain_block() {
        let json = r#"{
            "name": "Nairobi",
            "main": {"temp": 21.0, "humidity": 60},
            "weather": [{"id": 800}],
            "wind": {"speed": 4.1}
        }"#;
        let current: OwmCurrentResponse = serde_json::from_str(json).unwrap();
        assert!(current.rain.is_none());
        assert_eq!(current.name, "Nairobi");
    }

    #[test]
    fn missing_condition_list_is_not_sunny() {
        let json = r#"{
            "dt": 1700000000,
            "main": {"temp": 25.0, "humidity": 40},
            "weather": []
        }"#;
        let item: OwmForecastItem = serde_json::from_str(json).unwrap();
        let converted = convert_forecast_item(&item);
        assert_eq!(converted.condition, WeatherCondition::Other);
        assert_eq!(converted.condition.outlook(), DayOutlook::Cloudy);

        let current: OwmCurrentResponse = serde_json::from_str(
            r#"{"name": "Nairobi", "main": {"temp": 21.0, "humidity": 60}, "weather": [], "wind": {"speed": 1.0}}"#,
        )
        .unwrap();
        assert_eq!(primary_condition(&current.weather), WeatherCondition::Other);
    }

    #[test]
    fn aggregate_groups_steps_by_calendar_day() {
        // 2023-11-14 and 2023-11-15 (UTC)
        let day1 = 1_699_920_000;
        let day2 = day1 + 86_400;
        let steps = vec![
            step(day2, 19.0, 0.0, WeatherCondition::Clear),
            step(day1, 20.0, 1.0, WeatherCondition::Rain),
            step(day1 + 10_800, 24.0, 2.0, WeatherCondition::Rain),
            step(day1 + 21_600, 22.0, 0.0, WeatherCondition::Clouds),
        ];

        let days = aggregate_daily(&steps);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day_label, "Tue");
        assert_eq!(days[0].temp_c, 24.0);
        assert_eq!(days[0].condition, WeatherCondition::Rain);
        assert!((days[0].rain_mm - 3.0).abs() < 1e-9);
        assert_eq!(days[1].day_label, "Wed");
        assert_eq!(days[1].condition, WeatherCondition::Clear);
    }

    #[test]
    fn tied_conditions_prefer_wetter_weather() {
        let day = 1_699_920_000;
        let steps = vec![
            step(day, 20.0, 0.0, WeatherCondition::Clear),
            step(day + 10_800, 20.0, 1.0, WeatherCondition::Drizzle),
        ];
        let days = aggregate_daily(&steps);
        assert_eq!(days[0].condition, WeatherCondition::Drizzle);
    }
}
