use crate::config::Config;
use crate::datasources::OpenWeatherMapClient;
use crate::error::Result;
use crate::models::WeatherSnapshot;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps the latest weather snapshot, substituting the fallback when the
/// provider is missing or failing. Callers never see a fetch error.
pub struct WeatherService {
    client: Option<OpenWeatherMapClient>,
    current: Arc<RwLock<WeatherSnapshot>>,
}

impl WeatherService {
    pub fn new(config: &Config) -> Self {
        let client = config
            .openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
            .map(|c| {
                tracing::info!("OpenWeatherMap client configured for weather data");
                OpenWeatherMapClient::new(c.clone())
            });

        if client.is_none() {
            tracing::info!("OpenWeatherMap not configured - using fallback weather");
        }

        Self::with_client(client)
    }

    pub fn with_client(client: Option<OpenWeatherMapClient>) -> Self {
        Self {
            client,
            current: Arc::new(RwLock::new(WeatherSnapshot::fallback())),
        }
    }

    pub async fn refresh(&self) -> WeatherSnapshot {
        let fetched = match self.client {
            Some(ref client) => Some(client.fetch_snapshot().await),
            None => None,
        };

        let snapshot = resolve_snapshot(fetched);

        let mut current = self.current.write().await;
        *current = snapshot.clone();

        snapshot
    }

    /// Last resolved snapshot; the fallback until the first refresh
    pub async fn current(&self) -> WeatherSnapshot {
        self.current.read().await.clone()
    }

    pub async fn check_connection(&self) -> ConnectionStatus {
        let mut status = ConnectionStatus {
            configured: self.client.is_some(),
            ..Default::default()
        };

        if let Some(ref client) = self.client {
            status.openweathermap = client.test_connection().await.unwrap_or(false);
        }

        status
    }
}

/// Pick the snapshot the engine will see for a fetch outcome.
///
/// `None` means no provider was configured.
pub fn resolve_snapshot(fetched: Option<Result<WeatherSnapshot>>) -> WeatherSnapshot {
    match fetched {
        Some(Ok(snapshot)) => match snapshot.validate() {
            Ok(()) => {
                tracing::debug!(location = %snapshot.location, "Weather snapshot updated");
                snapshot
            }
            Err(e) => {
                tracing::warn!("Discarding malformed weather data: {}", e);
                WeatherSnapshot::fallback()
            }
        },
        Some(Err(e)) => {
            tracing::warn!("Failed to fetch weather, using fallback: {}", e);
            WeatherSnapshot::fallback()
        }
        None => WeatherSnapshot::fallback(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionStatus {
    pub configured: bool,
    pub openweathermap: bool,
}

impl ConnectionStatus {
    pub fn describe(&self) -> &'static str {
        match (self.configured, self.openweathermap) {
            (false, _) => "OpenWeatherMap: not configured (fallback weather)",
            (true, true) => "OpenWeatherMap: OK",
            (true, false) => "OpenWeatherMap: OFFLINE (fallback weather)",
        }
    }
}
