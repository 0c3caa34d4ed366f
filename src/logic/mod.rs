pub mod recommender;
pub mod schedule;
pub mod tables;
pub mod weather_sync;

pub use recommender::{moisture_regime, recommend};
pub use schedule::{generate_schedule, IrrigationScheduler, ScheduleRequest};
pub use weather_sync::WeatherService;
