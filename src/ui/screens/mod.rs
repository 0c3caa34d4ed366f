pub mod crops;
pub mod schedule;
pub mod weather;

pub use crops::CropsScreen;
pub use schedule::ScheduleScreen;
pub use weather::WeatherScreen;
