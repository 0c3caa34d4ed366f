pub mod gauge;
pub mod nav;

pub use gauge::{humidity_gauge, rainfall_gauge, temperature_gauge, wind_gauge};
pub use nav::{nav_line, status_line};
