pub mod connection;
pub mod migrations;
pub mod store;

pub use connection::Database;
pub use store::{load_plan, save_plan, PlanStore, PLAN_KEY};
