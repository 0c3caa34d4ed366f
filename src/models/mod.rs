pub mod crop;
pub mod plan;
pub mod soil;
pub mod weather;

pub use crop::*;
pub use plan::*;
pub use soil::*;
pub use weather::*;
