pub mod records;
pub mod config;

pub use records::{Dataset, FlowRecord, LineRecord};
pub use config::EngineConfig;
