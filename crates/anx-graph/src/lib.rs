pub mod error;
pub mod line;
pub mod graph;
pub mod builder;
pub mod router;
pub mod template;
pub mod session;
pub mod registry;
pub mod engine;

pub use error::{InvalidFlow, StepError};
pub use line::{FlowMap, Line};
pub use graph::{Graph, END, START};
pub use builder::{build, GraphBuilder};
pub use router::{route, NextLine};
pub use template::{Rendered, Template};
pub use session::{Session, SessionId, Step, StepKind};
pub use registry::SessionRegistry;
pub use engine::Engine;

// Re-export the record types consumed by the validator
pub use anx_types::{Dataset, FlowRecord, LineRecord};
