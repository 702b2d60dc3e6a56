pub mod error;
pub mod source;
pub mod parse;
pub mod sheet;
pub mod builder;

pub use error::LoaderError;
pub use source::{LineSource, StaticSource};
pub use parse::{parse_flows, parse_lines};
pub use sheet::SheetSource;
pub use builder::SheetSourceBuilder;

pub use anx_types::{Dataset, FlowRecord, LineRecord};
