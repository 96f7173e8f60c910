mod collector;
mod reader;

pub use collector::{CollectError, Collector, collect_requirements};
pub use reader::{Lines, ReadError, RequirementLine, read_lines};
