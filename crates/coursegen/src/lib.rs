pub mod catalog;
pub mod dice;
pub mod generator;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod utils;
pub mod writer;

pub use catalog::{Catalog, CatalogError};
pub use dice::{Dice, FirstPick, SeededDice};
pub use generator::Generator;
pub use pipeline::{OutputConfig, Pipeline, PipelineError, RunSummary, Stage};
pub use types::{Course, Layout, Level};
