#[macro_use]
mod util;
pub mod datastructures;

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod orchestrator;
pub mod population;
pub mod render;
pub mod solver;
pub mod tour;

#[cfg(feature = "logging")]
pub mod log;
#[cfg(feature = "handle-ctrlc")]
pub mod signals;

pub use config::Config;
pub use error::{Error, Result};
pub use geometry::{City, CityId};
pub use orchestrator::{Orchestrator, Report, RunFailure, RunOutcome, RunResult};
pub use solver::{GeneticSearch, SearchResult};
pub use tour::Tour;
pub use util::is_permutation;
