pub mod cli;
pub mod config;
pub mod date;
pub mod driver;
pub mod error;
pub mod git;
pub mod graph;
pub mod logging;
pub mod model;
pub mod run;
pub mod status;
pub mod util;

pub use config::RunConfig;
pub use driver::{Clock, Driver, SystemClock};
pub use error::{PulseError, Result};
pub use model::{CommitRecord, Outcome, RunReport};
