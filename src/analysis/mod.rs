mod align;
mod confidence;
mod coverage;
mod error;
mod extract;
mod mapper;
mod repair;
mod residue;
mod types;
mod verdict;
mod report;

pub use align::*;
pub use confidence::*;
pub use coverage::*;
pub use error::*;
pub use extract::*;
pub use mapper::*;
pub use repair::*;
pub use residue::*;
pub use types::*;
pub use verdict::*;
pub use report::*;
