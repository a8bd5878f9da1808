//! Conjoint design generation — full-factorial enumeration plus a
//! coverage-constrained random sample, partitioned into choice tasks.

pub mod factorial;
pub mod generator;
pub mod model;

pub use generator::{DesignConfig, DesignGenerator};
pub use model::{Design, Profile, ProfileLabel};
