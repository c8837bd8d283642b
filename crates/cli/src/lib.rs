//! Library side of the `carconfig` binary: text rendering, catalog editing and
//! export output.

pub mod edit;
pub mod output;
pub mod report;
