//! Travel-time matrix.
//!
//! Row and column 0 are the depot; client `i` lives at index `i`.

mod matrix;

pub use matrix::TravelTimes;
