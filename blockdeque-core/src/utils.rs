//! A collection of utilities.

mod power_of_2;

pub use power_of_2::PowerOf2;
