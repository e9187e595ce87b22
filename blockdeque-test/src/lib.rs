//! Test utilities for blockdeque.
//!
//! -   `FailingPlatform`: a Platform tracking allocations, which can be instructed to fail.
//! -   `Tracked`: an element tracking the number of live instances, which can be instructed to panic on clone.

mod failing;
mod tracked;

pub use failing::FailingPlatform;
pub use tracked::Tracked;
