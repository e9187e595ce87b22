#![no_std]

#![deny(missing_docs)]

//! Building blocks for a block-based double-ended queue.
//!
//! blockdeque-core contains the algorithms of a random-access double-ended queue whose elements live in fixed-capacity
//! blocks, themselves referenced from an indirection table. It contains:
//! -   A platform trait, used to allocate the raw blocks and tables.
//! -   A configuration trait, used to select the capacity of blocks.
//! -   The `BlockDeque` itself, its `Cursor` and its iterators.

#[cfg(test)]
extern crate std;

mod api;
mod internals;
mod utils;

pub use api::*;
