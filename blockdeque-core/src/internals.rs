//! The internals of blockdeque-core.
//!
//! The internals manage raw memory: they never construct nor destruct elements by themselves.

pub mod block;
pub mod block_table;

#[cfg(test)]
pub mod test;
