#![no_std]
#![deny(missing_docs)]

//! A double-ended queue storing its elements in fixed-capacity blocks.
//!
//! The type `Deque` provides a random-access double-ended queue, whose elements never move when it grows: only the
//! table of blocks is reallocated.
//!
//! ```
//! use blockdeque::Deque;
//!
//! let mut deque = Deque::default();
//!
//! deque.push_back(1).unwrap();
//! deque.push_back(2).unwrap();
//! deque.push_front(0).unwrap();
//!
//! assert_eq!(Some(&0), deque.front());
//! assert_eq!(2, deque[2]);
//! ```

mod configuration;
mod platform;

pub use blockdeque_core::{
    BlockDeque, Configuration, Cursor, Error, IntoIter, Iter, IterMut, Platform, Position, PowerOf2, Properties,
};

pub use configuration::DequeConfiguration;
pub use platform::SystemPlatform;

/// Block Deque with blocks of 128 elements, allocated with the system allocator.
pub type Deque<T> = BlockDeque<T, DequeConfiguration, SystemPlatform>;
