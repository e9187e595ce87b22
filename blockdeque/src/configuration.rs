//! Default configuration.

use blockdeque_core::{Configuration, PowerOf2};

/// Default Configuration, with blocks of 128 elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct DequeConfiguration;

impl Configuration for DequeConfiguration {
    //  Safety:
    //  -   128 is a power of 2.
    const BLOCK_CAPACITY: PowerOf2 = unsafe { PowerOf2::new_unchecked(128) };
}
