//! The errors of blockdeque-core.

use core::alloc::Layout;

use super::Position;

/// Error
///
/// The failures a deque operation may report.
///
/// All fallible operations report their failure synchronously; none of them retries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A checked access was attempted outside of `[0, len)`.
    #[error("index {index} is out of range for a deque of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the deque at the time of the request.
        len: usize,
    },
    /// A position outside of the occupied range was supplied to `insert` or `erase`.
    #[error("position {position:?} is outside of the occupied range [{begin:?}, {end:?})")]
    PositionOutOfRange {
        /// The requested position.
        position: Position,
        /// The position of the first element.
        begin: Position,
        /// The position one past the last element.
        end: Position,
    },
    /// The Platform could not satisfy an allocation request.
    #[error("failed to allocate {} bytes aligned on {}", .layout.size(), .layout.align())]
    AllocationFailure {
        /// The layout which could not be allocated.
        layout: Layout,
    },
    /// The size of a block or table would overflow the address space.
    #[error("capacity overflow")]
    CapacityOverflow,
}

#[cfg(test)]
mod tests {

use std::string::ToString;

use super::*;

#[test]
fn error_display() {
    let error = Error::IndexOutOfRange { index: 7, len: 3 };
    assert_eq!("index 7 is out of range for a deque of length 3", error.to_string());

    let layout = Layout::from_size_align(512, 8).expect("Valid layout");
    let error = Error::AllocationFailure { layout };
    assert_eq!("failed to allocate 512 bytes aligned on 8", error.to_string());

    assert_eq!("capacity overflow", Error::CapacityOverflow.to_string());
}

}
