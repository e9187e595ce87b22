//! The API of blockdeque-core.

mod configuration;
mod cursor;
mod deque;
mod error;
mod iter;
mod platform;
mod position;

pub use configuration::{Configuration, Properties};
pub use cursor::Cursor;
pub use deque::BlockDeque;
pub use error::Error;
pub use iter::{IntoIter, Iter, IterMut};
pub use platform::Platform;
pub use position::Position;

pub use crate::utils::PowerOf2;
