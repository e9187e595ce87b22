//! Abstraction over OS differences.

#[cfg(unix)]
mod unix;

#[cfg(unix)]
pub use unix::SystemPlatform;

#[cfg(not(unix))]
compile_error!("blockdeque only provides a SystemPlatform for unix targets; use blockdeque-core with a custom Platform");
