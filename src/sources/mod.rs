//! Region source implementations.

#[cfg(windows)]
mod live;

#[cfg(windows)]
pub use live::LiveSource;
