//! Windows shared memory access.
//!
//! Maps the game's three named regions directly, the way the game's own
//! broadcasting clients do. Reads are plain copies out of the live view;
//! all interpretation happens downstream on the copied bytes.

mod connection;

pub use connection::Connection;
