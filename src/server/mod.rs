//! Listening socket, accept loop, and shutdown.

pub mod listener;
pub mod shutdown;

pub use listener::Server;
pub use shutdown::Shutdown;
