//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request line per connection,
//! no headers, no bodies, no keep-alive.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine and its entry point
//! - **`parser`**: Reads the request line byte by byte into bounded fields
//! - **`request`**: Bounded request fields and method recognition
//! - **`probe`**: Classifies the resolved filesystem path
//! - **`emitter`**: Error pages, file streaming, directory responses
//! - **`listing`**: Directory listing rows and page
//! - **`response`**: Status codes and synthesized responses
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//! - **`error`**: Per-connection error taxonomy
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────────┐
//!        │  ParseRequest   │ ← Always succeeds, fields may be partial
//!        └────────┬────────┘
//!                 ▼
//!        ┌─────────────────┐
//!        │ ValidateMethod  │ ── POST → 501, other → 400 ──┐
//!        └────────┬────────┘                               │
//!                 │ GET                                    │
//!                 ▼                                        │
//!        ┌─────────────────┐                               │
//!        │      Probe      │ ── missing 404, denied 403,   │
//!        └────────┬────────┘    other 500 ─────────────────┤
//!                 │ file / directory                       │
//!                 ▼                                        │
//!        ┌─────────────────┐                               │
//!        │     Respond     │ ◄─────────────────────────────┘
//!        └────────┬────────┘
//!                 ▼
//!        ┌─────────────────┐
//!        │      Close      │ → Closed
//!        └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use std::sync::Arc;
//! use shelf::http::connection::handle_connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let root: Arc<Path> = Arc::from(Path::new("/srv/www"));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         tokio::spawn(handle_connection(socket, Arc::clone(&root)));
//!     }
//! }
//! ```

pub mod connection;
pub mod emitter;
pub mod error;
pub mod listing;
pub mod mime;
pub mod parser;
pub mod probe;
pub mod request;
pub mod response;
pub mod writer;
