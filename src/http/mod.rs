//! HTTP protocol implementation.
//!
//! This module implements a small HTTP/1.1 server with support for keep-alive
//! connections, just wide enough to carry the command gateway.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses incoming request heads from byte buffers
//! - **`request`**: Request-head representation and header utilities
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine. The request head is
//! read and checked against the gateway preconditions before the body is
//! touched; a rejected request never has its body read.
//!
//! ```text
//!        ┌──────────────┐
//!        │ ReadingHead  │ ← Wait for the request line and headers
//!        └──────┬───────┘
//!               │ Head received, preconditions pass
//!               ▼
//!        ┌──────────────┐
//!        │ ReadingBody  │ ← Accumulate Content-Length bytes
//!        └──────┬───────┘
//!               │ Body complete
//!               ▼
//!        ┌──────────────┐
//!        │  Processing  │ ← Decode, validate, dispatch to the store
//!        └──────┬───────┘
//!               │ Outcome mapped to a response
//!               ▼
//!        ┌──────────────┐
//!        │   Writing    │ ← Send the fully assembled response
//!        └──────┬───────┘
//!               │ Response sent
//!               ├─ Keep-Alive → ReadingHead (same connection)
//!               └─ Close → Closed
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
