//! Model Context Protocol surface.
//!
//! `tools` holds the operations as plain functions returning JSON strings;
//! `server` wires them into an `rmcp` tool router served over stdio.

pub mod roots;
pub mod server;
pub mod tools;

pub use server::{serve_stdio, PrAgentServer};
