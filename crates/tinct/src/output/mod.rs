//! Output of generated stylesheets.
//!
//! This module provides:
//!
//! - [`OutputSink`]: State machine writing CSS to a server context or a live style node
//! - [`Document`]: The host document operations the sink relies on
//! - [`MemoryDocument`]: An in-memory [`Document`] for non-browser hosts and tests
//! - [`SsrContext`]: The server-rendered response whose `head` receives the style fragment
//!
//! Server markup and client lookups share [`STYLE_ELEMENT_ID`], so a client
//! hydrating a server-rendered page takes over the node the server emitted.

mod document;
mod server;
mod sink;

pub use document::{Document, MemoryDocument, NodeId};
pub use server::{style_fragment, SsrContext};
pub use sink::{OutputSink, SinkState};

/// Identifier of the style node, shared by server markup and client lookup.
pub const STYLE_ELEMENT_ID: &str = "tinct-theme-stylesheet";
