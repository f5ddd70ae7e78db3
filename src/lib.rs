//! Signature-driven wire argument marshalling: a bidirectional converter
//! between the compact wire type-signature grammar and native in-memory
//! values, plus an in-memory node table standing in for the transport layer.

/// Core wire marshalling modules.
pub mod wire;
