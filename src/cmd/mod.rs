/// Signature marshal/dump command.
pub mod encode;
/// Type resolution command.
pub mod resolve;
/// Marshal/unmarshal round-trip command.
pub mod roundtrip;
/// Signature split/validate command.
pub mod sig;

mod util;
