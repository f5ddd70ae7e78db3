use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, WireError>;

/// Errors produced while parsing signatures and marshalling wire values.
#[derive(Debug, Error)]
pub enum WireError {
	/// Signature is empty, truncated, unbalanced, or nested too deeply.
	#[error("malformed signature '{signature}'")]
	MalformedSignature {
		/// Offending signature text.
		signature: String,
	},
	/// Signature contains an unknown or unimplemented type tag.
	#[error("unsupported signature '{signature}'")]
	UnsupportedSignature {
		/// Offending signature text.
		signature: String,
	},
	/// Native value or type descriptor is incompatible with the wire tag.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Expected logical value kind.
		expected: &'static str,
		/// Actual logical value kind.
		got: String,
	},
	/// Struct or dict-entry member count does not match the declared shape.
	#[error("arity mismatch for '{signature}': {members} wire members, {fields} fields")]
	ArityMismatch {
		/// Signature of the struct or dict-entry token.
		signature: String,
		/// Member count on the wire side.
		members: usize,
		/// Field count on the native side.
		fields: usize,
	},
	/// Enumeration ordinal outside the declared value range.
	#[error("invalid ordinal for enum {name}: ordinal={ordinal}, count={count}")]
	InvalidOrdinal {
		/// Enumeration type name.
		name: String,
		/// Out-of-range wire ordinal.
		ordinal: i64,
		/// Declared value count.
		count: usize,
	},
	/// Required value was absent on the write path.
	#[error("cannot marshal null into '{signature}'")]
	NullValue {
		/// Signature the null value was marshalled against.
		signature: String,
	},
	/// Wire node handle is the null sentinel or refers to no stored node.
	#[error("invalid wire node")]
	InvalidNode,
	/// CLI value argument was not valid JSON for the requested signature.
	#[error("invalid json value: {message}")]
	InvalidJson {
		/// Parser or shape failure detail.
		message: String,
	},
	/// Child node index outside the stored element/member count.
	#[error("node index out of range: idx={index}, count={count}")]
	NodeIndexOutOfRange {
		/// Requested child index.
		index: usize,
		/// Stored child count.
		count: usize,
	},
	/// Summarizing wrapper for any failure during recursive marshal descent.
	#[error("cannot marshal {value} into '{signature}'")]
	Marshal {
		/// Full signature the marshal was attempted against.
		signature: String,
		/// Runtime kind of the offending value.
		value: String,
		/// Structured cause from the failing frame.
		#[source]
		source: Box<WireError>,
	},
	/// Summarizing wrapper for any failure during recursive unmarshal descent.
	#[error("cannot unmarshal '{signature}' into {target}")]
	Unmarshal {
		/// Wire signature of the source node.
		signature: String,
		/// Description of the target type.
		target: String,
		/// Structured cause from the failing frame.
		#[source]
		source: Box<WireError>,
	},
}

impl WireError {
	/// Innermost structured error beneath any summarizing wrappers.
	pub fn root_cause(&self) -> &WireError {
		match self {
			WireError::Marshal { source, .. } | WireError::Unmarshal { source, .. } => source.root_cause(),
			other => other,
		}
	}
}
