mod enums;
mod error;
mod marshal;
mod mem;
mod node;
mod tag;
mod types;
mod unmarshal;
mod value;

/// Signature splitting and validation.
pub mod sig;

/// Enumeration definitions and the ordinal adapter.
pub use enums::{EnumDef, EnumValue, from_ordinal, to_ordinal};
/// Error and result aliases.
pub use error::{Result, WireError};
/// Marshalling entry points.
pub use marshal::{marshal, marshal_args};
/// In-memory node table.
pub use mem::MemNodes;
/// Node handle, primitive payloads, and the store interface.
pub use node::{NodeId, NodeStore, Scalar};
/// Wire type tags and signature punctuation.
pub use tag::{DICT_ENTRY_CLOSE, DICT_ENTRY_OPEN, STRUCT_CLOSE, STRUCT_OPEN, TypeTag};
/// Type descriptor model.
pub use types::{RecordDef, RecordField, TypeDesc};
/// Unmarshalling entry points.
pub use unmarshal::{unmarshal, unmarshal_args};
/// Native value types.
pub use value::{FieldValue, MapValue, RecordValue, Value, Variant};
