use crate::wire::Result;
use crate::wire::enums::EnumValue;
use crate::wire::node::{NodeId, NodeStore};
use crate::wire::types::TypeDesc;
use crate::wire::unmarshal;

/// One native in-memory value, the unmarshalled form of one signature token.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent value; only legal on the write path for nullable checks.
	Null,
	/// Boolean.
	Bool(bool),
	/// Unsigned 8-bit integer.
	Byte(u8),
	/// Signed 16-bit integer.
	Int16(i16),
	/// Unsigned 16-bit integer.
	Uint16(u16),
	/// Signed 32-bit integer.
	Int32(i32),
	/// Unsigned 32-bit integer.
	Uint32(u32),
	/// Signed 64-bit integer.
	Int64(i64),
	/// Unsigned 64-bit integer.
	Uint64(u64),
	/// Double.
	Double(f64),
	/// UTF-8 string.
	Str(Box<str>),
	/// Object path string.
	ObjectPath(Box<str>),
	/// Signature string.
	SignatureStr(Box<str>),
	/// Opaque integer handle.
	Handle(u64),
	/// Enumeration instance carried as its ordinal on the wire.
	Enum(EnumValue),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Key/value mapping.
	Map(MapValue),
	/// Positional tuple with no declared field names.
	Struct(Vec<Value>),
	/// Concrete record instance with named fields.
	Record(RecordValue),
	/// Deferred tagged-union value.
	Variant(Variant),
}

impl Value {
	/// Logical kind label used in diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Byte(_) => "byte",
			Self::Int16(_) => "i16",
			Self::Uint16(_) => "u16",
			Self::Int32(_) => "i32",
			Self::Uint32(_) => "u32",
			Self::Int64(_) => "i64",
			Self::Uint64(_) => "u64",
			Self::Double(_) => "double",
			Self::Str(_) => "string",
			Self::ObjectPath(_) => "object path",
			Self::SignatureStr(_) => "signature",
			Self::Handle(_) => "handle",
			Self::Enum(_) => "enum",
			Self::Array(_) => "array",
			Self::Map(_) => "map",
			Self::Struct(_) => "struct",
			Self::Record(_) => "record",
			Self::Variant(_) => "variant",
		}
	}

	/// Numeric view as a signed 64-bit integer, truncating doubles.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Byte(v) => Some(i64::from(*v)),
			Self::Int16(v) => Some(i64::from(*v)),
			Self::Uint16(v) => Some(i64::from(*v)),
			Self::Int32(v) => Some(i64::from(*v)),
			Self::Uint32(v) => Some(i64::from(*v)),
			Self::Int64(v) => Some(*v),
			Self::Uint64(v) => Some(*v as i64),
			Self::Handle(v) => Some(*v as i64),
			Self::Double(v) => Some(*v as i64),
			_ => None,
		}
	}

	/// Numeric view as a double.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Byte(v) => Some(f64::from(*v)),
			Self::Int16(v) => Some(f64::from(*v)),
			Self::Uint16(v) => Some(f64::from(*v)),
			Self::Int32(v) => Some(f64::from(*v)),
			Self::Uint32(v) => Some(f64::from(*v)),
			Self::Int64(v) => Some(*v as f64),
			Self::Uint64(v) => Some(*v as f64),
			Self::Double(v) => Some(*v),
			_ => None,
		}
	}

	/// String view covering every string-tagged variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(v) | Self::ObjectPath(v) | Self::SignatureStr(v) => Some(v),
			_ => None,
		}
	}
}

/// Key/value mapping with unique keys; the wire form is an array of dict-entries.
///
/// Entry order is insignificant on the wire and for equality; inserting an
/// existing key replaces its value.
#[derive(Debug, Clone, Default)]
pub struct MapValue {
	entries: Vec<(Value, Value)>,
}

impl MapValue {
	/// Empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert one entry; a duplicate key keeps the last written value.
	pub fn insert(&mut self, key: Value, value: Value) {
		match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
			Some((_, slot)) => *slot = value,
			None => self.entries.push((key, value)),
		}
	}

	/// Value stored under `key`.
	pub fn get(&self, key: &Value) -> Option<&Value> {
		self.entries.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
	}

	/// Entry count.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the mapping has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
		self.entries.iter()
	}
}

impl PartialEq for MapValue {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
	}
}

impl FromIterator<(Value, Value)> for MapValue {
	fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
		let mut map = Self::new();
		for (key, value) in iter {
			map.insert(key, value);
		}
		map
	}
}

/// Concrete record instance produced for a [`crate::wire::RecordDef`] target.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
	/// Record type name.
	pub type_name: Box<str>,
	/// Ordered named fields.
	pub fields: Vec<FieldValue>,
}

/// One named record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Field value.
	pub value: Value,
}

/// Deferred tagged-union value.
///
/// Unmarshalling a variant node produces a wrapper bound to that node; the
/// enclosed value is read on demand with [`Variant::resolve`]. A wrapper built
/// natively carries a declared signature plus its payload instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
	node: NodeId,
	signature: Option<Box<str>>,
	value: Option<Box<Value>>,
}

impl Variant {
	/// Wrapper for a native payload with its declared signature.
	pub fn new(signature: &str, value: Value) -> Self {
		Self {
			node: NodeId::NULL,
			signature: Some(signature.into()),
			value: Some(Box::new(value)),
		}
	}

	/// Wrapper bound to an existing variant wire node.
	pub fn bound(node: NodeId) -> Self {
		Self {
			node,
			signature: None,
			value: None,
		}
	}

	/// Bound wire node, or the null sentinel for native wrappers.
	pub const fn node(&self) -> NodeId {
		self.node
	}

	/// Declared payload signature of a native wrapper.
	pub fn signature(&self) -> Option<&str> {
		self.signature.as_deref()
	}

	/// Native payload, if this wrapper was not bound to a wire node.
	pub fn value(&self) -> Option<&Value> {
		self.value.as_deref()
	}

	/// Read the enclosed value, unmarshalling the bound node on demand.
	pub fn resolve(&self, store: &dyn NodeStore, target: &TypeDesc) -> Result<Value> {
		if let Some(value) = &self.value {
			return Ok(value.as_ref().clone());
		}
		unmarshal::unmarshal(store, store.value(self.node)?, target)
	}
}

#[cfg(test)]
mod tests {
	use super::{MapValue, Value};

	#[test]
	fn duplicate_map_keys_keep_the_last_written_value() {
		let mut map = MapValue::new();
		map.insert(Value::Str("a".into()), Value::Int32(1));
		map.insert(Value::Str("a".into()), Value::Int32(2));
		assert_eq!(map.len(), 1);
		assert_eq!(map.get(&Value::Str("a".into())), Some(&Value::Int32(2)));
	}

	#[test]
	fn map_equality_ignores_entry_order() {
		let left: MapValue = [
			(Value::Str("a".into()), Value::Int32(1)),
			(Value::Str("b".into()), Value::Int32(2)),
		]
		.into_iter()
		.collect();
		let right: MapValue = [
			(Value::Str("b".into()), Value::Int32(2)),
			(Value::Str("a".into()), Value::Int32(1)),
		]
		.into_iter()
		.collect();
		assert_eq!(left, right);
	}
}
