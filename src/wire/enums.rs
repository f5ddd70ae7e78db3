use std::sync::Arc;

use crate::wire::types::TypeDesc;
use crate::wire::value::Value;
use crate::wire::{Result, WireError};

/// Declared value list backing one enumeration type.
///
/// Ordinal assignment is declaration order: ordinal `i` maps to the `i`-th
/// entry of `values`, and that mapping is the wire representation.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDef {
	/// Enumeration type name.
	pub name: Box<str>,
	/// Value names in declaration order.
	pub values: Vec<Box<str>>,
}

impl EnumDef {
	/// Build a shared definition from a name and ordered value names.
	pub fn new(name: &str, values: &[&str]) -> Arc<Self> {
		Arc::new(Self {
			name: name.into(),
			values: values.iter().map(|value| Box::from(*value)).collect(),
		})
	}

	/// Declared value count.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether the definition declares no values.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Value name at `ordinal`, if in range.
	pub fn value_name(&self, ordinal: u32) -> Option<&str> {
		self.values.get(ordinal as usize).map(AsRef::as_ref)
	}

	/// Ordinal of the named value, if declared.
	pub fn ordinal_of(&self, name: &str) -> Option<u32> {
		self.values.iter().position(|value| value.as_ref() == name).map(|idx| idx as u32)
	}
}

/// One enumeration instance: a shared definition plus an in-range ordinal.
#[derive(Debug, Clone)]
pub struct EnumValue {
	/// Defining value list.
	pub def: Arc<EnumDef>,
	/// Position in the declared value list.
	pub ordinal: u32,
}

impl EnumValue {
	/// Instance for the named value of `def`, if declared.
	pub fn of(def: &Arc<EnumDef>, name: &str) -> Option<Self> {
		def.ordinal_of(name).map(|ordinal| Self {
			def: Arc::clone(def),
			ordinal,
		})
	}

	/// Declared name of this instance.
	pub fn name(&self) -> &str {
		self.def.value_name(self.ordinal).unwrap_or("")
	}
}

impl PartialEq for EnumValue {
	fn eq(&self, other: &Self) -> bool {
		self.ordinal == other.ordinal && self.def.name == other.def.name
	}
}

/// Wire ordinal of `value` if it is an enumeration instance.
pub fn to_ordinal(value: &Value) -> Option<u32> {
	match value {
		Value::Enum(instance) => Some(instance.ordinal),
		_ => None,
	}
}

/// Reconcile a wire integer with an enumeration target type.
///
/// Returns `None` when `target` is not an enumeration; otherwise the ordinal
/// must fall inside the declared range.
pub fn from_ordinal(target: &TypeDesc, ordinal: i64) -> Result<Option<EnumValue>> {
	let TypeDesc::Enum(def) = target else {
		return Ok(None);
	};

	let in_range = u32::try_from(ordinal).is_ok_and(|idx| (idx as usize) < def.len());
	if !in_range {
		return Err(WireError::InvalidOrdinal {
			name: def.name.as_ref().to_owned(),
			ordinal,
			count: def.len(),
		});
	}

	Ok(Some(EnumValue {
		def: Arc::clone(def),
		ordinal: ordinal as u32,
	}))
}
