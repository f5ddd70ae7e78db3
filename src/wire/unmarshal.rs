use crate::wire::enums;
use crate::wire::node::{NodeId, NodeStore};
use crate::wire::tag::TypeTag;
use crate::wire::types::TypeDesc;
use crate::wire::value::{FieldValue, MapValue, RecordValue, Value, Variant};
use crate::wire::{Result, WireError, sig};

/// Unmarshal one wire node into a native value.
///
/// Dispatch is by the node's type tag; `target` constrains and validates the
/// produced shape, with generic targets resolved from the node's own
/// signature. Every failure raised during the recursive descent is re-raised
/// as a single summarizing error naming the node signature and the target.
pub fn unmarshal(store: &dyn NodeStore, node: NodeId, target: &TypeDesc) -> Result<Value> {
	if node.is_null() {
		return Err(WireError::InvalidNode);
	}

	unmarshal_node(store, node, target, 0).map_err(|source| WireError::Unmarshal {
		signature: store.signature_of(node).unwrap_or_else(|_| "?".to_owned()),
		target: target.describe(),
		source: Box::new(source),
	})
}

/// Unmarshal an argument-pack struct node against an ordered parameter list.
///
/// The node holds one member per parameter; a count mismatch fails before any
/// member is read.
pub fn unmarshal_args(store: &dyn NodeStore, node: NodeId, params: &[TypeDesc]) -> Result<Vec<Value>> {
	if node.is_null() {
		return Err(WireError::InvalidNode);
	}

	args_impl(store, node, params).map_err(|source| WireError::Unmarshal {
		signature: store.signature_of(node).unwrap_or_else(|_| "?".to_owned()),
		target: format!("{} parameters", params.len()),
		source: Box::new(source),
	})
}

fn args_impl(store: &dyn NodeStore, node: NodeId, params: &[TypeDesc]) -> Result<Vec<Value>> {
	let members = store.member_count(node)?;
	if members != params.len() {
		return Err(WireError::ArityMismatch {
			signature: store.signature_of(node)?,
			members,
			fields: params.len(),
		});
	}

	params
		.iter()
		.enumerate()
		.map(|(index, param)| unmarshal_node(store, store.member(node, index)?, param, 0))
		.collect()
}

fn unmarshal_node(store: &dyn NodeStore, node: NodeId, target: &TypeDesc, depth: u32) -> Result<Value> {
	if node.is_null() {
		return Err(WireError::InvalidNode);
	}
	if depth >= sig::MAX_NESTING_DEPTH {
		return Err(WireError::MalformedSignature {
			signature: "...".to_owned(),
		});
	}

	match store.type_tag(node)? {
		TypeTag::Boolean => Ok(Value::Bool(store.get_bool(node)?)),
		TypeTag::Byte => {
			let raw = store.get_byte(node)?;
			Ok(enum_or(target, i64::from(raw))?.unwrap_or(Value::Byte(raw)))
		}
		TypeTag::Int16 => {
			let raw = store.get_i16(node)?;
			Ok(enum_or(target, i64::from(raw))?.unwrap_or(Value::Int16(raw)))
		}
		TypeTag::Uint16 => {
			let raw = store.get_u16(node)?;
			Ok(enum_or(target, i64::from(raw))?.unwrap_or(Value::Uint16(raw)))
		}
		TypeTag::Int32 => {
			let raw = store.get_i32(node)?;
			Ok(enum_or(target, i64::from(raw))?.unwrap_or(Value::Int32(raw)))
		}
		TypeTag::Uint32 => {
			let raw = store.get_u32(node)?;
			Ok(enum_or(target, i64::from(raw))?.unwrap_or(Value::Uint32(raw)))
		}
		TypeTag::Int64 => {
			let raw = store.get_i64(node)?;
			Ok(enum_or(target, raw)?.unwrap_or(Value::Int64(raw)))
		}
		TypeTag::Uint64 => {
			let raw = store.get_u64(node)?;
			Ok(enum_or(target, raw as i64)?.unwrap_or(Value::Uint64(raw)))
		}
		TypeTag::Double => Ok(Value::Double(store.get_f64(node)?)),
		TypeTag::Str => Ok(Value::Str(store.get_string(node)?.into())),
		TypeTag::ObjectPath => Ok(Value::ObjectPath(store.get_object_path(node)?.into())),
		TypeTag::SignatureStr => Ok(Value::SignatureStr(store.get_signature_str(node)?.into())),
		TypeTag::Handle => Ok(Value::Handle(store.get_handle(node)?)),
		TypeTag::Array => unmarshal_array(store, node, target, depth),
		TypeTag::Struct => unmarshal_struct(store, node, target, depth),
		TypeTag::Variant => Ok(Value::Variant(Variant::bound(node))),
		TypeTag::DictEntry => Err(WireError::UnsupportedSignature {
			signature: store.signature_of(node).unwrap_or_else(|_| "?".to_owned()),
		}),
	}
}

fn enum_or(target: &TypeDesc, ordinal: i64) -> Result<Option<Value>> {
	Ok(enums::from_ordinal(target, ordinal)?.map(Value::Enum))
}

fn unmarshal_array(store: &dyn NodeStore, node: NodeId, target: &TypeDesc, depth: u32) -> Result<Value> {
	let resolved;
	let target = if target.is_unspecified() {
		resolved = TypeDesc::from_signature(&store.signature_of(node)?)?;
		&resolved
	} else {
		target
	};

	let count = store.element_count(node)?;
	if store.element_signature(node)?.starts_with('{') {
		let TypeDesc::Map(key_ty, val_ty) = target else {
			return Err(WireError::TypeMismatch {
				expected: "map",
				got: target.describe(),
			});
		};

		let mut map = MapValue::new();
		for index in 0..count {
			let entry = store.element(node, index)?;
			let key = unmarshal_node(store, store.key(entry)?, key_ty, depth + 1)?;
			let value = unmarshal_node(store, store.value(entry)?, val_ty, depth + 1)?;
			map.insert(key, value);
		}
		return Ok(Value::Map(map));
	}

	let TypeDesc::Array(elem_ty) = target else {
		return Err(WireError::TypeMismatch {
			expected: "array",
			got: target.describe(),
		});
	};

	let mut values = Vec::with_capacity(count);
	for index in 0..count {
		let value = unmarshal_node(store, store.element(node, index)?, elem_ty, depth + 1)?;
		if !conforms(&value, elem_ty) {
			return Err(WireError::TypeMismatch {
				expected: "conforming array element",
				got: value.kind().to_owned(),
			});
		}
		values.push(value);
	}
	Ok(Value::Array(values))
}

fn unmarshal_struct(store: &dyn NodeStore, node: NodeId, target: &TypeDesc, depth: u32) -> Result<Value> {
	let count = store.member_count(node)?;
	match target {
		TypeDesc::Unspecified => {
			let signature = store.signature_of(node)?;
			let members = sig::container_members(&signature)?;
			if members.len() != count {
				return Err(WireError::ArityMismatch {
					signature: signature.clone(),
					members: count,
					fields: members.len(),
				});
			}

			let mut values = Vec::with_capacity(count);
			for (index, member_sig) in members.iter().enumerate() {
				let member_ty = TypeDesc::from_signature(member_sig)?;
				values.push(unmarshal_node(store, store.member(node, index)?, &member_ty, depth + 1)?);
			}
			Ok(Value::Struct(values))
		}
		TypeDesc::Tuple(fields) => {
			if fields.len() != count {
				return Err(WireError::ArityMismatch {
					signature: store.signature_of(node)?,
					members: count,
					fields: fields.len(),
				});
			}

			let mut values = Vec::with_capacity(count);
			for (index, field_ty) in fields.iter().enumerate() {
				values.push(unmarshal_node(store, store.member(node, index)?, field_ty, depth + 1)?);
			}
			Ok(Value::Struct(values))
		}
		TypeDesc::Record(def) => {
			if def.fields.len() != count {
				return Err(WireError::ArityMismatch {
					signature: store.signature_of(node)?,
					members: count,
					fields: def.fields.len(),
				});
			}

			let mut fields = Vec::with_capacity(count);
			for (index, field) in def.fields.iter().enumerate() {
				fields.push(FieldValue {
					name: field.name.clone(),
					value: unmarshal_node(store, store.member(node, index)?, &field.ty, depth + 1)?,
				});
			}
			Ok(Value::Record(RecordValue {
				type_name: def.name.clone(),
				fields,
			}))
		}
		other => Err(WireError::TypeMismatch {
			expected: "struct",
			got: other.describe(),
		}),
	}
}

fn conforms(value: &Value, target: &TypeDesc) -> bool {
	match target {
		TypeDesc::Unspecified => true,
		TypeDesc::Bool => matches!(value, Value::Bool(_)),
		TypeDesc::Byte => matches!(value, Value::Byte(_)),
		TypeDesc::Int16 => matches!(value, Value::Int16(_)),
		TypeDesc::Uint16 => matches!(value, Value::Uint16(_)),
		TypeDesc::Int32 => matches!(value, Value::Int32(_)),
		TypeDesc::Uint32 => matches!(value, Value::Uint32(_)),
		TypeDesc::Int64 => matches!(value, Value::Int64(_)),
		TypeDesc::Uint64 => matches!(value, Value::Uint64(_)),
		TypeDesc::Double => matches!(value, Value::Double(_)),
		TypeDesc::Str => matches!(value, Value::Str(_)),
		TypeDesc::ObjectPath => matches!(value, Value::ObjectPath(_)),
		TypeDesc::SignatureStr => matches!(value, Value::SignatureStr(_)),
		TypeDesc::Handle => matches!(value, Value::Handle(_)),
		TypeDesc::Enum(_) => matches!(value, Value::Enum(_)),
		TypeDesc::Array(_) => matches!(value, Value::Array(_)),
		TypeDesc::Map(..) => matches!(value, Value::Map(_)),
		TypeDesc::Tuple(_) => matches!(value, Value::Struct(_)),
		TypeDesc::Record(_) => matches!(value, Value::Record(_)),
		TypeDesc::Variant => matches!(value, Value::Variant(_)),
	}
}
