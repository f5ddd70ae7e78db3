use crate::wire::enums;
use crate::wire::node::{NodeId, NodeStore, Scalar};
use crate::wire::tag::TypeTag;
use crate::wire::value::Value;
use crate::wire::{Result, WireError, sig};

/// Marshal one native value into a wire node under the given signature.
///
/// Dispatch is by the signature's first token: the node is being constructed
/// and has no prior shape. The signature is validated up front, and every
/// failure raised during the recursive descent is re-raised as a single
/// summarizing error naming the signature and the offending value kind.
pub fn marshal(store: &mut dyn NodeStore, node: NodeId, signature: &str, value: &Value) -> Result<()> {
	marshal_entry(store, node, signature, value).map_err(|source| WireError::Marshal {
		signature: signature.to_owned(),
		value: value.kind().to_owned(),
		source: Box::new(source),
	})
}

/// Marshal an ordered argument list into a struct node, one member per
/// top-level signature token.
pub fn marshal_args(store: &mut dyn NodeStore, node: NodeId, signature: &str, values: &[Value]) -> Result<()> {
	args_impl(store, node, signature, values).map_err(|source| WireError::Marshal {
		signature: signature.to_owned(),
		value: format!("{} arguments", values.len()),
		source: Box::new(source),
	})
}

fn marshal_entry(store: &mut dyn NodeStore, node: NodeId, signature: &str, value: &Value) -> Result<()> {
	sig::validate(signature)?;
	let token = sig::single(signature)?;
	marshal_value(store, node, token, value, 0)
}

fn args_impl(store: &mut dyn NodeStore, node: NodeId, signature: &str, values: &[Value]) -> Result<()> {
	sig::validate(signature)?;
	let tokens = sig::split(signature)?;
	if tokens.len() != values.len() {
		return Err(WireError::ArityMismatch {
			signature: signature.to_owned(),
			members: tokens.len(),
			fields: values.len(),
		});
	}

	store.set_struct(node, tokens.len())?;
	for (index, (token, value)) in tokens.iter().zip(values).enumerate() {
		let member = store.member(node, index)?;
		marshal_value(store, member, token, value, 0)?;
	}
	Ok(())
}

fn marshal_value(store: &mut dyn NodeStore, node: NodeId, token: &str, value: &Value, depth: u32) -> Result<()> {
	if depth >= sig::MAX_NESTING_DEPTH {
		return Err(WireError::MalformedSignature {
			signature: token.to_owned(),
		});
	}

	let first = token.chars().next().ok_or_else(|| WireError::MalformedSignature {
		signature: token.to_owned(),
	})?;
	let tag = TypeTag::from_code(first).ok_or_else(|| WireError::UnsupportedSignature {
		signature: token.to_owned(),
	})?;

	match tag {
		TypeTag::Boolean => match value {
			Value::Bool(v) => store.set(node, token, Scalar::Bool(*v)),
			other => Err(mismatch("boolean", other)),
		},
		TypeTag::Byte => {
			let raw = int_payload(value)?;
			store.set(node, token, Scalar::Byte(raw as u8))
		}
		TypeTag::Int16 => {
			let raw = int_payload(value)?;
			store.set(node, token, Scalar::Int16(raw as i16))
		}
		TypeTag::Uint16 => {
			let raw = int_payload(value)?;
			store.set(node, token, Scalar::Uint16(raw as u16))
		}
		TypeTag::Int32 => {
			let raw = int_payload(value)?;
			store.set(node, token, Scalar::Int32(raw as i32))
		}
		TypeTag::Uint32 => {
			let raw = int_payload(value)?;
			store.set(node, token, Scalar::Uint32(raw as u32))
		}
		TypeTag::Int64 => {
			let raw = int_payload(value)?;
			store.set(node, token, Scalar::Int64(raw))
		}
		TypeTag::Uint64 => {
			let raw = int_payload(value)?;
			store.set(node, token, Scalar::Uint64(raw as u64))
		}
		TypeTag::Double => match value.as_f64() {
			Some(v) => store.set(node, token, Scalar::Double(v)),
			None => Err(mismatch("number", value)),
		},
		TypeTag::Handle => match value.as_i64() {
			Some(v) => store.set(node, token, Scalar::Handle(v as u64)),
			None => Err(mismatch("handle", value)),
		},
		TypeTag::Str | TypeTag::ObjectPath | TypeTag::SignatureStr => match value {
			Value::Null => Err(WireError::NullValue {
				signature: token.to_owned(),
			}),
			other => match other.as_str() {
				Some(text) => store.set(node, token, Scalar::Str(text.into())),
				None => Err(mismatch("string", other)),
			},
		},
		TypeTag::Array => marshal_array(store, node, token, value, depth),
		TypeTag::Struct => marshal_struct(store, node, token, value, depth),
		TypeTag::Variant => marshal_variant(store, node, token, value, depth),
		TypeTag::DictEntry => marshal_dict_entry(store, node, token, value, depth),
	}
}

/// Integer payload for an integer-tagged token, with the enum ordinal taking
/// precedence over the value's own scalar.
fn int_payload(value: &Value) -> Result<i64> {
	if let Some(ordinal) = enums::to_ordinal(value) {
		return Ok(i64::from(ordinal));
	}
	value.as_i64().ok_or_else(|| mismatch("number", value))
}

fn marshal_array(store: &mut dyn NodeStore, node: NodeId, token: &str, value: &Value, depth: u32) -> Result<()> {
	let elem_sig = sig::element_signature(token)?;
	if elem_sig.starts_with('{') {
		let members = sig::container_members(elem_sig)?;
		let [key_sig, val_sig] = members.as_slice() else {
			return Err(WireError::MalformedSignature {
				signature: token.to_owned(),
			});
		};

		return match value {
			Value::Null => Err(WireError::NullValue {
				signature: token.to_owned(),
			}),
			Value::Map(map) => {
				store.set_array(node, elem_sig, map.len())?;
				for (index, (key, val)) in map.iter().enumerate() {
					let entry = store.element(node, index)?;
					store.set_dict_entry(entry)?;
					let key_node = store.key(entry)?;
					marshal_value(store, key_node, key_sig, key, depth + 1)?;
					let val_node = store.value(entry)?;
					marshal_value(store, val_node, val_sig, val, depth + 1)?;
				}
				Ok(())
			}
			other => Err(mismatch("map", other)),
		};
	}

	match value {
		Value::Null => Err(WireError::NullValue {
			signature: token.to_owned(),
		}),
		Value::Array(items) => {
			store.set_array(node, elem_sig, items.len())?;
			for (index, item) in items.iter().enumerate() {
				let element = store.element(node, index)?;
				marshal_value(store, element, elem_sig, item, depth + 1)?;
			}
			Ok(())
		}
		other => Err(mismatch("array", other)),
	}
}

fn marshal_struct(store: &mut dyn NodeStore, node: NodeId, token: &str, value: &Value, depth: u32) -> Result<()> {
	let member_sigs = sig::container_members(token)?;
	let members: Vec<&Value> = match value {
		Value::Null => {
			return Err(WireError::NullValue {
				signature: token.to_owned(),
			});
		}
		Value::Struct(items) => items.iter().collect(),
		Value::Record(record) => record.fields.iter().map(|field| &field.value).collect(),
		other => return Err(mismatch("struct", other)),
	};

	if member_sigs.len() != members.len() {
		return Err(WireError::ArityMismatch {
			signature: token.to_owned(),
			members: member_sigs.len(),
			fields: members.len(),
		});
	}

	store.set_struct(node, member_sigs.len())?;
	for (index, (member_sig, member)) in member_sigs.iter().zip(members).enumerate() {
		let member_node = store.member(node, index)?;
		marshal_value(store, member_node, member_sig, member, depth + 1)?;
	}
	Ok(())
}

fn marshal_variant(store: &mut dyn NodeStore, node: NodeId, token: &str, value: &Value, depth: u32) -> Result<()> {
	let variant = match value {
		Value::Null => {
			return Err(WireError::NullValue {
				signature: token.to_owned(),
			});
		}
		Value::Variant(variant) => variant,
		other => return Err(mismatch("variant", other)),
	};

	if !variant.node().is_null() {
		// Pass-through from a prior unmarshal: attach the bound inner node,
		// preserving its original wire signature.
		let inner = store.value(variant.node())?;
		let inner_sig = store.signature_of(inner)?;
		return store.set_variant(node, &inner_sig, inner);
	}

	let (Some(payload_sig), Some(payload)) = (variant.signature(), variant.value()) else {
		return Err(WireError::NullValue {
			signature: token.to_owned(),
		});
	};

	// The one place the signature comes from the value itself.
	sig::validate(payload_sig)?;
	let payload_token = sig::single(payload_sig)?;
	store.set_variant_empty(node)?;
	let inner = store.value(node)?;
	marshal_value(store, inner, payload_token, payload, depth + 1)
}

fn marshal_dict_entry(store: &mut dyn NodeStore, node: NodeId, token: &str, value: &Value, depth: u32) -> Result<()> {
	let members = sig::container_members(token)?;
	let [key_sig, val_sig] = members.as_slice() else {
		return Err(WireError::MalformedSignature {
			signature: token.to_owned(),
		});
	};

	let (key, val) = match value {
		Value::Null => {
			return Err(WireError::NullValue {
				signature: token.to_owned(),
			});
		}
		Value::Struct(items) => match items.as_slice() {
			[key, val] => (key, val),
			_ => {
				return Err(WireError::ArityMismatch {
					signature: token.to_owned(),
					members: 2,
					fields: items.len(),
				});
			}
		},
		other => return Err(mismatch("key/value pair", other)),
	};

	store.set_dict_entry(node)?;
	let key_node = store.key(node)?;
	marshal_value(store, key_node, key_sig, key, depth + 1)?;
	let val_node = store.value(node)?;
	marshal_value(store, val_node, val_sig, val, depth + 1)
}

fn mismatch(expected: &'static str, got: &Value) -> WireError {
	WireError::TypeMismatch {
		expected,
		got: got.kind().to_owned(),
	}
}
