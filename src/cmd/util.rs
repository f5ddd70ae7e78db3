use serde_json::Value as JsonValue;
use wirearg::wire::{MapValue, NodeStore, Result, TypeDesc, Value, Variant, WireError, sig};

/// Parse a CLI JSON argument into a native value guided by one signature token.
pub(crate) fn json_to_value(token: &str, json: &JsonValue) -> Result<Value> {
	if json.is_null() {
		return Ok(Value::Null);
	}

	let first = json_token_tag(token)?;
	match first {
		'b' => json.as_bool().map(Value::Bool).ok_or_else(|| shape("boolean", token, json)),
		'y' => json_int(token, json).map(|v| Value::Byte(v as u8)),
		'n' => json_int(token, json).map(|v| Value::Int16(v as i16)),
		'q' => json_int(token, json).map(|v| Value::Uint16(v as u16)),
		'i' => json_int(token, json).map(|v| Value::Int32(v as i32)),
		'u' => json_int(token, json).map(|v| Value::Uint32(v as u32)),
		'x' => json_int(token, json).map(Value::Int64),
		't' => json_int(token, json).map(|v| Value::Uint64(v as u64)),
		'h' => json_int(token, json).map(|v| Value::Handle(v as u64)),
		'd' => json.as_f64().map(Value::Double).ok_or_else(|| shape("number", token, json)),
		's' => json.as_str().map(|v| Value::Str(v.into())).ok_or_else(|| shape("string", token, json)),
		'o' => json.as_str().map(|v| Value::ObjectPath(v.into())).ok_or_else(|| shape("string", token, json)),
		'g' => json.as_str().map(|v| Value::SignatureStr(v.into())).ok_or_else(|| shape("string", token, json)),
		'a' => json_array(token, json),
		'(' => json_struct(token, json),
		'{' => json_pair(token, json),
		'v' => json_variant(token, json),
		_ => Err(WireError::UnsupportedSignature {
			signature: token.to_owned(),
		}),
	}
}

fn json_token_tag(token: &str) -> Result<char> {
	token.chars().next().ok_or_else(|| WireError::MalformedSignature {
		signature: token.to_owned(),
	})
}

fn json_int(token: &str, json: &JsonValue) -> Result<i64> {
	json.as_i64()
		.or_else(|| json.as_u64().map(|v| v as i64))
		.ok_or_else(|| shape("integer", token, json))
}

fn json_array(token: &str, json: &JsonValue) -> Result<Value> {
	let elem_sig = sig::element_signature(token)?;
	if elem_sig.starts_with('{') {
		let members = sig::container_members(elem_sig)?;
		let [key_sig, val_sig] = members.as_slice() else {
			return Err(WireError::MalformedSignature {
				signature: token.to_owned(),
			});
		};

		let mut map = MapValue::new();
		if let Some(object) = json.as_object() {
			for (key, val) in object {
				map.insert(json_to_value(key_sig, &JsonValue::String(key.clone()))?, json_to_value(val_sig, val)?);
			}
			return Ok(Value::Map(map));
		}
		if let Some(pairs) = json.as_array() {
			for pair in pairs {
				let entry = pair.as_array().filter(|items| items.len() == 2).ok_or_else(|| shape("[key, value] pair", token, pair))?;
				map.insert(json_to_value(key_sig, &entry[0])?, json_to_value(val_sig, &entry[1])?);
			}
			return Ok(Value::Map(map));
		}
		return Err(shape("object or pair array", token, json));
	}

	let items = json.as_array().ok_or_else(|| shape("array", token, json))?;
	Ok(Value::Array(items.iter().map(|item| json_to_value(elem_sig, item)).collect::<Result<_>>()?))
}

fn json_struct(token: &str, json: &JsonValue) -> Result<Value> {
	let members = sig::container_members(token)?;
	let items = json.as_array().ok_or_else(|| shape("array", token, json))?;
	if items.len() != members.len() {
		return Err(WireError::ArityMismatch {
			signature: token.to_owned(),
			members: members.len(),
			fields: items.len(),
		});
	}
	Ok(Value::Struct(
		members
			.iter()
			.zip(items)
			.map(|(member_sig, item)| json_to_value(member_sig, item))
			.collect::<Result<_>>()?,
	))
}

fn json_pair(token: &str, json: &JsonValue) -> Result<Value> {
	let members = sig::container_members(token)?;
	let [key_sig, val_sig] = members.as_slice() else {
		return Err(WireError::MalformedSignature {
			signature: token.to_owned(),
		});
	};
	let items = json.as_array().filter(|items| items.len() == 2).ok_or_else(|| shape("[key, value] pair", token, json))?;
	Ok(Value::Struct(vec![json_to_value(key_sig, &items[0])?, json_to_value(val_sig, &items[1])?]))
}

fn json_variant(token: &str, json: &JsonValue) -> Result<Value> {
	let payload_sig = json
		.get("sig")
		.and_then(JsonValue::as_str)
		.ok_or_else(|| shape("object with \"sig\" and \"value\"", token, json))?;
	let payload = json.get("value").ok_or_else(|| shape("object with \"sig\" and \"value\"", token, json))?;
	let payload_token = sig::single(payload_sig)?;
	Ok(Value::Variant(Variant::new(payload_sig, json_to_value(payload_token, payload)?)))
}

fn shape(expected: &str, token: &str, json: &JsonValue) -> WireError {
	WireError::InvalidJson {
		message: format!("expected {expected} for '{token}', got {json}"),
	}
}

/// Render a native value as JSON for command output.
pub(crate) fn value_to_json(value: &Value) -> JsonValue {
	use serde_json::{Map, json};

	match value {
		Value::Null => JsonValue::Null,
		Value::Bool(v) => json!(v),
		Value::Byte(v) => json!(v),
		Value::Int16(v) => json!(v),
		Value::Uint16(v) => json!(v),
		Value::Int32(v) => json!(v),
		Value::Uint32(v) => json!(v),
		Value::Int64(v) => json!(v),
		Value::Uint64(v) => json!(v),
		Value::Double(v) => json!(v),
		Value::Str(v) | Value::ObjectPath(v) | Value::SignatureStr(v) => json!(v.as_ref()),
		Value::Handle(v) => json!(v),
		Value::Enum(v) => json!(v.name()),
		Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
		Value::Map(map) => {
			let all_string_keys = map.iter().all(|(key, _)| key.as_str().is_some());
			if all_string_keys {
				let mut out = Map::new();
				for (key, val) in map.iter() {
					out.insert(key.as_str().unwrap_or_default().to_owned(), value_to_json(val));
				}
				JsonValue::Object(out)
			} else {
				JsonValue::Array(map.iter().map(|(key, val)| json!([value_to_json(key), value_to_json(val)])).collect())
			}
		}
		Value::Struct(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
		Value::Record(record) => {
			let mut out = Map::new();
			out.insert("type".to_owned(), json!(record.type_name.as_ref()));
			for field in &record.fields {
				out.insert(field.name.as_ref().to_owned(), value_to_json(&field.value));
			}
			JsonValue::Object(out)
		}
		Value::Variant(variant) => match (variant.signature(), variant.value()) {
			(Some(sig_text), Some(payload)) => json!({ "sig": sig_text, "value": value_to_json(payload) }),
			_ => json!({ "bound": variant.node().0 }),
		},
	}
}

/// Replace every bound variant wrapper with its resolved payload so command
/// output never prints opaque node handles.
pub(crate) fn resolve_variants(store: &dyn NodeStore, value: Value) -> Result<Value> {
	Ok(match value {
		Value::Variant(variant) => {
			if variant.node().is_null() {
				Value::Variant(variant)
			} else {
				let inner_node = store.value(variant.node())?;
				let payload_sig = store.signature_of(inner_node)?;
				let payload = resolve_variants(store, variant.resolve(store, &TypeDesc::Unspecified)?)?;
				Value::Variant(Variant::new(&payload_sig, payload))
			}
		}
		Value::Array(items) => Value::Array(items.into_iter().map(|item| resolve_variants(store, item)).collect::<Result<_>>()?),
		Value::Struct(items) => Value::Struct(items.into_iter().map(|item| resolve_variants(store, item)).collect::<Result<_>>()?),
		Value::Map(map) => {
			let mut out = MapValue::new();
			for (key, val) in map.iter() {
				out.insert(key.clone(), resolve_variants(store, val.clone())?);
			}
			Value::Map(out)
		}
		Value::Record(mut record) => {
			for field in &mut record.fields {
				field.value = resolve_variants(store, std::mem::replace(&mut field.value, Value::Null))?;
			}
			Value::Record(record)
		}
		other => other,
	})
}
