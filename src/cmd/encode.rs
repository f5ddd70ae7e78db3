use serde_json::Value as JsonValue;
use wirearg::wire::{MemNodes, NodeId, NodeStore, Result, TypeTag, WireError, marshal, marshal_args, sig};

use crate::cmd::util;

/// Marshal a JSON value against a signature and dump the resulting node table.
pub fn run(signature: &str, value_text: &str, json: bool) -> Result<()> {
	let parsed: JsonValue = serde_json::from_str(value_text).map_err(|err| WireError::InvalidJson { message: err.to_string() })?;

	let mut store = MemNodes::new();
	let root = store.alloc();

	let tokens = sig::split(signature)?;
	if let [token] = tokens.as_slice() {
		let value = util::json_to_value(token, &parsed)?;
		marshal(&mut store, root, signature, &value)?;
	} else {
		let items = parsed.as_array().ok_or_else(|| WireError::InvalidJson {
			message: format!("expected an array of {} values for '{signature}'", tokens.len()),
		})?;
		if items.len() != tokens.len() {
			return Err(WireError::ArityMismatch {
				signature: signature.to_owned(),
				members: tokens.len(),
				fields: items.len(),
			});
		}
		let values = tokens
			.iter()
			.zip(items)
			.map(|(token, item)| util::json_to_value(token, item))
			.collect::<Result<Vec<_>>>()?;
		marshal_args(&mut store, root, signature, &values)?;
	}

	if json {
		let out = serde_json::json!({
			"signature": store.signature_of(root)?,
			"nodes": store.len() - 1,
			"root": node_to_json(&store, root)?,
		});
		println!("{out}");
		return Ok(());
	}

	println!("signature: {}", store.signature_of(root)?);
	println!("nodes: {}", store.len() - 1);
	print_node(&store, root, 0)?;
	Ok(())
}

fn print_node(store: &MemNodes, node: NodeId, indent: usize) -> Result<()> {
	let pad = "  ".repeat(indent);
	let tag = store.type_tag(node)?;
	match tag {
		TypeTag::Array => {
			let count = store.element_count(node)?;
			println!("{pad}#{} array a{} [{count}]", node.0, store.element_signature(node)?);
			for index in 0..count {
				print_node(store, store.element(node, index)?, indent + 1)?;
			}
		}
		TypeTag::Struct => {
			let count = store.member_count(node)?;
			println!("{pad}#{} struct [{count}]", node.0);
			for index in 0..count {
				print_node(store, store.member(node, index)?, indent + 1)?;
			}
		}
		TypeTag::DictEntry => {
			println!("{pad}#{} dict-entry", node.0);
			print_node(store, store.key(node)?, indent + 1)?;
			print_node(store, store.value(node)?, indent + 1)?;
		}
		TypeTag::Variant => {
			println!("{pad}#{} variant", node.0);
			print_node(store, store.value(node)?, indent + 1)?;
		}
		scalar => println!("{pad}#{} {} {}", node.0, scalar.code(), scalar_text(store, node, scalar)?),
	}
	Ok(())
}

fn node_to_json(store: &MemNodes, node: NodeId) -> Result<JsonValue> {
	use serde_json::json;

	let tag = store.type_tag(node)?;
	let out = match tag {
		TypeTag::Array => {
			let count = store.element_count(node)?;
			let mut elems = Vec::with_capacity(count);
			for index in 0..count {
				elems.push(node_to_json(store, store.element(node, index)?)?);
			}
			json!({ "id": node.0, "tag": "a", "elem_sig": store.element_signature(node)?, "elems": elems })
		}
		TypeTag::Struct => {
			let count = store.member_count(node)?;
			let mut members = Vec::with_capacity(count);
			for index in 0..count {
				members.push(node_to_json(store, store.member(node, index)?)?);
			}
			json!({ "id": node.0, "tag": "r", "members": members })
		}
		TypeTag::DictEntry => json!({
			"id": node.0,
			"tag": "e",
			"key": node_to_json(store, store.key(node)?)?,
			"value": node_to_json(store, store.value(node)?)?,
		}),
		TypeTag::Variant => json!({
			"id": node.0,
			"tag": "v",
			"value": node_to_json(store, store.value(node)?)?,
		}),
		scalar => json!({ "id": node.0, "tag": scalar.code().to_string(), "value": scalar_text(store, node, scalar)? }),
	};
	Ok(out)
}

fn scalar_text(store: &MemNodes, node: NodeId, tag: TypeTag) -> Result<String> {
	let text = match tag {
		TypeTag::Boolean => store.get_bool(node)?.to_string(),
		TypeTag::Byte => store.get_byte(node)?.to_string(),
		TypeTag::Int16 => store.get_i16(node)?.to_string(),
		TypeTag::Uint16 => store.get_u16(node)?.to_string(),
		TypeTag::Int32 => store.get_i32(node)?.to_string(),
		TypeTag::Uint32 => store.get_u32(node)?.to_string(),
		TypeTag::Int64 => store.get_i64(node)?.to_string(),
		TypeTag::Uint64 => store.get_u64(node)?.to_string(),
		TypeTag::Double => store.get_f64(node)?.to_string(),
		TypeTag::Str => format!("{:?}", store.get_string(node)?),
		TypeTag::ObjectPath => format!("{:?}", store.get_object_path(node)?),
		TypeTag::SignatureStr => format!("{:?}", store.get_signature_str(node)?),
		TypeTag::Handle => store.get_handle(node)?.to_string(),
		TypeTag::Array | TypeTag::Struct | TypeTag::DictEntry | TypeTag::Variant => String::new(),
	};
	Ok(text)
}
