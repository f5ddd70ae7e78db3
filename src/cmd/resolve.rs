use serde_json::Value as JsonValue;
use wirearg::wire::{Result, TypeDesc};

/// Resolve a signature to its inferred type descriptor and print the tree.
pub fn run(signature: &str, json: bool) -> Result<()> {
	let resolved = TypeDesc::from_signature(signature)?;

	if json {
		let out = serde_json::json!({
			"signature": signature,
			"type": type_to_json(&resolved),
		});
		println!("{out}");
		return Ok(());
	}

	println!("signature: {signature}");
	print_type(&resolved, 0);
	Ok(())
}

fn print_type(ty: &TypeDesc, indent: usize) {
	let pad = "  ".repeat(indent);
	match ty {
		TypeDesc::Array(elem) => {
			println!("{pad}array");
			print_type(elem, indent + 1);
		}
		TypeDesc::Map(key, value) => {
			println!("{pad}map");
			print_type(key, indent + 1);
			print_type(value, indent + 1);
		}
		TypeDesc::Tuple(fields) => {
			println!("{pad}tuple[{}]", fields.len());
			for field in fields {
				print_type(field, indent + 1);
			}
		}
		other => println!("{pad}{}", other.describe()),
	}
}

fn type_to_json(ty: &TypeDesc) -> JsonValue {
	use serde_json::json;

	match ty {
		TypeDesc::Array(elem) => json!({ "array": type_to_json(elem) }),
		TypeDesc::Map(key, value) => json!({ "map": [type_to_json(key), type_to_json(value)] }),
		TypeDesc::Tuple(fields) => json!({ "tuple": fields.iter().map(type_to_json).collect::<Vec<_>>() }),
		other => json!(other.describe()),
	}
}
