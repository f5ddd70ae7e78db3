use serde_json::Value as JsonValue;
use wirearg::wire::{MemNodes, Result, TypeDesc, WireError, marshal, marshal_args, sig, unmarshal, unmarshal_args};

use crate::cmd::util;

/// Marshal a JSON value, unmarshal it back through a generic target, and
/// print the recovered value as JSON.
pub fn run(signature: &str, value_text: &str) -> Result<()> {
	let parsed: JsonValue = serde_json::from_str(value_text).map_err(|err| WireError::InvalidJson { message: err.to_string() })?;

	let mut store = MemNodes::new();
	let root = store.alloc();

	let tokens = sig::split(signature)?;
	let recovered = if let [token] = tokens.as_slice() {
		let value = util::json_to_value(token, &parsed)?;
		marshal(&mut store, root, signature, &value)?;
		unmarshal(&store, root, &TypeDesc::Unspecified)?
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
		let params = vec![TypeDesc::Unspecified; values.len()];
		wirearg::wire::Value::Struct(unmarshal_args(&store, root, &params)?)
	};

	let resolved = util::resolve_variants(&store, recovered)?;
	let out = serde_json::json!({
		"signature": signature,
		"value": util::value_to_json(&resolved),
	});
	println!("{out}");
	Ok(())
}
