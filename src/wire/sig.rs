use crate::wire::tag::{DICT_ENTRY_CLOSE, DICT_ENTRY_OPEN, STRUCT_CLOSE, STRUCT_OPEN, TypeTag};
use crate::wire::{Result, WireError};

/// Maximum container nesting depth accepted in a signature.
pub const MAX_NESTING_DEPTH: u32 = 32;

/// Split a signature into its top-level type tokens.
///
/// Balances container brackets and lets an array tag consume exactly the
/// signature of its element. Unknown tag characters pass through as length-1
/// tokens; full tag validation is [`validate`].
pub fn split(signature: &str) -> Result<Vec<&str>> {
	if signature.is_empty() {
		return Err(malformed(signature));
	}

	let mut tokens = Vec::new();
	let mut rest = signature;
	while !rest.is_empty() {
		let len = token_len(signature, rest, 0)?;
		tokens.push(&rest[..len]);
		rest = &rest[len..];
	}
	Ok(tokens)
}

/// Extract the single top-level token of `signature`, failing on trailing text.
pub fn single(signature: &str) -> Result<&str> {
	let tokens = split(signature)?;
	match tokens.as_slice() {
		[token] => Ok(token),
		_ => Err(malformed(signature)),
	}
}

/// Split the member signatures enclosed by a struct or dict-entry token.
pub fn container_members(token: &str) -> Result<Vec<&str>> {
	let inner = token
		.strip_prefix(STRUCT_OPEN)
		.and_then(|tail| tail.strip_suffix(STRUCT_CLOSE))
		.or_else(|| token.strip_prefix(DICT_ENTRY_OPEN).and_then(|tail| tail.strip_suffix(DICT_ENTRY_CLOSE)))
		.ok_or_else(|| malformed(token))?;
	split(inner)
}

/// Element signature of an array token.
pub fn element_signature(token: &str) -> Result<&str> {
	token.strip_prefix('a').filter(|elem| !elem.is_empty()).ok_or_else(|| malformed(token))
}

/// Check full well-formedness of every token in `signature`.
///
/// Beyond bracket balance this enforces known tags, non-empty structs,
/// two-member dict-entries with a basic key, and the nesting depth bound.
pub fn validate(signature: &str) -> Result<()> {
	for token in split(signature)? {
		validate_token(token)?;
	}
	Ok(())
}

fn validate_token(token: &str) -> Result<()> {
	let first = token.chars().next().ok_or_else(|| malformed(token))?;
	match TypeTag::from_code(first) {
		Some(TypeTag::Array) => validate_token(element_signature(token)?),
		Some(TypeTag::Struct) => {
			let members = container_members(token)?;
			if members.is_empty() {
				return Err(malformed(token));
			}
			for member in members {
				validate_token(member)?;
			}
			Ok(())
		}
		Some(TypeTag::DictEntry) => {
			let members = container_members(token)?;
			let [key, value] = members.as_slice() else {
				return Err(malformed(token));
			};
			let key_tag = key.chars().next().and_then(TypeTag::from_code).ok_or_else(|| unsupported(key))?;
			if !key_tag.is_basic() {
				return Err(malformed(token));
			}
			validate_token(key)?;
			validate_token(value)
		}
		Some(_) => {
			if token.len() != 1 {
				return Err(malformed(token));
			}
			Ok(())
		}
		None => Err(unsupported(token)),
	}
}

/// Length in bytes of the first token of `rest`; `whole` is kept for diagnostics.
fn token_len(whole: &str, rest: &str, depth: u32) -> Result<usize> {
	if depth >= MAX_NESTING_DEPTH {
		return Err(malformed(whole));
	}

	let first = rest.chars().next().ok_or_else(|| malformed(whole))?;
	match first {
		'a' => {
			let elem = token_len(whole, &rest[1..], depth + 1)?;
			Ok(1 + elem)
		}
		STRUCT_OPEN => container_len(whole, rest, STRUCT_CLOSE, depth),
		DICT_ENTRY_OPEN => container_len(whole, rest, DICT_ENTRY_CLOSE, depth),
		STRUCT_CLOSE | DICT_ENTRY_CLOSE => Err(malformed(whole)),
		_ => Ok(first.len_utf8()),
	}
}

fn container_len(whole: &str, rest: &str, close: char, depth: u32) -> Result<usize> {
	let mut pos = 1;
	loop {
		let tail = &rest[pos..];
		match tail.chars().next() {
			None => return Err(malformed(whole)),
			Some(c) if c == close => return Ok(pos + 1),
			Some(STRUCT_CLOSE | DICT_ENTRY_CLOSE) => return Err(malformed(whole)),
			Some(_) => pos += token_len(whole, tail, depth + 1)?,
		}
	}
}

fn malformed(signature: &str) -> WireError {
	WireError::MalformedSignature {
		signature: signature.to_owned(),
	}
}

fn unsupported(signature: &str) -> WireError {
	WireError::UnsupportedSignature {
		signature: signature.to_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::{split, validate};
	use crate::wire::WireError;

	#[test]
	fn primitives_split_into_single_char_tokens() {
		let tokens = split("bynqiuxtdsogh").expect("splits");
		assert_eq!(tokens.len(), 13);
		assert!(tokens.iter().all(|token| token.len() == 1));
	}

	#[test]
	fn array_consumes_exactly_one_element_signature() {
		assert_eq!(split("aias").expect("splits"), vec!["ai", "as"]);
		assert_eq!(split("aai").expect("splits"), vec!["aai"]);
		assert_eq!(split("a{sv}i").expect("splits"), vec!["a{sv}", "i"]);
	}

	#[test]
	fn nested_containers_balance() {
		assert_eq!(split("(i(sd))a(bb)").expect("splits"), vec!["(i(sd))", "a(bb)"]);
	}

	#[test]
	fn empty_signature_is_malformed() {
		assert!(matches!(split(""), Err(WireError::MalformedSignature { .. })));
	}

	#[test]
	fn unbalanced_struct_is_malformed() {
		assert!(matches!(split("(si"), Err(WireError::MalformedSignature { .. })));
		assert!(matches!(split("si)"), Err(WireError::MalformedSignature { .. })));
	}

	#[test]
	fn truncated_array_is_malformed() {
		assert!(matches!(split("ia"), Err(WireError::MalformedSignature { .. })));
	}

	#[test]
	fn mismatched_bracket_kinds_are_malformed() {
		assert!(matches!(split("(s}"), Err(WireError::MalformedSignature { .. })));
	}

	#[test]
	fn depth_limit_rejects_pathological_nesting() {
		let deep = "a".repeat(64) + "i";
		assert!(matches!(split(&deep), Err(WireError::MalformedSignature { .. })));
	}

	#[test]
	fn validate_rejects_unknown_tags() {
		assert!(matches!(validate("z"), Err(WireError::UnsupportedSignature { .. })));
		assert!(matches!(validate("(iz)"), Err(WireError::UnsupportedSignature { .. })));
	}

	#[test]
	fn validate_rejects_empty_struct_and_bad_dict_entries() {
		assert!(matches!(validate("()"), Err(WireError::MalformedSignature { .. })));
		assert!(matches!(validate("a{s}"), Err(WireError::MalformedSignature { .. })));
		assert!(matches!(validate("a{ssv}"), Err(WireError::MalformedSignature { .. })));
		assert!(matches!(validate("a{(i)s}"), Err(WireError::MalformedSignature { .. })));
	}

	#[test]
	fn validate_accepts_representative_compound_signatures() {
		for sig in ["a{sv}", "(sia{sv})", "aa(id)", "a{s(id)}", "v", "(v)", "a{yv}"] {
			validate(sig).expect("well-formed signature");
		}
	}
}
