use std::sync::Arc;

use crate::wire::enums::EnumDef;
use crate::wire::tag::TypeTag;
use crate::wire::{Result, WireError, sig};

/// Native-side description of the shape expected on unmarshal or supplied on marshal.
///
/// The model is closed and built ahead of time: concrete record and enum
/// shapes are declared once as [`RecordDef`]/[`EnumDef`] values, and generic
/// targets map to the small fixed set of inferred variants produced by
/// [`TypeDesc::from_signature`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
	/// Generic target: accept any shape, infer it from the wire signature.
	Unspecified,
	/// Boolean scalar.
	Bool,
	/// Unsigned 8-bit scalar.
	Byte,
	/// Signed 16-bit scalar.
	Int16,
	/// Unsigned 16-bit scalar.
	Uint16,
	/// Signed 32-bit scalar.
	Int32,
	/// Unsigned 32-bit scalar.
	Uint32,
	/// Signed 64-bit scalar.
	Int64,
	/// Unsigned 64-bit scalar.
	Uint64,
	/// Double scalar.
	Double,
	/// UTF-8 string.
	Str,
	/// Object path string.
	ObjectPath,
	/// Signature string.
	SignatureStr,
	/// Opaque integer handle.
	Handle,
	/// Enumeration carried as its integer ordinal on the wire.
	Enum(Arc<EnumDef>),
	/// Ordered sequence with one element type.
	Array(Box<TypeDesc>),
	/// Key/value mapping (wire representation: array of dict-entries).
	Map(Box<TypeDesc>, Box<TypeDesc>),
	/// Positional tuple of field types, no declared field names.
	Tuple(Vec<TypeDesc>),
	/// Concrete named record with ordered, named fields.
	Record(Arc<RecordDef>),
	/// Tagged union carrying its own signature plus a value of that signature.
	Variant,
}

/// Concrete record shape declared ahead of time, one per native struct type.
#[derive(Debug, PartialEq)]
pub struct RecordDef {
	/// Record type name.
	pub name: Box<str>,
	/// Ordered field declarations.
	pub fields: Vec<RecordField>,
}

/// One declared record field.
#[derive(Debug, PartialEq)]
pub struct RecordField {
	/// Field name.
	pub name: Box<str>,
	/// Field shape.
	pub ty: TypeDesc,
}

impl RecordDef {
	/// Build a shared record definition from ordered `(name, type)` fields.
	pub fn new(name: &str, fields: Vec<(&str, TypeDesc)>) -> Arc<Self> {
		Arc::new(Self {
			name: name.into(),
			fields: fields
				.into_iter()
				.map(|(field_name, ty)| RecordField {
					name: field_name.into(),
					ty,
				})
				.collect(),
		})
	}
}

impl TypeDesc {
	/// Resolve a signature to the type descriptor it implies.
	///
	/// A signature with multiple top-level tokens resolves as a positional
	/// tuple of the token types.
	pub fn from_signature(signature: &str) -> Result<Self> {
		let tokens = sig::split(signature)?;
		match tokens.as_slice() {
			[] => Err(WireError::MalformedSignature {
				signature: signature.to_owned(),
			}),
			[token] => resolve_token(token),
			many => Ok(Self::Tuple(many.iter().map(|token| resolve_token(token)).collect::<Result<_>>()?)),
		}
	}

	/// Whether this descriptor leaves the shape to wire-signature inference.
	pub fn is_unspecified(&self) -> bool {
		matches!(self, Self::Unspecified)
	}

	/// Short human-readable description used in diagnostics.
	pub fn describe(&self) -> String {
		match self {
			Self::Unspecified => "any".to_owned(),
			Self::Bool => "boolean".to_owned(),
			Self::Byte => "byte".to_owned(),
			Self::Int16 => "i16".to_owned(),
			Self::Uint16 => "u16".to_owned(),
			Self::Int32 => "i32".to_owned(),
			Self::Uint32 => "u32".to_owned(),
			Self::Int64 => "i64".to_owned(),
			Self::Uint64 => "u64".to_owned(),
			Self::Double => "double".to_owned(),
			Self::Str => "string".to_owned(),
			Self::ObjectPath => "object path".to_owned(),
			Self::SignatureStr => "signature".to_owned(),
			Self::Handle => "handle".to_owned(),
			Self::Enum(def) => format!("enum {}", def.name),
			Self::Array(elem) => format!("array<{}>", elem.describe()),
			Self::Map(key, value) => format!("map<{}, {}>", key.describe(), value.describe()),
			Self::Tuple(fields) => format!("tuple[{}]", fields.len()),
			Self::Record(def) => def.name.as_ref().to_owned(),
			Self::Variant => "variant".to_owned(),
		}
	}
}

fn resolve_token(token: &str) -> Result<TypeDesc> {
	let first = token.chars().next().ok_or_else(|| WireError::MalformedSignature {
		signature: token.to_owned(),
	})?;
	let tag = TypeTag::from_code(first).ok_or_else(|| WireError::UnsupportedSignature {
		signature: token.to_owned(),
	})?;

	match tag {
		TypeTag::Boolean => Ok(TypeDesc::Bool),
		TypeTag::Byte => Ok(TypeDesc::Byte),
		TypeTag::Int16 => Ok(TypeDesc::Int16),
		TypeTag::Uint16 => Ok(TypeDesc::Uint16),
		TypeTag::Int32 => Ok(TypeDesc::Int32),
		TypeTag::Uint32 => Ok(TypeDesc::Uint32),
		TypeTag::Int64 => Ok(TypeDesc::Int64),
		TypeTag::Uint64 => Ok(TypeDesc::Uint64),
		TypeTag::Double => Ok(TypeDesc::Double),
		TypeTag::Str => Ok(TypeDesc::Str),
		TypeTag::ObjectPath => Ok(TypeDesc::ObjectPath),
		TypeTag::SignatureStr => Ok(TypeDesc::SignatureStr),
		TypeTag::Handle => Ok(TypeDesc::Handle),
		TypeTag::Variant => Ok(TypeDesc::Variant),
		TypeTag::Array => {
			let elem = sig::element_signature(token)?;
			if elem.starts_with('{') {
				let members = sig::container_members(elem)?;
				let [key, value] = members.as_slice() else {
					return Err(WireError::MalformedSignature {
						signature: token.to_owned(),
					});
				};
				Ok(TypeDesc::Map(Box::new(resolve_token(key)?), Box::new(resolve_token(value)?)))
			} else {
				Ok(TypeDesc::Array(Box::new(resolve_token(elem)?)))
			}
		}
		TypeTag::Struct | TypeTag::DictEntry => {
			let members = sig::container_members(token)?;
			Ok(TypeDesc::Tuple(members.iter().map(|member| resolve_token(member)).collect::<Result<_>>()?))
		}
	}
}
