use crate::wire::node::{NodeId, NodeStore, Scalar};
use crate::wire::tag::TypeTag;
use crate::wire::{Result, WireError, sig};

/// In-memory node table standing in for the external transport layer.
///
/// Nodes live in a flat arena addressed by [`NodeId`]; id `0` stays reserved
/// as the null sentinel. Constructors allocate child nodes internally, so the
/// engine only ever reaches storage through the [`NodeStore`] primitives.
#[derive(Debug)]
pub struct MemNodes {
	nodes: Vec<NodeData>,
}

#[derive(Debug)]
enum NodeData {
	Empty,
	Scalar { tag: TypeTag, value: Scalar },
	Array { elem_sig: Box<str>, elems: Vec<NodeId> },
	Struct { members: Vec<NodeId> },
	DictEntry { key: NodeId, val: NodeId },
	Variant { inner: NodeId },
}

impl NodeData {
	fn kind(&self) -> &'static str {
		match self {
			Self::Empty => "unset node",
			Self::Scalar { .. } => "scalar node",
			Self::Array { .. } => "array node",
			Self::Struct { .. } => "struct node",
			Self::DictEntry { .. } => "dict-entry node",
			Self::Variant { .. } => "variant node",
		}
	}
}

fn mismatch(expected: &'static str, got: &NodeData) -> WireError {
	WireError::TypeMismatch {
		expected,
		got: got.kind().to_owned(),
	}
}

impl Default for MemNodes {
	fn default() -> Self {
		Self::new()
	}
}

impl MemNodes {
	/// Empty table with the null sentinel slot reserved.
	pub fn new() -> Self {
		Self {
			nodes: vec![NodeData::Empty],
		}
	}

	/// Allocate a fresh unset node and return its handle.
	pub fn alloc(&mut self) -> NodeId {
		self.nodes.push(NodeData::Empty);
		NodeId(self.nodes.len() as u64 - 1)
	}

	/// Number of allocated nodes, the reserved sentinel slot included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the table holds no nodes beyond the sentinel slot.
	pub fn is_empty(&self) -> bool {
		self.nodes.len() <= 1
	}

	fn data(&self, node: NodeId) -> Result<&NodeData> {
		if node.is_null() {
			return Err(WireError::InvalidNode);
		}
		self.nodes.get(node.0 as usize).ok_or(WireError::InvalidNode)
	}

	fn data_mut(&mut self, node: NodeId) -> Result<&mut NodeData> {
		if node.is_null() {
			return Err(WireError::InvalidNode);
		}
		self.nodes.get_mut(node.0 as usize).ok_or(WireError::InvalidNode)
	}

	fn child(list: &[NodeId], index: usize) -> Result<NodeId> {
		list.get(index).copied().ok_or(WireError::NodeIndexOutOfRange {
			index,
			count: list.len(),
		})
	}

	fn signature_of_impl(&self, node: NodeId, depth: u32) -> Result<String> {
		if depth >= sig::MAX_NESTING_DEPTH {
			return Err(WireError::MalformedSignature {
				signature: "...".to_owned(),
			});
		}

		match self.data(node)? {
			NodeData::Empty => Err(WireError::InvalidNode),
			NodeData::Scalar { tag, .. } => Ok(tag.code().to_string()),
			NodeData::Array { elem_sig, .. } => Ok(format!("a{elem_sig}")),
			NodeData::Struct { members } => {
				let mut out = String::from("(");
				for member in members {
					out.push_str(&self.signature_of_impl(*member, depth + 1)?);
				}
				out.push(')');
				Ok(out)
			}
			NodeData::DictEntry { key, val } => {
				let mut out = String::from("{");
				out.push_str(&self.signature_of_impl(*key, depth + 1)?);
				out.push_str(&self.signature_of_impl(*val, depth + 1)?);
				out.push('}');
				Ok(out)
			}
			NodeData::Variant { .. } => Ok("v".to_owned()),
		}
	}
}

impl NodeStore for MemNodes {
	fn type_tag(&self, node: NodeId) -> Result<TypeTag> {
		match self.data(node)? {
			NodeData::Empty => Err(WireError::InvalidNode),
			NodeData::Scalar { tag, .. } => Ok(*tag),
			NodeData::Array { .. } => Ok(TypeTag::Array),
			NodeData::Struct { .. } => Ok(TypeTag::Struct),
			NodeData::DictEntry { .. } => Ok(TypeTag::DictEntry),
			NodeData::Variant { .. } => Ok(TypeTag::Variant),
		}
	}

	fn get_bool(&self, node: NodeId) -> Result<bool> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Bool(v), ..
			} => Ok(*v),
			other => Err(mismatch("boolean node", other)),
		}
	}

	fn get_byte(&self, node: NodeId) -> Result<u8> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Byte(v), ..
			} => Ok(*v),
			other => Err(mismatch("byte node", other)),
		}
	}

	fn get_i16(&self, node: NodeId) -> Result<i16> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Int16(v), ..
			} => Ok(*v),
			other => Err(mismatch("i16 node", other)),
		}
	}

	fn get_u16(&self, node: NodeId) -> Result<u16> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Uint16(v), ..
			} => Ok(*v),
			other => Err(mismatch("u16 node", other)),
		}
	}

	fn get_i32(&self, node: NodeId) -> Result<i32> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Int32(v), ..
			} => Ok(*v),
			other => Err(mismatch("i32 node", other)),
		}
	}

	fn get_u32(&self, node: NodeId) -> Result<u32> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Uint32(v), ..
			} => Ok(*v),
			other => Err(mismatch("u32 node", other)),
		}
	}

	fn get_i64(&self, node: NodeId) -> Result<i64> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Int64(v), ..
			} => Ok(*v),
			other => Err(mismatch("i64 node", other)),
		}
	}

	fn get_u64(&self, node: NodeId) -> Result<u64> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Uint64(v), ..
			} => Ok(*v),
			other => Err(mismatch("u64 node", other)),
		}
	}

	fn get_f64(&self, node: NodeId) -> Result<f64> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Double(v), ..
			} => Ok(*v),
			other => Err(mismatch("double node", other)),
		}
	}

	fn get_string(&self, node: NodeId) -> Result<&str> {
		match self.data(node)? {
			NodeData::Scalar {
				tag: TypeTag::Str,
				value: Scalar::Str(v),
			} => Ok(v),
			other => Err(mismatch("string node", other)),
		}
	}

	fn get_object_path(&self, node: NodeId) -> Result<&str> {
		match self.data(node)? {
			NodeData::Scalar {
				tag: TypeTag::ObjectPath,
				value: Scalar::Str(v),
			} => Ok(v),
			other => Err(mismatch("object path node", other)),
		}
	}

	fn get_signature_str(&self, node: NodeId) -> Result<&str> {
		match self.data(node)? {
			NodeData::Scalar {
				tag: TypeTag::SignatureStr,
				value: Scalar::Str(v),
			} => Ok(v),
			other => Err(mismatch("signature node", other)),
		}
	}

	fn get_handle(&self, node: NodeId) -> Result<u64> {
		match self.data(node)? {
			NodeData::Scalar {
				value: Scalar::Handle(v), ..
			} => Ok(*v),
			other => Err(mismatch("handle node", other)),
		}
	}

	fn element_count(&self, node: NodeId) -> Result<usize> {
		match self.data(node)? {
			NodeData::Array { elems, .. } => Ok(elems.len()),
			other => Err(mismatch("array node", other)),
		}
	}

	fn element(&self, node: NodeId, index: usize) -> Result<NodeId> {
		match self.data(node)? {
			NodeData::Array { elems, .. } => Self::child(elems, index),
			other => Err(mismatch("array node", other)),
		}
	}

	fn element_signature(&self, node: NodeId) -> Result<&str> {
		match self.data(node)? {
			NodeData::Array { elem_sig, .. } => Ok(elem_sig),
			other => Err(mismatch("array node", other)),
		}
	}

	fn member_count(&self, node: NodeId) -> Result<usize> {
		match self.data(node)? {
			NodeData::Struct { members } => Ok(members.len()),
			other => Err(mismatch("struct node", other)),
		}
	}

	fn member(&self, node: NodeId, index: usize) -> Result<NodeId> {
		match self.data(node)? {
			NodeData::Struct { members } => Self::child(members, index),
			other => Err(mismatch("struct node", other)),
		}
	}

	fn key(&self, node: NodeId) -> Result<NodeId> {
		match self.data(node)? {
			NodeData::DictEntry { key, .. } => Ok(*key),
			other => Err(mismatch("dict-entry node", other)),
		}
	}

	fn value(&self, node: NodeId) -> Result<NodeId> {
		match self.data(node)? {
			NodeData::DictEntry { val, .. } => Ok(*val),
			NodeData::Variant { inner } => Ok(*inner),
			other => Err(mismatch("dict-entry or variant node", other)),
		}
	}

	fn signature_of(&self, node: NodeId) -> Result<String> {
		self.signature_of_impl(node, 0)
	}

	fn set(&mut self, node: NodeId, signature: &str, scalar: Scalar) -> Result<()> {
		let token = sig::single(signature)?;
		let tag = token
			.chars()
			.next()
			.and_then(TypeTag::from_code)
			.filter(|tag| tag.is_basic())
			.ok_or_else(|| WireError::UnsupportedSignature {
				signature: signature.to_owned(),
			})?;

		let compatible = match (&scalar, tag) {
			(Scalar::Str(_), TypeTag::Str | TypeTag::ObjectPath | TypeTag::SignatureStr) => true,
			(payload, wanted) => payload.tag() == wanted,
		};
		if !compatible {
			return Err(WireError::TypeMismatch {
				expected: "scalar matching signature",
				got: scalar.tag().code().to_string(),
			});
		}

		*self.data_mut(node)? = NodeData::Scalar { tag, value: scalar };
		Ok(())
	}

	fn set_array(&mut self, node: NodeId, element_signature: &str, count: usize) -> Result<()> {
		let elem_sig: Box<str> = sig::single(element_signature)?.into();
		self.data(node)?;
		let elems = (0..count).map(|_| self.alloc()).collect();
		*self.data_mut(node)? = NodeData::Array { elem_sig, elems };
		Ok(())
	}

	fn set_struct(&mut self, node: NodeId, count: usize) -> Result<()> {
		self.data(node)?;
		let members = (0..count).map(|_| self.alloc()).collect();
		*self.data_mut(node)? = NodeData::Struct { members };
		Ok(())
	}

	fn set_dict_entry(&mut self, node: NodeId) -> Result<()> {
		self.data(node)?;
		let key = self.alloc();
		let val = self.alloc();
		*self.data_mut(node)? = NodeData::DictEntry { key, val };
		Ok(())
	}

	fn set_variant(&mut self, node: NodeId, signature: &str, inner: NodeId) -> Result<()> {
		let stored = self.signature_of(inner)?;
		if stored != signature {
			return Err(WireError::TypeMismatch {
				expected: "variant signature matching inner node",
				got: stored,
			});
		}
		*self.data_mut(node)? = NodeData::Variant { inner };
		Ok(())
	}

	fn set_variant_empty(&mut self, node: NodeId) -> Result<()> {
		self.data(node)?;
		let inner = self.alloc();
		*self.data_mut(node)? = NodeData::Variant { inner };
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::MemNodes;
	use crate::wire::node::{NodeId, NodeStore, Scalar};
	use crate::wire::WireError;

	#[test]
	fn null_sentinel_is_never_a_valid_node() {
		let store = MemNodes::new();
		assert!(matches!(store.type_tag(NodeId::NULL), Err(WireError::InvalidNode)));
	}

	#[test]
	fn compound_signature_is_recomputed_from_stored_shape() {
		let mut store = MemNodes::new();
		let root = store.alloc();
		store.set_struct(root, 2).expect("struct");
		let first = store.member(root, 0).expect("member");
		let second = store.member(root, 1).expect("member");
		store.set(first, "s", Scalar::Str("x".into())).expect("set");
		store.set_array(second, "i", 0).expect("array");
		assert_eq!(store.signature_of(root).expect("signature"), "(sai)");
	}

	#[test]
	fn scalar_getter_rejects_wrong_tag() {
		let mut store = MemNodes::new();
		let node = store.alloc();
		store.set(node, "i", Scalar::Int32(5)).expect("set");
		assert!(matches!(store.get_bool(node), Err(WireError::TypeMismatch { .. })));
	}
}
