use crate::wire::Result;
use crate::wire::tag::TypeTag;

/// Opaque handle to one wire node owned by the external transport layer.
///
/// The engine never assumes ownership of the referenced storage and never
/// frees it; id `0` is the null/invalid sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
	/// Null/invalid node sentinel.
	pub const NULL: Self = Self(0);

	/// Whether this handle is the null sentinel.
	pub const fn is_null(self) -> bool {
		self.0 == 0
	}
}

/// One primitive wire payload accepted by [`NodeStore::set`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// Boolean payload (`b`).
	Bool(bool),
	/// Byte payload (`y`).
	Byte(u8),
	/// Signed 16-bit payload (`n`).
	Int16(i16),
	/// Unsigned 16-bit payload (`q`).
	Uint16(u16),
	/// Signed 32-bit payload (`i`).
	Int32(i32),
	/// Unsigned 32-bit payload (`u`).
	Uint32(u32),
	/// Signed 64-bit payload (`x`).
	Int64(i64),
	/// Unsigned 64-bit payload (`t`).
	Uint64(u64),
	/// Double payload (`d`).
	Double(f64),
	/// Opaque handle payload (`h`).
	Handle(u64),
	/// String payload (`s`, `o`, or `g` depending on the set signature).
	Str(Box<str>),
}

impl Scalar {
	/// Wire tag this payload satisfies when set with a matching signature.
	pub fn tag(&self) -> TypeTag {
		match self {
			Self::Bool(_) => TypeTag::Boolean,
			Self::Byte(_) => TypeTag::Byte,
			Self::Int16(_) => TypeTag::Int16,
			Self::Uint16(_) => TypeTag::Uint16,
			Self::Int32(_) => TypeTag::Int32,
			Self::Uint32(_) => TypeTag::Uint32,
			Self::Int64(_) => TypeTag::Int64,
			Self::Uint64(_) => TypeTag::Uint64,
			Self::Double(_) => TypeTag::Double,
			Self::Handle(_) => TypeTag::Handle,
			Self::Str(_) => TypeTag::Str,
		}
	}
}

/// Primitive node interface supplied by the external transport/storage layer.
///
/// The engine's only boundary: every query and constructor may fail (the
/// failure propagates unchanged) but never partially mutates a node from the
/// engine's perspective.
pub trait NodeStore {
	/// Wire type tag of a stored node.
	fn type_tag(&self, node: NodeId) -> Result<TypeTag>;

	/// Boolean payload of a `b` node.
	fn get_bool(&self, node: NodeId) -> Result<bool>;
	/// Byte payload of a `y` node.
	fn get_byte(&self, node: NodeId) -> Result<u8>;
	/// Signed 16-bit payload of an `n` node.
	fn get_i16(&self, node: NodeId) -> Result<i16>;
	/// Unsigned 16-bit payload of a `q` node.
	fn get_u16(&self, node: NodeId) -> Result<u16>;
	/// Signed 32-bit payload of an `i` node.
	fn get_i32(&self, node: NodeId) -> Result<i32>;
	/// Unsigned 32-bit payload of a `u` node.
	fn get_u32(&self, node: NodeId) -> Result<u32>;
	/// Signed 64-bit payload of an `x` node.
	fn get_i64(&self, node: NodeId) -> Result<i64>;
	/// Unsigned 64-bit payload of a `t` node.
	fn get_u64(&self, node: NodeId) -> Result<u64>;
	/// Double payload of a `d` node.
	fn get_f64(&self, node: NodeId) -> Result<f64>;
	/// String payload of an `s` node.
	fn get_string(&self, node: NodeId) -> Result<&str>;
	/// Object-path payload of an `o` node.
	fn get_object_path(&self, node: NodeId) -> Result<&str>;
	/// Signature-string payload of a `g` node.
	fn get_signature_str(&self, node: NodeId) -> Result<&str>;
	/// Handle payload of an `h` node.
	fn get_handle(&self, node: NodeId) -> Result<u64>;

	/// Element count of an array node.
	fn element_count(&self, node: NodeId) -> Result<usize>;
	/// Indexed element node of an array node.
	fn element(&self, node: NodeId, index: usize) -> Result<NodeId>;
	/// Element signature of an array node.
	fn element_signature(&self, node: NodeId) -> Result<&str>;
	/// Member count of a struct node.
	fn member_count(&self, node: NodeId) -> Result<usize>;
	/// Indexed member node of a struct node.
	fn member(&self, node: NodeId, index: usize) -> Result<NodeId>;
	/// Key node of a dict-entry node.
	fn key(&self, node: NodeId) -> Result<NodeId>;
	/// Value node of a dict-entry node, or the inner node of a variant node.
	fn value(&self, node: NodeId) -> Result<NodeId>;
	/// Compound signature describing a stored node.
	fn signature_of(&self, node: NodeId) -> Result<String>;

	/// Write a primitive payload under the given single-token signature.
	fn set(&mut self, node: NodeId, signature: &str, scalar: Scalar) -> Result<()>;
	/// Turn `node` into an array of `count` fresh element nodes.
	fn set_array(&mut self, node: NodeId, element_signature: &str, count: usize) -> Result<()>;
	/// Turn `node` into a struct of `count` fresh member nodes.
	fn set_struct(&mut self, node: NodeId, count: usize) -> Result<()>;
	/// Turn `node` into a dict-entry with fresh key/value nodes.
	fn set_dict_entry(&mut self, node: NodeId) -> Result<()>;
	/// Turn `node` into a variant wrapping an existing inner node of `signature`.
	fn set_variant(&mut self, node: NodeId, signature: &str, inner: NodeId) -> Result<()>;
	/// Turn `node` into an empty variant with a fresh inner node to be filled next.
	fn set_variant_empty(&mut self, node: NodeId) -> Result<()>;
}
