/// Signature character opening a struct token.
pub const STRUCT_OPEN: char = '(';
/// Signature character closing a struct token.
pub const STRUCT_CLOSE: char = ')';
/// Signature character opening a dict-entry token.
pub const DICT_ENTRY_OPEN: char = '{';
/// Signature character closing a dict-entry token.
pub const DICT_ENTRY_CLOSE: char = '}';

/// Wire type tag for one signature token or one stored node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
	/// `b` boolean.
	Boolean,
	/// `y` unsigned 8-bit integer.
	Byte,
	/// `n` signed 16-bit integer.
	Int16,
	/// `q` unsigned 16-bit integer.
	Uint16,
	/// `i` signed 32-bit integer.
	Int32,
	/// `u` unsigned 32-bit integer.
	Uint32,
	/// `x` signed 64-bit integer.
	Int64,
	/// `t` unsigned 64-bit integer.
	Uint64,
	/// `d` IEEE 754 double.
	Double,
	/// `s` UTF-8 string.
	Str,
	/// `o` object path string.
	ObjectPath,
	/// `g` signature string.
	SignatureStr,
	/// `h` opaque integer handle.
	Handle,
	/// `a` array container.
	Array,
	/// `(...)` struct container.
	Struct,
	/// `{..}` dict-entry container.
	DictEntry,
	/// `v` variant container.
	Variant,
}

impl TypeTag {
	/// Map a signature character to its tag, container openers included.
	pub fn from_code(code: char) -> Option<Self> {
		match code {
			'b' => Some(Self::Boolean),
			'y' => Some(Self::Byte),
			'n' => Some(Self::Int16),
			'q' => Some(Self::Uint16),
			'i' => Some(Self::Int32),
			'u' => Some(Self::Uint32),
			'x' => Some(Self::Int64),
			't' => Some(Self::Uint64),
			'd' => Some(Self::Double),
			's' => Some(Self::Str),
			'o' => Some(Self::ObjectPath),
			'g' => Some(Self::SignatureStr),
			'h' => Some(Self::Handle),
			'a' => Some(Self::Array),
			STRUCT_OPEN => Some(Self::Struct),
			DICT_ENTRY_OPEN => Some(Self::DictEntry),
			'v' => Some(Self::Variant),
			_ => None,
		}
	}

	/// Canonical single-character code for this tag.
	pub const fn code(self) -> char {
		match self {
			Self::Boolean => 'b',
			Self::Byte => 'y',
			Self::Int16 => 'n',
			Self::Uint16 => 'q',
			Self::Int32 => 'i',
			Self::Uint32 => 'u',
			Self::Int64 => 'x',
			Self::Uint64 => 't',
			Self::Double => 'd',
			Self::Str => 's',
			Self::ObjectPath => 'o',
			Self::SignatureStr => 'g',
			Self::Handle => 'h',
			Self::Array => 'a',
			Self::Struct => 'r',
			Self::DictEntry => 'e',
			Self::Variant => 'v',
		}
	}

	/// Whether the tag is a basic (non-container) type.
	pub const fn is_basic(self) -> bool {
		!matches!(self, Self::Array | Self::Struct | Self::DictEntry | Self::Variant)
	}

	/// Whether the tag is an integer-valued primitive eligible for enum ordinals.
	pub const fn is_integer(self) -> bool {
		matches!(
			self,
			Self::Byte | Self::Int16 | Self::Uint16 | Self::Int32 | Self::Uint32 | Self::Int64 | Self::Uint64
		)
	}
}
