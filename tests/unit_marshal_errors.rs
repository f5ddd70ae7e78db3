#![allow(missing_docs)]

use wirearg::wire::{MemNodes, NodeId, RecordDef, TypeDesc, Value, WireError, marshal, unmarshal};

fn marshal_err(signature: &str, value: &Value) -> WireError {
	let mut store = MemNodes::new();
	let root = store.alloc();
	marshal(&mut store, root, signature, value).expect_err("marshal should fail")
}

#[test]
fn marshalling_three_members_into_a_two_member_struct_fails_with_arity_mismatch() {
	let value = Value::Struct(vec![Value::Int32(1), Value::Int32(2), Value::Int32(3)]);
	let err = marshal_err("(ii)", &value);
	assert!(matches!(err, WireError::Marshal { .. }), "outer wrapper expected, got {err:?}");
	assert!(
		matches!(err.root_cause(), WireError::ArityMismatch { members: 2, fields: 3, .. }),
		"got {err:?}"
	);
}

#[test]
fn unmarshalling_two_members_into_a_three_field_record_fails_with_arity_mismatch() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	let value = Value::Struct(vec![Value::Str("x".into()), Value::Int32(42)]);
	marshal(&mut store, root, "(si)", &value).expect("marshal succeeds");

	let target = TypeDesc::Record(RecordDef::new(
		"Sample",
		vec![("name", TypeDesc::Str), ("count", TypeDesc::Int32), ("extra", TypeDesc::Bool)],
	));
	let err = unmarshal(&store, root, &target).expect_err("unmarshal should fail");
	assert!(matches!(err, WireError::Unmarshal { .. }), "outer wrapper expected, got {err:?}");
	assert!(
		matches!(err.root_cause(), WireError::ArityMismatch { members: 2, fields: 3, .. }),
		"got {err:?}"
	);
}

#[test]
fn null_is_rejected_for_string_and_container_signatures() {
	for signature in ["s", "o", "g", "ai", "(i)", "a{si}"] {
		let err = marshal_err(signature, &Value::Null);
		assert!(
			matches!(err.root_cause(), WireError::NullValue { .. }),
			"signature '{signature}' got {err:?}"
		);
	}
}

#[test]
fn null_is_a_type_mismatch_for_numeric_signatures() {
	for signature in ["y", "n", "q", "i", "u", "x", "t", "d", "b"] {
		let err = marshal_err(signature, &Value::Null);
		assert!(
			matches!(err.root_cause(), WireError::TypeMismatch { .. }),
			"signature '{signature}' got {err:?}"
		);
	}
}

#[test]
fn unmarshalling_the_null_sentinel_always_fails_with_invalid_node() {
	let store = MemNodes::new();
	let err = unmarshal(&store, NodeId::NULL, &TypeDesc::Unspecified).expect_err("unmarshal should fail");
	assert!(matches!(err, WireError::InvalidNode), "got {err:?}");
}

#[test]
fn unknown_tags_fail_with_unsupported_signature() {
	let err = marshal_err("m", &Value::Int32(1));
	assert!(matches!(err.root_cause(), WireError::UnsupportedSignature { .. }), "got {err:?}");
}

#[test]
fn unbalanced_signatures_fail_with_malformed_signature() {
	for signature in ["(si", "a", "a{si", "{si}}"] {
		let err = marshal_err(signature, &Value::Int32(1));
		assert!(
			matches!(err.root_cause(), WireError::MalformedSignature { .. }),
			"signature '{signature}' got {err:?}"
		);
	}
}

#[test]
fn scalar_values_do_not_marshal_into_container_signatures() {
	let err = marshal_err("ai", &Value::Int32(1));
	assert!(matches!(err.root_cause(), WireError::TypeMismatch { .. }), "got {err:?}");

	let err = marshal_err("a{si}", &Value::Array(vec![]));
	assert!(matches!(err.root_cause(), WireError::TypeMismatch { .. }), "got {err:?}");
}

#[test]
fn wrapped_errors_keep_the_attempted_signature() {
	let err = marshal_err("(ii)", &Value::Struct(vec![Value::Int32(1)]));
	match err {
		WireError::Marshal { signature, .. } => assert_eq!(signature, "(ii)"),
		other => panic!("outer wrapper expected, got {other:?}"),
	}
}
