#![allow(missing_docs)]

use wirearg::wire::{
	MapValue, MemNodes, NodeStore, RecordDef, TypeDesc, Value, Variant, WireError, marshal, marshal_args, unmarshal, unmarshal_args,
};

#[test]
fn generic_struct_targets_infer_a_positional_record_from_the_wire_signature() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	let value = Value::Struct(vec![Value::Str("x".into()), Value::Int32(42)]);
	marshal(&mut store, root, "(si)", &value).expect("marshal succeeds");

	let recovered = unmarshal(&store, root, &TypeDesc::Unspecified).expect("unmarshal succeeds");
	assert_eq!(recovered, Value::Struct(vec![Value::Str("x".into()), Value::Int32(42)]));
}

#[test]
fn generic_map_targets_infer_key_and_value_types() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	let value: MapValue = [
		(Value::Str("a".into()), Value::Int32(1)),
		(Value::Str("b".into()), Value::Int32(2)),
	]
	.into_iter()
	.collect();
	marshal(&mut store, root, "a{si}", &Value::Map(value.clone())).expect("marshal succeeds");

	let recovered = unmarshal(&store, root, &TypeDesc::Unspecified).expect("unmarshal succeeds");
	assert_eq!(recovered, Value::Map(value));
}

#[test]
fn record_targets_produce_named_fields_positionally() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	marshal(&mut store, root, "(si)", &Value::Struct(vec![Value::Str("x".into()), Value::Int32(42)])).expect("marshal succeeds");

	let target = TypeDesc::Record(RecordDef::new("Sample", vec![("name", TypeDesc::Str), ("count", TypeDesc::Int32)]));
	let Value::Record(record) = unmarshal(&store, root, &target).expect("unmarshal succeeds") else {
		panic!("expected record value");
	};
	assert_eq!(record.type_name.as_ref(), "Sample");
	assert_eq!(record.fields[0].name.as_ref(), "name");
	assert_eq!(record.fields[0].value, Value::Str("x".into()));
	assert_eq!(record.fields[1].name.as_ref(), "count");
	assert_eq!(record.fields[1].value, Value::Int32(42));
}

#[test]
fn record_values_marshal_back_through_their_field_order() {
	let target = TypeDesc::Record(RecordDef::new("Sample", vec![("name", TypeDesc::Str), ("count", TypeDesc::Int32)]));

	let mut store = MemNodes::new();
	let root = store.alloc();
	marshal(&mut store, root, "(si)", &Value::Struct(vec![Value::Str("x".into()), Value::Int32(42)])).expect("marshal succeeds");
	let record = unmarshal(&store, root, &target).expect("unmarshal succeeds");

	let copy = store.alloc();
	marshal(&mut store, copy, "(si)", &record).expect("marshal succeeds");
	assert_eq!(store.signature_of(copy).expect("signature"), "(si)");
	assert_eq!(
		unmarshal(&store, copy, &TypeDesc::Unspecified).expect("unmarshal succeeds"),
		Value::Struct(vec![Value::Str("x".into()), Value::Int32(42)])
	);
}

#[test]
fn bound_variants_pass_back_through_marshal_preserving_their_signature() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	marshal(&mut store, root, "v", &Value::Variant(Variant::new("ai", Value::Array(vec![Value::Int32(9)])))).expect("marshal succeeds");

	let passthrough = unmarshal(&store, root, &TypeDesc::Unspecified).expect("unmarshal succeeds");
	let copy = store.alloc();
	marshal(&mut store, copy, "v", &passthrough).expect("marshal succeeds");

	let inner = store.value(copy).expect("variant inner");
	assert_eq!(store.signature_of(inner).expect("signature"), "ai");

	let Value::Variant(variant) = unmarshal(&store, copy, &TypeDesc::Unspecified).expect("unmarshal succeeds") else {
		panic!("expected variant wrapper");
	};
	assert_eq!(
		variant.resolve(&store, &TypeDesc::Unspecified).expect("resolve succeeds"),
		Value::Array(vec![Value::Int32(9)])
	);
}

#[test]
fn argument_packs_round_trip_member_by_member() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	let values = [Value::Str("x".into()), Value::Int32(42), Value::Bool(true)];
	marshal_args(&mut store, root, "sib", &values).expect("marshal succeeds");
	assert_eq!(store.signature_of(root).expect("signature"), "(sib)");

	let params = vec![TypeDesc::Unspecified; 3];
	let recovered = unmarshal_args(&store, root, &params).expect("unmarshal succeeds");
	assert_eq!(recovered, values);
}

#[test]
fn argument_packs_enforce_parameter_arity() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	let err = marshal_args(&mut store, root, "si", &[Value::Str("x".into())]).expect_err("marshal should fail");
	assert!(
		matches!(err.root_cause(), WireError::ArityMismatch { members: 2, fields: 1, .. }),
		"got {err:?}"
	);

	marshal_args(&mut store, root, "si", &[Value::Str("x".into()), Value::Int32(1)]).expect("marshal succeeds");
	let err = unmarshal_args(&store, root, &[TypeDesc::Unspecified]).expect_err("unmarshal should fail");
	assert!(
		matches!(err.root_cause(), WireError::ArityMismatch { members: 2, fields: 1, .. }),
		"got {err:?}"
	);
}

#[test]
fn concrete_element_types_reject_nonconforming_wire_elements() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	marshal(&mut store, root, "as", &Value::Array(vec![Value::Str("x".into())])).expect("marshal succeeds");

	let target = TypeDesc::Array(Box::new(TypeDesc::Int32));
	let err = unmarshal(&store, root, &target).expect_err("unmarshal should fail");
	assert!(matches!(err.root_cause(), WireError::TypeMismatch { .. }), "got {err:?}");
}
