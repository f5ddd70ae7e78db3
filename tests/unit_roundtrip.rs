#![allow(missing_docs)]

use wirearg::wire::{MapValue, MemNodes, TypeDesc, Value, Variant, marshal, unmarshal};

fn roundtrip(signature: &str, value: &Value) -> Value {
	let mut store = MemNodes::new();
	let root = store.alloc();
	marshal(&mut store, root, signature, value).expect("marshal succeeds");
	unmarshal(&store, root, &TypeDesc::Unspecified).expect("unmarshal succeeds")
}

#[test]
fn every_primitive_tag_round_trips() {
	let cases = [
		("b", Value::Bool(true)),
		("y", Value::Byte(0xfe)),
		("n", Value::Int16(-12345)),
		("q", Value::Uint16(54321)),
		("i", Value::Int32(-42)),
		("u", Value::Uint32(42)),
		("x", Value::Int64(-1_234_567_890_123)),
		("t", Value::Uint64(u64::MAX)),
		("d", Value::Double(2.5)),
		("s", Value::Str("hello".into())),
		("o", Value::ObjectPath("/com/example/Thing".into())),
		("g", Value::SignatureStr("a{sv}".into())),
		("h", Value::Handle(7)),
	];
	for (signature, value) in cases {
		assert_eq!(roundtrip(signature, &value), value, "signature '{signature}'");
	}
}

#[test]
fn structs_round_trip_as_positional_tuples() {
	let value = Value::Struct(vec![Value::Str("x".into()), Value::Int32(42)]);
	assert_eq!(roundtrip("(si)", &value), value);
}

#[test]
fn nested_arrays_round_trip() {
	let value = Value::Array(vec![
		Value::Array(vec![Value::Int32(1), Value::Int32(2)]),
		Value::Array(vec![]),
		Value::Array(vec![Value::Int32(3)]),
	]);
	assert_eq!(roundtrip("aai", &value), value);
}

#[test]
fn arrays_of_structs_round_trip() {
	let value = Value::Array(vec![
		Value::Struct(vec![Value::Int32(1), Value::Str("a".into())]),
		Value::Struct(vec![Value::Int32(2), Value::Str("b".into())]),
	]);
	assert_eq!(roundtrip("a(is)", &value), value);
}

#[test]
fn empty_arrays_round_trip() {
	let value = Value::Array(vec![]);
	assert_eq!(roundtrip("ai", &value), value);
}

#[test]
fn maps_round_trip_regardless_of_entry_order() {
	let value: MapValue = [
		(Value::Str("a".into()), Value::Int32(1)),
		(Value::Str("b".into()), Value::Int32(2)),
	]
	.into_iter()
	.collect();
	assert_eq!(roundtrip("a{si}", &Value::Map(value.clone())), Value::Map(value));
}

#[test]
fn deeply_nested_containers_round_trip() {
	let inner = Value::Struct(vec![Value::Int32(7), Value::Array(vec![Value::Double(0.5), Value::Double(1.5)])]);
	let value: MapValue = [(Value::Str("k".into()), inner)].into_iter().collect();
	assert_eq!(roundtrip("a{s(iad)}", &Value::Map(value.clone())), Value::Map(value));
}

#[test]
fn variants_round_trip_through_deferred_resolution() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	marshal(&mut store, root, "v", &Value::Variant(Variant::new("i", Value::Int32(7)))).expect("marshal succeeds");

	let recovered = unmarshal(&store, root, &TypeDesc::Unspecified).expect("unmarshal succeeds");
	let Value::Variant(variant) = recovered else {
		panic!("expected a variant wrapper, got {recovered:?}");
	};
	assert!(!variant.node().is_null(), "wrapper should bind the wire node");
	assert_eq!(variant.resolve(&store, &TypeDesc::Unspecified).expect("resolve succeeds"), Value::Int32(7));
}

#[test]
fn variant_payloads_may_be_containers() {
	let mut store = MemNodes::new();
	let root = store.alloc();
	let payload = Value::Array(vec![Value::Str("a".into()), Value::Str("b".into())]);
	marshal(&mut store, root, "v", &Value::Variant(Variant::new("as", payload.clone()))).expect("marshal succeeds");

	let Value::Variant(variant) = unmarshal(&store, root, &TypeDesc::Unspecified).expect("unmarshal succeeds") else {
		panic!("expected a variant wrapper");
	};
	assert_eq!(variant.resolve(&store, &TypeDesc::Unspecified).expect("resolve succeeds"), payload);
}
