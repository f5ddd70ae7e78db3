#![allow(missing_docs)]

use std::process::Command;

use serde_json::Value;

#[test]
fn roundtrip_json_output_recovers_the_input_value() {
	let json = run_json(&["roundtrip", "a{si}", r#"{"a": 1, "b": 2}"#]);
	assert_eq!(json["signature"], "a{si}");
	assert_eq!(json["value"]["a"], 1);
	assert_eq!(json["value"]["b"], 2);
}

#[test]
fn roundtrip_resolves_variant_payloads_for_display() {
	let json = run_json(&["roundtrip", "v", r#"{"sig": "i", "value": 7}"#]);
	assert_eq!(json["value"]["sig"], "i");
	assert_eq!(json["value"]["value"], 7);
}

#[test]
fn resolve_json_output_describes_the_type_tree() {
	let json = run_json(&["resolve", "a{sv}", "--json"]);
	assert_eq!(json["signature"], "a{sv}");
	assert_eq!(json["type"]["map"][0], "string");
	assert_eq!(json["type"]["map"][1], "variant");
}

#[test]
fn encode_json_output_lists_the_node_table() {
	let json = run_json(&["encode", "(si)", r#"["x", 42]"#, "--json"]);
	assert_eq!(json["signature"], "(si)");
	assert_eq!(json["root"]["tag"], "r");
	assert_eq!(json["root"]["members"][0]["tag"], "s");
	assert_eq!(json["root"]["members"][1]["value"], "42");
}

#[test]
fn malformed_signatures_fail_with_a_diagnostic() {
	let output = Command::new(env!("CARGO_BIN_EXE_wirearg"))
		.args(["sig", "(si"])
		.output()
		.expect("command executes");
	assert!(!output.status.success(), "expected failure exit status");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("malformed signature"), "stderr: {stderr}");
}

fn run_json(args: &[&str]) -> Value {
	let output = Command::new(env!("CARGO_BIN_EXE_wirearg")).args(args).output().expect("command executes");
	assert!(
		output.status.success(),
		"command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}
