pub mod util;

use assert_matches::assert_matches;

use crate::{
	report::Report,
	runtime::{value::Value, Runtime},
};


#[test]
fn test_report_lists_the_public_surface() {
	let mut runtime = Runtime::new().expect("failed to create runtime");
	let add = runtime.native("add").expect("missing native");

	let a = runtime.symbol("a");
	let specialized = runtime
		.specialize(&add, vec![(a, Value::Integer(1))])
		.expect("failed to specialize");

	let spec = util::spec(&mut runtime, r#"/y [integer!] "Unused""#);
	let augmented = runtime.augment(&specialized, &spec).expect("failed to augment");

	let report = serde_json::to_value(Report::new(&specialized, runtime.interner()))
		.expect("failed to serialize report");

	assert_eq!(report["label"], "add");
	assert_eq!(report["description"], "Adds two integers");
	assert_eq!(report["dispatcher"], "adapter");
	assert_eq!(report["derivation"], "specialized");
	assert_eq!(report["specializations"]["a"], 1);

	let names: Vec<&str> = report["parameters"]
		.as_array()
		.expect("parameters must be an array")
		.iter()
		.filter_map(|param| param["name"].as_str())
		.collect();
	assert_eq!(names, ["return", "b"]);

	let report = serde_json::to_value(Report::new(&augmented, runtime.interner()))
		.expect("failed to serialize report");

	assert_eq!(report["derivation"], "augmented");

	// Augmentation seals the specialization.
	assert_matches!(report["specializations"].as_object(), Some(map) if map.is_empty());

	let y = &report["parameters"][2];
	assert_eq!(y["name"], "y");
	assert_eq!(y["class"], "refinement");
	assert_eq!(y["types"], serde_json::json!(["integer!"]));
	assert_eq!(y["notes"], "Unused");
}


#[test]
fn test_report_names_open_categories() {
	let mut runtime = Runtime::new().expect("failed to create runtime");
	let add = runtime.native("add").expect("missing native");
	runtime.register_extension("point!");

	let spec = util::spec(&mut runtime, "/at [point! none!]");
	let augmented = runtime.augment(&add, &spec).expect("failed to augment");

	let report = serde_json::to_value(Report::new(&augmented, runtime.interner()))
		.expect("failed to serialize report");

	assert_eq!(report["parameters"][3]["types"], serde_json::json!(["none!", "point!"]));

	let report = serde_json::to_value(Report::new(&add, runtime.interner()))
		.expect("failed to serialize report");

	assert_eq!(report["derivation"], serde_json::Value::Null);
}
