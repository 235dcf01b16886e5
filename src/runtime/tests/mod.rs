use assert_matches::assert_matches;
use gc::Gc;

use crate::{
	fmt::FmtString,
	tests::util,
};
use super::{
	action::Action,
	ancestry::MAX_DEPTH,
	frame::Frame,
	value::{Kind, Type, Typeset, Value},
	Panic,
	Rootvar,
	Runtime,
};


fn runtime() -> Runtime {
	Runtime::new().expect("failed to create runtime")
}


fn native(runtime: &Runtime, name: &str) -> Gc<Action> {
	runtime
		.native(name)
		.unwrap_or_else(|| panic!("missing native {}", name))
}


#[test]
fn test_native_library() {
	let runtime = runtime();

	let names: Vec<_> = runtime
		.natives()
		.iter()
		.map(|native| native.fmt_string(runtime.interner()))
		.collect();

	assert_eq!(names.len(), 5);

	for (rendered, name) in names.iter().zip(&["add", "join", "length", "negate", "type-of"]) {
		assert!(rendered.contains(name), "{} should be {}", rendered, name);
	}

	assert!(runtime.native("missing").is_none());
}


#[test]
fn test_optional_parameter_end_to_end() {
	let mut runtime = runtime();
	let base = util::native(&mut runtime, util::Double);

	let spec = util::spec(&mut runtime, "/y [integer!]");
	let augmented = runtime.augment(&base, &spec).expect("failed to augment");
	let y = runtime.symbol("y");

	assert_matches!(runtime.call(&base, vec![Value::Integer(21)], Vec::new()), Ok(Value::Integer(42)));
	assert_matches!(runtime.call(&augmented, vec![Value::Integer(21)], Vec::new()), Ok(Value::Integer(42)));
	assert_matches!(
		runtime.call(&augmented, vec![Value::Integer(21)], vec![(y, Value::Integer(1))]),
		Ok(Value::Integer(42))
	);

	assert_matches!(
		runtime.call(&base, vec![Value::Integer(21)], vec![(y, Value::Integer(1))]),
		Err(Panic::UnknownArgument(name)) if name == y
	);
	assert_matches!(
		runtime.call(&base, vec![Value::Integer(21), Value::Integer(1)], Vec::new()),
		Err(Panic::TooManyArguments { expected: 1, got: 2 })
	);
}


#[test]
fn test_call_errors() {
	let mut runtime = runtime();
	let add = native(&runtime, "add");

	let a = runtime.symbol("a");
	let b = runtime.symbol("b");
	let keys = runtime.interner().keys();

	assert_matches!(
		runtime.call(&add, vec![Value::Integer(1)], Vec::new()),
		Err(Panic::MissingArgument(name)) if name == b
	);
	assert_matches!(
		runtime.call(&add, vec!["1".into(), Value::Integer(2)], Vec::new()),
		Err(Panic::TypeError { name, value: Value::Text(_), expected }) if name == a && expected == Kind::Integer.into()
	);
	assert_matches!(
		runtime.call(&add, vec![Value::Integer(1), Value::Integer(2)], vec![(keys.return_, Value::Integer(3))]),
		Err(Panic::OutputParameter(_))
	);
	assert_matches!(
		runtime.call(&add, Vec::new(), vec![(a, Value::Integer(1)), (b, Value::Integer(2))]),
		Ok(Value::Integer(3))
	);
}


#[test]
fn test_frame_surface() {
	let mut runtime = runtime();
	let add = native(&runtime, "add");

	let a = runtime.symbol("a");
	let missing = runtime.symbol("missing");
	let keys = runtime.interner().keys();

	let mut frame = Frame::new(&add);

	assert_matches!(frame.get(a), Ok(Value::None));
	frame.set(a, Value::Integer(1)).expect("failed to set a");
	assert_matches!(frame.get(a), Ok(Value::Integer(1)));

	assert_matches!(frame.set(missing, Value::Integer(1)), Err(Panic::UnknownArgument(_)));
	assert_matches!(frame.get(missing), Err(Panic::UnknownArgument(_)));
	assert_matches!(frame.set(keys.return_, Value::Integer(1)), Err(Panic::OutputParameter(_)));
	assert_matches!(frame.set(a, Value::None), Err(Panic::TypeError { .. }));

	assert_eq!(frame.label(), add.label());
	assert_eq!(frame.table().id(), add.paramlist().id());
	assert!(!frame.rootvar().binding.is_bound());
}


#[test]
fn test_hidden_parameters() {
	let mut runtime = runtime();
	let add = native(&runtime, "add");
	let a = runtime.symbol("a");

	let specialized = runtime
		.specialize(&add, vec![(a, Value::Integer(1))])
		.expect("failed to specialize");

	let spec = util::spec(&mut runtime, "/y");
	let augmented = runtime.augment(&specialized, &spec).expect("failed to augment");

	// The same failure through the source and through the derived action.
	for action in &[&specialized, &augmented] {
		let mut frame = Frame::new(action);

		assert_matches!(frame.set(a, Value::Integer(2)), Err(Panic::HiddenParameter(name)) if name == a);
		assert_matches!(frame.get(a), Err(Panic::HiddenParameter(name)) if name == a);
		assert_matches!(
			runtime.call(action, Vec::new(), vec![(a, Value::Integer(2))]),
			Err(Panic::HiddenParameter(_))
		);
	}
}


#[test]
fn test_refinements() {
	let mut runtime = runtime();
	let join = native(&runtime, "join");
	let with = runtime.symbol("with");

	let args = || vec!["head".into(), "tail".into()];

	assert_matches!(
		runtime.call(&join, args(), Vec::new()),
		Ok(Value::Text(ref text)) if text.as_bytes() == b"headtail"
	);
	assert_matches!(
		runtime.call(&join, args(), vec![(with, ", ".into())]),
		Ok(Value::Text(ref text)) if text.as_bytes() == b"head, tail"
	);
	// Refinements may be reset to none.
	assert_matches!(
		runtime.call(&join, args(), vec![(with, ", ".into()), (with, Value::None)]),
		Ok(Value::Text(ref text)) if text.as_bytes() == b"headtail"
	);
	assert_matches!(
		runtime.call(&join, args(), vec![(with, Value::Integer(1))]),
		Err(Panic::TypeError { name, .. }) if name == with
	);
}


#[test]
fn test_natives() {
	let mut runtime = runtime();

	let add = native(&runtime, "add");
	let negate = native(&runtime, "negate");
	let length = native(&runtime, "length");
	let type_of = native(&runtime, "type-of");

	assert_matches!(
		runtime.call(&add, vec![Value::Integer(i64::MAX), Value::Integer(1)], Vec::new()),
		Err(Panic::Native { name: "add", .. })
	);
	assert_matches!(runtime.call(&negate, vec![Value::Integer(5)], Vec::new()), Ok(Value::Integer(-5)));
	assert_matches!(
		runtime.call(&negate, vec![Value::Integer(i64::MIN)], Vec::new()),
		Err(Panic::Native { name: "negate", .. })
	);

	let block = util::spec(&mut runtime, "[1 2 3]");
	assert_matches!(runtime.call(&length, block, Vec::new()), Ok(Value::Integer(3)));
	assert_matches!(runtime.call(&length, vec!["four".into()], Vec::new()), Ok(Value::Integer(4)));
	assert_matches!(
		runtime.call(&length, vec![Value::Integer(1)], Vec::new()),
		Err(Panic::TypeError { value: Value::Integer(1), .. })
	);

	assert_matches!(
		runtime.call(&type_of, vec![Value::Integer(1)], Vec::new()),
		Ok(Value::Datatype(Type::Builtin(Kind::Integer)))
	);
	assert_matches!(
		runtime.call(&type_of, vec![Value::None], Vec::new()),
		Ok(Value::Datatype(Type::Builtin(Kind::None)))
	);
	assert_matches!(
		runtime.call(&type_of, vec![Typeset::any_word().into()], Vec::new()),
		Ok(Value::Datatype(Type::Builtin(Kind::Typeset)))
	);
}


#[test]
fn test_binding_survives_derivation() {
	let mut runtime = runtime();
	let probe = util::probe(&mut runtime, &[("greeting", "hello".into())]);

	let greeting = runtime.symbol("greeting");
	let word = runtime.symbol("word");
	let hello = |result: Result<Value, Panic>| matches!(
		result,
		Ok(Value::Text(ref text)) if text.as_bytes() == b"hello"
	);

	assert!(hello(runtime.call(&probe, vec![Value::Word(greeting)], Vec::new())));

	let spec = util::spec(&mut runtime, "/extra");
	let augmented = runtime.augment(&probe, &spec).expect("failed to augment");

	assert!(hello(runtime.call(&augmented, vec![Value::Word(greeting)], Vec::new())));
	assert_eq!(Rootvar::of(&augmented).binding, Rootvar::of(&probe).binding);
	assert!(Rootvar::of(&augmented).binding.is_bound());

	let specialized = runtime
		.specialize(&probe, vec![(word, Value::Word(greeting))])
		.expect("failed to specialize");
	let spec = util::spec(&mut runtime, "/more");
	let derived = runtime.augment(&specialized, &spec).expect("failed to augment");

	assert!(hello(runtime.call(&specialized, Vec::new(), Vec::new())));
	assert!(hello(runtime.call(&derived, Vec::new(), Vec::new())));

	// Unbound words are none.
	let unknown = runtime.symbol("unknown");
	assert_matches!(runtime.call(&augmented, vec![Value::Word(unknown)], Vec::new()), Ok(Value::None));
}


#[test]
fn test_invoke_as() {
	let mut runtime = runtime();
	let add = native(&runtime, "add");
	let negate = native(&runtime, "negate");

	let a = runtime.symbol("a");
	let b = runtime.symbol("b");

	let spec = util::spec(&mut runtime, "/y");
	let first = runtime.augment(&add, &spec).expect("failed to augment");
	let spec = util::spec(&mut runtime, "/z");
	let second = runtime.augment(&first, &spec).expect("failed to augment");

	let fulfilled = |action: &Gc<Action>| {
		let mut frame = Frame::new(action);
		frame.set(a, Value::Integer(1)).expect("failed to set a");
		frame.set(b, Value::Integer(2)).expect("failed to set b");
		frame
	};

	// Frames built for a derivation run through every ancestor, and the other way around.
	for action in &[&add, &first, &second] {
		assert_matches!(runtime.invoke_as(fulfilled(&second), action), Ok(Value::Integer(3)));
		assert_matches!(runtime.invoke_as(fulfilled(*action), &second), Ok(Value::Integer(3)));
	}

	let label = negate.label();
	assert_matches!(
		runtime.invoke_as(fulfilled(&add), &negate),
		Err(Panic::IncompatibleFrame { label: found }) if found == label
	);
}


#[test]
fn test_long_derivation_chains() {
	let mut runtime = runtime();
	let add = native(&runtime, "add");
	let a = runtime.symbol("a");
	let b = runtime.symbol("b");

	let mut specialized = add.clone();
	for _ in 0 ..= MAX_DEPTH {
		specialized = runtime.specialize(&specialized, Vec::new()).expect("failed to specialize");
	}

	let mut augmented = runtime
		.specialize(&add, vec![(a, Value::Integer(1))])
		.expect("failed to specialize");
	for depth in 0 ..= MAX_DEPTH {
		let spec = util::spec(&mut runtime, &format!("/r{}", depth));
		augmented = runtime.augment(&augmented, &spec).expect("failed to augment");
	}
	let outer = runtime
		.specialize(&augmented, vec![(b, Value::Integer(2))])
		.expect("failed to specialize");

	// Calls redirect one link at a time, whatever the depth.
	assert_matches!(
		runtime.call(&specialized, vec![Value::Integer(1), Value::Integer(2)], Vec::new()),
		Ok(Value::Integer(3))
	);
	assert_matches!(runtime.call(&augmented, vec![Value::Integer(2)], Vec::new()), Ok(Value::Integer(3)));
	assert_matches!(runtime.call(&outer, Vec::new(), Vec::new()), Ok(Value::Integer(3)));

	// Running a frame through an action further apart than the walk bound is refused.
	let mut frame = Frame::new(&add);
	frame.set(a, Value::Integer(1)).expect("failed to set a");
	frame.set(b, Value::Integer(2)).expect("failed to set b");
	assert_matches!(runtime.invoke_as(frame, &outer), Err(Panic::IncompatibleFrame { .. }));
}


#[test]
fn test_return_constraint() {
	let mut runtime = runtime();
	let liar = util::native(&mut runtime, util::Liar);

	assert_matches!(
		runtime.call(&liar, Vec::new(), Vec::new()),
		Err(Panic::ReturnTypeError { value: Value::Text(_), expected }) if expected == Kind::Integer.into()
	);

	let spec = util::spec(&mut runtime, "/y");
	let augmented = runtime.augment(&liar, &spec).expect("failed to augment");

	assert_matches!(runtime.call(&augmented, Vec::new(), Vec::new()), Err(Panic::ReturnTypeError { .. }));
}


#[test]
fn test_display() {
	let mut runtime = runtime();
	let add = native(&runtime, "add");
	let a = runtime.symbol("a");
	let y = runtime.symbol("y");

	let specialized = runtime
		.specialize(&add, vec![(a, Value::Integer(1))])
		.expect("failed to specialize");
	let spec = util::spec(&mut runtime, r#"/y [integer!] "Extra""#);
	let augmented = runtime.augment(&specialized, &spec).expect("failed to augment");

	let interner = runtime.interner();

	let action = augmented.fmt_string(interner);
	assert!(action.contains("add"), "{}", action);
	assert!(action.contains("/"), "{}", action);

	let table = augmented.paramlist().fmt_string(interner);
	assert!(table.contains("(sealed)"), "{}", table);
	assert!(table.contains("Extra"), "{}", table);

	let table = specialized.paramlist().fmt_string(interner);
	assert!(table.contains("="), "{}", table);

	let panic = Panic::unknown_argument(y).fmt_string(interner);
	assert!(panic.contains("unknown argument"), "{}", panic);
	assert!(panic.contains("y"), "{}", panic);

	let error = super::Error::duplicate_parameter(a).fmt_string(interner);
	assert!(error.contains("duplicate parameter"), "{}", error);
}
