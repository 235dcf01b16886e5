use std::collections::HashMap;

use gc::{Finalize, Gc, Trace};

use crate::runtime::{
	action::{Action, NativeFun, RustFun},
	frame::{Binding, CallContext},
	value::Value,
	Panic,
	Runtime,
};


/// Read a spec, panicking on syntax errors.
pub fn spec(runtime: &mut Runtime, text: &str) -> Vec<Value> {
	runtime
		.read_spec(text)
		.unwrap_or_else(|error| panic!("invalid spec {:?}: {}", text, error))
}


/// The names of the public parameters of an action.
pub fn names(runtime: &Runtime, action: &Action) -> Vec<String> {
	action
		.parameters()
		.map(
			|(_, entry)| {
				let name = runtime
					.interner()
					.resolve(entry.name)
					.expect("unresolved parameter name");

				String::from_utf8_lossy(name).into_owned()
			}
		)
		.collect()
}


/// Build an unbound native.
pub fn native<T: NativeFun>(runtime: &mut Runtime, fun: T) -> Gc<Action> {
	runtime
		.make_native(RustFun::from(fun), Binding::unbound())
		.expect("failed to build native")
}


/// Build a native bound to the given words, which looks up the word it is called with.
pub fn probe(runtime: &mut Runtime, words: &[(&str, Value)]) -> Gc<Action> {
	let words: HashMap<_, _> = words
		.iter()
		.map(|(name, value)| (runtime.symbol(name), value.copy()))
		.collect();

	runtime
		.make_native(RustFun::from(Probe), Binding::new(words))
		.expect("failed to build probe")
}


/// Looks up a word in its binding.
#[derive(Default, Trace, Finalize)]
pub struct Probe;

impl NativeFun for Probe {
	fn name(&self) -> &'static str { "probe" }

	fn spec(&self) -> &'static str { "return: [any-type!] word [word!]" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args().as_slice() {
			[ Value::Word(word) ] => Ok(
				context
					.binding()
					.get(*word)
					.map(Value::copy)
					.unwrap_or_default()
			),

			args => Err(Panic::native(self.name(), format!("invalid arguments: {:?}", args))),
		}
	}
}


/// Returns a text, despite declaring an integer result.
#[derive(Default, Trace, Finalize)]
pub struct Liar;

impl NativeFun for Liar {
	fn name(&self) -> &'static str { "liar" }

	fn spec(&self) -> &'static str { "return: [integer!]" }

	fn call(&self, _context: CallContext) -> Result<Value, Panic> {
		Ok("not a number".into())
	}
}


/// Doubles an integer.
#[derive(Default, Trace, Finalize)]
pub struct Double;

impl NativeFun for Double {
	fn name(&self) -> &'static str { "double" }

	fn spec(&self) -> &'static str { "return: [integer!] x [integer!]" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args().as_slice() {
			[ Value::Integer(x) ] => Ok(Value::Integer(x * 2)),
			args => Err(Panic::native(self.name(), format!("invalid arguments: {:?}", args))),
		}
	}
}
