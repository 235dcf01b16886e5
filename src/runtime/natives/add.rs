use gc::{Finalize, Trace};

use super::{
	CallContext,
	Native,
	NativeFun,
	Panic,
	Value,
};


inventory::submit! { Native::of::<Add>() }

#[derive(Default, Trace, Finalize)]
struct Add;

impl NativeFun for Add {
	fn name(&self) -> &'static str { "add" }

	fn spec(&self) -> &'static str {
		r#""Adds two integers" return: [integer!] a [integer!] b [integer!]"#
	}

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args().as_slice() {
			[ Value::Integer(a), Value::Integer(b) ] => a
				.checked_add(*b)
				.map(Value::Integer)
				.ok_or_else(|| Panic::native(self.name(), "integer overflow")),

			args => Err(Panic::native(self.name(), format!("invalid arguments: {:?}", args))),
		}
	}
}
