use gc::{Finalize, Trace};

use super::{
	CallContext,
	Native,
	NativeFun,
	Panic,
	Value,
};


inventory::submit! { Native::of::<Negate>() }

#[derive(Default, Trace, Finalize)]
struct Negate;

impl NativeFun for Negate {
	fn name(&self) -> &'static str { "negate" }

	fn spec(&self) -> &'static str { "return: [integer!] number [integer!]" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args().as_slice() {
			[ Value::Integer(number) ] => number
				.checked_neg()
				.map(Value::Integer)
				.ok_or_else(|| Panic::native(self.name(), "integer overflow")),

			args => Err(Panic::native(self.name(), format!("invalid arguments: {:?}", args))),
		}
	}
}
