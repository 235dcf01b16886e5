use gc::{Finalize, Trace};

use super::{
	CallContext,
	Native,
	NativeFun,
	Panic,
	Value,
};


inventory::submit! { Native::of::<TypeOf>() }

#[derive(Default, Trace, Finalize)]
struct TypeOf;

impl NativeFun for TypeOf {
	fn name(&self) -> &'static str { "type-of" }

	fn spec(&self) -> &'static str { "return: [datatype!] value [any-type!]" }

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args().as_slice() {
			[ value ] => Ok(Value::Datatype(value.datatype())),
			args => Err(Panic::native(self.name(), format!("invalid arguments: {:?}", args))),
		}
	}
}
