use gc::{Finalize, Trace};

use super::{
	CallContext,
	Native,
	NativeFun,
	Panic,
	Value,
};


inventory::submit! { Native::of::<Length>() }

#[derive(Default, Trace, Finalize)]
struct Length;

impl NativeFun for Length {
	fn name(&self) -> &'static str { "length" }

	fn spec(&self) -> &'static str {
		r#""Counts the bytes of a text or the items of a block" return: [integer!] series [text! block!]"#
	}

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		match context.args().as_slice() {
			[ Value::Text(text) ] => Ok(Value::Integer(text.len() as i64)),
			[ Value::Block(block) ] => Ok(Value::Integer(block.len() as i64)),
			args => Err(Panic::native(self.name(), format!("invalid arguments: {:?}", args))),
		}
	}
}
