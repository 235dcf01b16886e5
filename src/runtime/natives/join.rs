use gc::{Finalize, Trace};

use super::{
	CallContext,
	Native,
	NativeFun,
	Panic,
	Value,
};


inventory::submit! { Native::of::<Join>() }

#[derive(Default, Trace, Finalize)]
struct Join;

impl NativeFun for Join {
	fn name(&self) -> &'static str { "join" }

	fn spec(&self) -> &'static str {
		r#""Joins two texts" return: [text!] head [text!] tail [text!] /with [text!] "Delimiter""#
	}

	fn call(&self, context: CallContext) -> Result<Value, Panic> {
		let args = context.args();

		let (head, tail, delimiter) = match args.as_slice() {
			[ Value::Text(head), Value::Text(tail), Value::None ] => (head, tail, &[][..]),
			[ Value::Text(head), Value::Text(tail), Value::Text(with) ] => (head, tail, with.as_bytes()),
			args => return Err(
				Panic::native(self.name(), format!("invalid arguments: {:?}", args))
			),
		};

		let mut joined = Vec::with_capacity(head.len() + delimiter.len() + tail.len());
		joined.extend_from_slice(head.as_bytes());
		joined.extend_from_slice(delimiter);
		joined.extend_from_slice(tail.as_bytes());

		Ok(Value::Text(joined.into()))
	}
}
