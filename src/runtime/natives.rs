automod::dir!("src/runtime/natives");

use super::{
	action::{Native, NativeFun},
	frame::CallContext,
	value::Value,
	Panic,
};
