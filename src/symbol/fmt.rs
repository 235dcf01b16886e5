use std::fmt::Display as _;

use bstr::ByteSlice;

use super::{Interner, Symbol};
use crate::{
	fmt::Display,
	term::color,
};


/// How an invalid or unresolved symbol is displayed.
pub const ILL_FORMED: &str = "<invalid symbol>";


impl<'a> Display<'a> for Symbol {
	type Context = &'a Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		match context.resolve(*self) {
			Some(name) if *self != Self::default() => color::Fg(color::Green, name.as_bstr()).fmt(f),
			_ => ILL_FORMED.fmt(f),
		}
	}
}
