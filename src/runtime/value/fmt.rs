use std::fmt::Display as _;

use bstr::ByteSlice;

use crate::{
	fmt::{self, Display},
	symbol,
	term::color,
};
use super::{Block, Constraint, Custom, Str, Type, Typeset, Value};


impl<'a> Display<'a> for Type {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Builtin(kind) => color::Fg(color::Cyan, kind.name()).fmt(f),
			Self::Custom(extension) => extension.name.fmt(f, context),
		}
	}
}


impl std::fmt::Display for Typeset {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		"[".fmt(f)?;

		fmt::sep_by(
			self.kinds(),
			f,
			|kind, f| color::Fg(color::Cyan, kind.name()).fmt(f),
			" ",
		)?;

		"]".fmt(f)
	}
}


/// Constraints display as a type block: the tags first, then the open categories.
impl<'a> Display<'a> for Constraint {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		"[".fmt(f)?;

		let kinds = self.kinds()
			.kinds()
			.map(Type::Builtin);
		let extensions = self.extensions()
			.iter()
			.copied()
			.map(Type::Custom);

		fmt::sep_by(
			kinds.chain(extensions),
			f,
			|datatype, f| datatype.fmt(f, context),
			" ",
		)?;

		"]".fmt(f)
	}
}


impl std::fmt::Display for Str {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "\"{}\"", self.as_bytes().as_bstr())
	}
}


impl<'a> Display<'a> for Block {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		"[".fmt(f)?;
		fmt::sep_by(self.iter(), f, |value, f| value.fmt(f, context), " ")?;
		"]".fmt(f)
	}
}


impl<'a> Display<'a> for Custom {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		"#[".fmt(f)?;
		self.extension.name.fmt(f, context)?;
		" ".fmt(f)?;
		Display::fmt(&*self.payload, f, context)?;
		"]".fmt(f)
	}
}


impl<'a> Display<'a> for Value {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::None => color::Fg(color::Blue, "none").fmt(f),
			Self::Logic(logic) => color::Fg(color::Blue, logic).fmt(f),
			Self::Integer(int) => color::Fg(color::Yellow, int).fmt(f),
			Self::Text(text) => color::Fg(color::Yellow, text).fmt(f),
			Self::Block(block) => block.fmt(f, context),
			Self::Word(symbol) => symbol.fmt(f, context),

			Self::SetWord(symbol) => {
				symbol.fmt(f, context)?;
				":".fmt(f)
			}

			Self::Refinement(symbol) => {
				"/".fmt(f)?;
				symbol.fmt(f, context)
			}

			Self::Datatype(datatype) => datatype.fmt(f, context),
			Self::Typeset(typeset) => typeset.fmt(f),
			Self::Action(action) => action.fmt(f, context),
			Self::Custom(custom) => custom.fmt(f, context),
		}
	}
}
