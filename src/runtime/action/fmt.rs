use std::fmt::Display as _;

use crate::{
	fmt::{self, Display},
	symbol,
	term::color,
};
use super::{Action, AdapterKind, Dispatcher};


impl std::fmt::Display for Dispatcher {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Native => "native",
			Self::Adapter => "adapter",
			Self::DatatypeChecker => "datatype checker",
			Self::TypesetChecker => "typeset checker",
		}.fmt(f)
	}
}


impl std::fmt::Display for AdapterKind {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Specialized => "specialized",
			Self::Augmented => "augmented",
		}.fmt(f)
	}
}


/// Actions display as their label and public interface, e.g. `#[action! add [a b]]`.
impl<'a> Display<'a> for Action {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		write!(f, "#[{} ", color::Fg(color::Cyan, "action!"))?;

		if let Some(label) = self.label {
			label.fmt(f, context)?;
			" ".fmt(f)?;
		}

		"[".fmt(f)?;

		fmt::sep_by(
			self.parameters(),
			f,
			|(_, entry), f| entry.fmt(f, context),
			" ",
		)?;

		"]]".fmt(f)
	}
}
