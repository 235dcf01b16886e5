use std::fmt::Display as _;

use crate::{
	fmt::{self, Display},
	symbol,
	term::color,
};
use super::{Descriptor, ParamClass, ParamEntry, ParamTable, Visibility};


impl std::fmt::Display for ParamClass {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Normal => "normal",
			Self::Refinement => "refinement",
			Self::Return => "return",
		}.fmt(f)
	}
}


/// Entries display as they would be declared: `name`, `/name` or `name:`.
impl<'a> Display<'a> for ParamEntry {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self.class() {
			Some(ParamClass::Refinement) => {
				"/".fmt(f)?;
				self.name.fmt(f, context)
			}

			Some(ParamClass::Return) => {
				self.name.fmt(f, context)?;
				":".fmt(f)
			}

			_ => self.name.fmt(f, context),
		}
	}
}


/// Tables display one parameter per line, with their constraints and notes.
impl<'a> Display<'a> for ParamTable {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		for (slot, entry) in self.params() {
			write!(f, "{:>3} ", color::Fg(color::Yellow, slot))?;
			entry.fmt(f, context)?;

			match (&entry.descriptor, entry.visibility()) {
				(_, Visibility::Sealed) => write!(f, " {}", color::Fg(color::Magenta, "(sealed)"))?,

				(Descriptor::Specialized(value), _) => {
					write!(f, " {} ", color::Fg(color::Magenta, "="))?;
					value.fmt(f, context)?;
				}

				(Descriptor::Unbound { types, .. }, _) => write!(f, " {}", fmt::Show(types, context))?,

				(Descriptor::Header, _) => (),
			}

			if let Some(notes) = &entry.doc_notes {
				write!(f, " {}", notes)?;
			}

			"\n".fmt(f)?;
		}

		Ok(())
	}
}
