use std::fmt::Display as _;

use crate::{
	fmt::{self, Display},
	symbol::{self, Symbol},
	term::color,
};
use super::value::{Constraint, Value};


/// A failure to construct an action. These are load-time errors: retrying with the same
/// inputs cannot succeed.
#[derive(Debug)]
pub enum Error {
	/// Malformed declarative spec. `position` is the index of the offending item, or the
	/// byte offset in the notation when `found` is empty.
	SpecSyntax {
		position: usize,
		found: Option<Value>,
		reason: &'static str,
	},
	/// A name occurs twice in a parameter table.
	DuplicateParameter(Symbol),
	/// A typechecker descriptor that is neither a datatype nor a typeset.
	InvalidDescriptor(Value),
	/// Specialization of a parameter the action does not have.
	UnknownParameter(Symbol),
	/// Specialization of a parameter that is already specialized or sealed.
	HiddenParameter(Symbol),
	/// Specialization of the return parameter.
	OutputParameter(Symbol),
	/// Specialization with a value outside the parameter's constraint.
	TypeError {
		name: Symbol,
		value: Value,
		expected: Constraint,
	},
}


impl Error {
	pub fn spec_syntax(position: usize, found: Value, reason: &'static str) -> Self {
		Self::SpecSyntax { position, found: Some(found), reason }
	}


	/// Syntax error in the textual notation of a spec.
	pub fn notation(offset: usize, reason: &'static str) -> Self {
		Self::SpecSyntax { position: offset, found: None, reason }
	}


	pub fn duplicate_parameter(name: Symbol) -> Self {
		Self::DuplicateParameter(name)
	}


	pub fn invalid_descriptor(value: Value) -> Self {
		Self::InvalidDescriptor(value)
	}


	pub fn unknown_parameter(name: Symbol) -> Self {
		Self::UnknownParameter(name)
	}


	pub fn hidden_parameter(name: Symbol) -> Self {
		Self::HiddenParameter(name)
	}


	pub fn output_parameter(name: Symbol) -> Self {
		Self::OutputParameter(name)
	}


	pub fn type_error(name: Symbol, value: Value, expected: Constraint) -> Self {
		Self::TypeError { name, value, expected }
	}
}


impl<'a> Display<'a> for Error {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		write!(f, "{}: ", color::Fg(color::Red, "Error"))?;

		match self {
			Self::SpecSyntax { position, found: Some(found), reason } => write!(
				f,
				"invalid spec at item {} ({}): {}",
				position,
				fmt::Show(found, context),
				reason,
			),

			Self::SpecSyntax { position, found: None, reason } => write!(
				f,
				"invalid spec notation at offset {}: {}",
				position,
				reason,
			),

			Self::DuplicateParameter(name) => {
				"duplicate parameter '".fmt(f)?;
				name.fmt(f, context)?;
				"'".fmt(f)
			}

			Self::InvalidDescriptor(value) => write!(
				f,
				"invalid typechecker descriptor {}, expected a datatype or typeset",
				fmt::Show(value, context),
			),

			Self::UnknownParameter(name) => {
				"unknown parameter '".fmt(f)?;
				name.fmt(f, context)?;
				"'".fmt(f)
			}

			Self::HiddenParameter(name) => {
				"parameter '".fmt(f)?;
				name.fmt(f, context)?;
				"' is not accessible".fmt(f)
			}

			Self::OutputParameter(name) => {
				"output parameter '".fmt(f)?;
				name.fmt(f, context)?;
				"' cannot be specialized".fmt(f)
			}

			Self::TypeError { name, value, expected } => {
				"parameter '".fmt(f)?;
				name.fmt(f, context)?;
				write!(
					f,
					"' expects {}, got {}",
					fmt::Show(expected, context),
					fmt::Show(value, context),
				)
			}
		}
	}
}


/// We need this in order to be able to implement std::error::Error.
impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		Display::fmt(self, f, &symbol::Interner::new())
	}
}


impl std::error::Error for Error { }
