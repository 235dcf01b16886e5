use std::fmt::Display as _;

use crate::{
	fmt::{self, Display},
	symbol::{self, Symbol},
	term::color,
};
use super::value::{Constraint, Value};


/// A failure while fulfilling or running a frame.
#[derive(Debug)]
pub enum Panic {
	/// The action has no parameter with this name.
	UnknownArgument(Symbol),
	/// The parameter exists, but it is specialized or sealed.
	HiddenParameter(Symbol),
	/// The return parameter cannot be supplied by callers.
	OutputParameter(Symbol),
	/// A required parameter was left empty.
	MissingArgument(Symbol),
	TooManyArguments {
		expected: usize,
		got: usize,
	},
	/// An argument outside the parameter's constraint.
	TypeError {
		name: Symbol,
		value: Value,
		expected: Constraint,
	},
	/// A result outside the return constraint of the executing phase.
	ReturnTypeError {
		value: Value,
		expected: Constraint,
	},
	/// A frame ran through an action it is not derived from, nor an ancestor of.
	IncompatibleFrame {
		label: Option<Symbol>,
	},
	/// A failure reported by a native.
	Native {
		name: &'static str,
		description: String,
	},
}


impl Panic {
	pub fn unknown_argument(name: Symbol) -> Self {
		Self::UnknownArgument(name)
	}


	pub fn hidden_parameter(name: Symbol) -> Self {
		Self::HiddenParameter(name)
	}


	pub fn output_parameter(name: Symbol) -> Self {
		Self::OutputParameter(name)
	}


	pub fn missing_argument(name: Symbol) -> Self {
		Self::MissingArgument(name)
	}


	pub fn too_many_arguments(expected: usize, got: usize) -> Self {
		Self::TooManyArguments { expected, got }
	}


	pub fn type_error(name: Symbol, value: Value, expected: Constraint) -> Self {
		Self::TypeError { name, value, expected }
	}


	pub fn return_type_error(value: Value, expected: Constraint) -> Self {
		Self::ReturnTypeError { value, expected }
	}


	pub fn incompatible_frame(label: Option<Symbol>) -> Self {
		Self::IncompatibleFrame { label }
	}


	pub fn native<D: Into<String>>(name: &'static str, description: D) -> Self {
		Self::Native { name, description: description.into() }
	}
}


impl<'a> Display<'a> for Panic {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		write!(f, "{}: ", color::Fg(color::Red, "Panic"))?;

		match self {
			Self::UnknownArgument(name) => {
				"unknown argument '".fmt(f)?;
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
				"' cannot be supplied".fmt(f)
			}

			Self::MissingArgument(name) => {
				"missing argument '".fmt(f)?;
				name.fmt(f, context)?;
				"'".fmt(f)
			}

			Self::TooManyArguments { expected, got } => write!(
				f,
				"too many arguments: expected at most {}, got {}",
				color::Fg(color::Yellow, expected),
				color::Fg(color::Yellow, got),
			),

			Self::TypeError { name, value, expected } => {
				"argument '".fmt(f)?;
				name.fmt(f, context)?;
				write!(f, "' expects {}, got {}", fmt::Show(expected, context), fmt::Show(value, context))
			}

			Self::ReturnTypeError { value, expected } => write!(
				f,
				"result {} is not in {}",
				fmt::Show(value, context),
				fmt::Show(expected, context),
			),

			Self::IncompatibleFrame { label: Some(label) } => {
				"frame is incompatible with '".fmt(f)?;
				label.fmt(f, context)?;
				"'".fmt(f)
			}

			Self::IncompatibleFrame { label: None } => "frame is incompatible with the action".fmt(f),

			Self::Native { name, description } => write!(
				f,
				"{}: {}",
				color::Fg(color::Green, name),
				description,
			),
		}
	}
}


/// We need this in order to be able to implement std::error::Error.
impl std::fmt::Display for Panic {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		Display::fmt(self, f, &symbol::Interner::new())
	}
}


impl std::error::Error for Panic { }
