mod fmt;
mod types;

use std::ops::Deref;

use gc::{Gc, Finalize, Trace};

use crate::symbol::Symbol;
use super::action::Action;
pub use types::{Constraint, Extension, ExtensionId, Kind, Registry, Type, Typeset};


/// A runtime value.
/// Spec blocks, arguments and typechecker descriptors are all values.
#[derive(Debug, PartialEq, Eq)]
#[derive(Trace, Finalize)]
pub enum Value {
	None,
	Logic(bool),
	Integer(i64),
	Text(Str),
	Block(Block),
	Word(Symbol),
	SetWord(Symbol),
	Refinement(Symbol),
	Datatype(Type),
	Typeset(Typeset),
	Action(Gc<Action>),
	Custom(Custom),
}


impl Value {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		match self {
			Self::None => Self::None,
			Self::Logic(logic) => Self::Logic(*logic),
			Self::Integer(int) => Self::Integer(*int),
			Self::Text(text) => Self::Text(text.copy()),
			Self::Block(block) => Self::Block(block.copy()),
			Self::Word(symbol) => Self::Word(*symbol),
			Self::SetWord(symbol) => Self::SetWord(*symbol),
			Self::Refinement(symbol) => Self::Refinement(*symbol),
			Self::Datatype(datatype) => Self::Datatype(*datatype),
			Self::Typeset(typeset) => Self::Typeset(*typeset),
			Self::Action(action) => Self::Action(action.clone()),
			Self::Custom(custom) => Self::Custom(custom.copy()),
		}
	}


	/// The coarse type tag.
	pub fn kind(&self) -> Kind {
		match self {
			Self::None => Kind::None,
			Self::Logic(_) => Kind::Logic,
			Self::Integer(_) => Kind::Integer,
			Self::Text(_) => Kind::Text,
			Self::Block(_) => Kind::Block,
			Self::Word(_) => Kind::Word,
			Self::SetWord(_) => Kind::SetWord,
			Self::Refinement(_) => Kind::Refinement,
			Self::Datatype(_) => Kind::Datatype,
			Self::Typeset(_) => Kind::Typeset,
			Self::Action(_) => Kind::Action,
			Self::Custom(_) => Kind::Custom,
		}
	}


	/// The precise datatype. Custom values report their extension.
	pub fn datatype(&self) -> Type {
		match self {
			Self::Custom(custom) => Type::Custom(custom.extension),
			other => Type::Builtin(other.kind()),
		}
	}


	/// Whether the value is of the given datatype.
	/// Open categories compare by extension identity, everything else by tag.
	pub fn is_type(&self, datatype: Type) -> bool {
		match datatype {
			Type::Custom(extension) => matches!(
				self,
				Self::Custom(custom) if custom.extension.id == extension.id
			),

			Type::Builtin(kind) => self.kind() == kind,
		}
	}


	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}
}


impl Default for Value {
	fn default() -> Self {
		Self::None
	}
}


impl From<bool> for Value {
	fn from(logic: bool) -> Self {
		Self::Logic(logic)
	}
}


impl From<i64> for Value {
	fn from(int: i64) -> Self {
		Self::Integer(int)
	}
}


impl<'a> From<&'a str> for Value {
	fn from(string: &'a str) -> Self {
		Self::Text(string.into())
	}
}


impl From<Str> for Value {
	fn from(text: Str) -> Self {
		Self::Text(text)
	}
}


impl From<Block> for Value {
	fn from(block: Block) -> Self {
		Self::Block(block)
	}
}


impl From<Type> for Value {
	fn from(datatype: Type) -> Self {
		Self::Datatype(datatype)
	}
}


impl From<Typeset> for Value {
	fn from(typeset: Typeset) -> Self {
		Self::Typeset(typeset)
	}
}


impl From<Gc<Action>> for Value {
	fn from(action: Gc<Action>) -> Self {
		Self::Action(action)
	}
}


impl From<Custom> for Value {
	fn from(custom: Custom) -> Self {
		Self::Custom(custom)
	}
}


/// Texts are immutable.
#[derive(Debug, PartialEq, Eq)]
#[derive(Trace, Finalize)]
pub struct Str(Gc<Box<[u8]>>);


impl Str {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	/// Get the underlying slice.
	pub fn as_bytes(&self) -> &[u8] {
		self.as_ref()
	}


	pub fn len(&self) -> usize {
		self.0.len()
	}


	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}


impl AsRef<[u8]> for Str {
	fn as_ref(&self) -> &[u8] {
		self.0.deref().deref()
	}
}


impl<'a> From<&'a [u8]> for Str {
	fn from(string: &'a [u8]) -> Self {
		Self(Gc::new(string.into()))
	}
}


impl From<Vec<u8>> for Str {
	fn from(vec: Vec<u8>) -> Self {
		Self(Gc::new(vec.into_boxed_slice()))
	}
}


impl<'a> From<&'a str> for Str {
	fn from(string: &'a str) -> Self {
		string.as_bytes().into()
	}
}


impl From<String> for Str {
	fn from(string: String) -> Self {
		string.into_bytes().into()
	}
}


/// Blocks are immutable sequences of values. Specs are blocks.
#[derive(Debug, PartialEq, Eq)]
#[derive(Trace, Finalize)]
pub struct Block(Gc<Box<[Value]>>);


impl Block {
	pub fn new(values: Vec<Value>) -> Self {
		Self(Gc::new(values.into_boxed_slice()))
	}


	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	pub fn len(&self) -> usize {
		self.0.len()
	}


	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}


impl Deref for Block {
	type Target = [Value];

	fn deref(&self) -> &[Value] {
		self.0.deref().deref()
	}
}


/// An instance of a registered open type category.
#[derive(Debug, PartialEq, Eq)]
#[derive(Trace, Finalize)]
pub struct Custom {
	pub extension: Extension,
	pub payload: Gc<Value>,
}


impl Custom {
	pub fn new(extension: Extension, payload: Value) -> Self {
		Self {
			extension,
			payload: Gc::new(payload),
		}
	}


	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self {
			extension: self.extension,
			payload: self.payload.clone(),
		}
	}
}
