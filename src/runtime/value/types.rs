use std::collections::HashMap;

use gc::{unsafe_empty_trace, Finalize, Trace};

use crate::symbol::{self, Symbol};
use super::Value;


/// The coarse runtime type tag of a value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
	None,
	Logic,
	Integer,
	Text,
	Block,
	Word,
	SetWord,
	Refinement,
	Datatype,
	Typeset,
	Action,
	/// Values of open type categories. The precise category is an `Extension`.
	Custom,
}


impl Finalize for Kind { }


/// Type tags hold no garbage collected references.
unsafe impl Trace for Kind {
	unsafe_empty_trace!();
}


impl Kind {
	pub const ALL: [Kind; 12] = [
		Kind::None,
		Kind::Logic,
		Kind::Integer,
		Kind::Text,
		Kind::Block,
		Kind::Word,
		Kind::SetWord,
		Kind::Refinement,
		Kind::Datatype,
		Kind::Typeset,
		Kind::Action,
		Kind::Custom,
	];


	/// The datatype name, as written in specs.
	pub fn name(self) -> &'static str {
		match self {
			Kind::None => "none!",
			Kind::Logic => "logic!",
			Kind::Integer => "integer!",
			Kind::Text => "text!",
			Kind::Block => "block!",
			Kind::Word => "word!",
			Kind::SetWord => "set-word!",
			Kind::Refinement => "refinement!",
			Kind::Datatype => "datatype!",
			Kind::Typeset => "typeset!",
			Kind::Action => "action!",
			Kind::Custom => "custom!",
		}
	}


	fn bit(self) -> u32 {
		1 << (self as u32)
	}
}


/// The identity of a registered open type category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionId(u32);


impl Finalize for ExtensionId { }


unsafe impl Trace for ExtensionId {
	unsafe_empty_trace!();
}


/// A registered open type category. All of its values share the `Kind::Custom` tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
	pub id: ExtensionId,
	pub name: Symbol,
}


impl Finalize for Extension { }


unsafe impl Trace for Extension {
	unsafe_empty_trace!();
}


/// A datatype descriptor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Type {
	Builtin(Kind),
	Custom(Extension),
}


impl Finalize for Type { }


unsafe impl Trace for Type {
	unsafe_empty_trace!();
}


impl Type {
	/// The coarse tag shared by all values of this type.
	pub fn kind(self) -> Kind {
		match self {
			Type::Builtin(kind) => kind,
			Type::Custom(_) => Kind::Custom,
		}
	}
}


impl From<Kind> for Type {
	fn from(kind: Kind) -> Self {
		Self::Builtin(kind)
	}
}


/// A set of coarse type tags.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Typeset(u32);


impl Finalize for Typeset { }


unsafe impl Trace for Typeset {
	unsafe_empty_trace!();
}


impl Typeset {
	pub const EMPTY: Typeset = Typeset(0);


	/// Every kind, including none.
	pub fn any_type() -> Self {
		Kind::ALL
			.iter()
			.fold(Self::EMPTY, |set, kind| set.with(*kind))
	}


	/// Every kind but none.
	pub fn any_value() -> Self {
		Self(Self::any_type().0 & !Kind::None.bit())
	}


	pub fn any_word() -> Self {
		Self::EMPTY
			.with(Kind::Word)
			.with(Kind::SetWord)
			.with(Kind::Refinement)
	}


	pub fn with(self, kind: Kind) -> Self {
		Self(self.0 | kind.bit())
	}


	pub fn union(self, other: Typeset) -> Self {
		Self(self.0 | other.0)
	}


	pub fn contains(self, kind: Kind) -> bool {
		self.0 & kind.bit() != 0
	}


	pub fn is_empty(self) -> bool {
		self.0 == 0
	}


	/// The kinds in the set, in declaration order.
	pub fn kinds(self) -> impl Iterator<Item = Kind> {
		Kind::ALL
			.iter()
			.copied()
			.filter(move |kind| self.contains(*kind))
	}
}


impl From<Kind> for Typeset {
	fn from(kind: Kind) -> Self {
		Self::EMPTY.with(kind)
	}
}


/// The constraint of a parameter: a set of coarse tags, plus open type categories, which
/// only admit values of their own category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(Finalize)]
pub struct Constraint {
	kinds: Typeset,
	extensions: Vec<Extension>,
}


unsafe impl Trace for Constraint {
	unsafe_empty_trace!();
}


impl Constraint {
	/// The admitted tags. Values of `custom!` are only admitted by tag if the whole
	/// `custom!` datatype is in the set.
	pub fn kinds(&self) -> Typeset {
		self.kinds
	}


	/// The admitted open type categories.
	pub fn extensions(&self) -> &[Extension] {
		&self.extensions
	}


	pub fn with_type(mut self, datatype: Type) -> Self {
		match datatype {
			Type::Builtin(kind) => self.kinds = self.kinds.with(kind),
			Type::Custom(extension) => {
				if !self.extensions.iter().any(|other| other.id == extension.id) {
					self.extensions.push(extension);
				}
			}
		}

		self
	}


	pub fn with_typeset(mut self, typeset: Typeset) -> Self {
		self.kinds = self.kinds.union(typeset);
		self
	}


	/// Whether values with the given tag are admitted regardless of their category.
	pub fn contains(&self, kind: Kind) -> bool {
		self.kinds.contains(kind)
	}


	pub fn accepts(&self, value: &Value) -> bool {
		self.kinds.contains(value.kind())
			|| self.extensions
				.iter()
				.any(|extension| value.is_type(Type::Custom(*extension)))
	}
}


impl From<Kind> for Constraint {
	fn from(kind: Kind) -> Self {
		Typeset::from(kind).into()
	}
}


impl From<Typeset> for Constraint {
	fn from(kinds: Typeset) -> Self {
		Self { kinds, extensions: Vec::new() }
	}
}


impl From<Type> for Constraint {
	fn from(datatype: Type) -> Self {
		Self::default().with_type(datatype)
	}
}


/// Named typesets, as written in specs.
const TYPESETS: [&str; 3] = ["any-value!", "any-type!", "any-word!"];


/// The registry of datatype names, including open type categories.
#[derive(Debug, Default)]
pub struct Registry {
	extensions: Vec<Extension>,
	by_name: HashMap<Symbol, ExtensionId>,
}


impl Registry {
	/// Register an open type category. Registering the same name twice yields the same
	/// category.
	pub fn register(&mut self, name: Symbol) -> Extension {
		if let Some(id) = self.by_name.get(&name) {
			return self.extensions[id.0 as usize];
		}

		let extension = Extension {
			id: ExtensionId(self.extensions.len() as u32),
			name,
		};

		self.extensions.push(extension);
		self.by_name.insert(name, extension.id);

		extension
	}


	/// Resolve a datatype or typeset name into its value.
	pub fn lookup(&self, name: &[u8], interner: &symbol::Interner) -> Option<Value> {
		if let Some(kind) = Kind::ALL.iter().find(|kind| kind.name().as_bytes() == name) {
			return Some(Value::Datatype((*kind).into()));
		}

		match TYPESETS.iter().position(|typeset| typeset.as_bytes() == name) {
			Some(0) => return Some(Value::Typeset(Typeset::any_value())),
			Some(1) => return Some(Value::Typeset(Typeset::any_type())),
			Some(_) => return Some(Value::Typeset(Typeset::any_word())),
			None => (),
		}

		let symbol = interner.get(name)?;
		let id = self.by_name.get(&symbol)?;

		Some(Value::Datatype(Type::Custom(self.extensions[id.0 as usize])))
	}
}
