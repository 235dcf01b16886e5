mod builder;
mod fmt;
pub mod notation;
mod scratch;
pub mod spec;
#[cfg(test)]
mod tests;

use gc::{unsafe_empty_trace, GcCell, Finalize, Trace};

use crate::symbol::Symbol;
use super::{
	frame::Rootvar,
	value::{Block, Constraint, Str, Value},
};
pub use builder::{Builder, Finished, Sealing};
pub use scratch::{Scratch, Transaction};
pub use spec::Flags;


/// The stable identity of a parameter table, used for ancestry queries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TableId(pub u32);


impl Finalize for TableId { }


unsafe impl Trace for TableId {
	unsafe_empty_trace!();
}


/// The class of an unbound parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParamClass {
	/// Required, supplied positionally.
	Normal,
	/// Optional, supplied by name.
	Refinement,
	/// The output slot. Never supplied by callers.
	Return,
}


impl Finalize for ParamClass { }


unsafe impl Trace for ParamClass {
	unsafe_empty_trace!();
}


/// What a parameter slot holds.
#[derive(Debug, PartialEq, Eq)]
#[derive(Trace, Finalize)]
pub enum Descriptor {
	/// The reserved slot 0.
	Header,
	/// A parameter callers may fill, constrained to some types.
	Unbound { class: ParamClass, types: Constraint },
	/// A parameter pre-bound to a value.
	Specialized(Value),
}


impl Descriptor {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		match self {
			Self::Header => Self::Header,
			Self::Unbound { class, types } => Self::Unbound { class: *class, types: types.clone() },
			Self::Specialized(value) => Self::Specialized(value.copy()),
		}
	}
}


/// How a parameter shows through an action's public surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Visibility {
	/// Listed, and settable unless it is the return slot.
	Public,
	/// Hidden from callers, but its value can still be inspected.
	Specialized,
	/// Hidden altogether.
	Sealed,
}


/// A parameter table entry.
#[derive(Debug, PartialEq, Eq)]
#[derive(Trace, Finalize)]
pub struct ParamEntry {
	pub name: Symbol,
	pub descriptor: Descriptor,
	/// The type block the parameter was declared with.
	pub type_notes: Option<Block>,
	pub doc_notes: Option<Str>,
	pub sealed: bool,
}


impl ParamEntry {
	/// The entry stored at slot 0.
	pub fn header() -> Self {
		Self {
			name: Symbol::default(),
			descriptor: Descriptor::Header,
			type_notes: None,
			doc_notes: None,
			sealed: true,
		}
	}


	pub fn unbound(name: Symbol, class: ParamClass, types: Constraint) -> Self {
		Self {
			name,
			descriptor: Descriptor::Unbound { class, types },
			type_notes: None,
			doc_notes: None,
			sealed: false,
		}
	}


	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self {
			name: self.name,
			descriptor: self.descriptor.copy(),
			type_notes: self.type_notes.as_ref().map(Block::copy),
			doc_notes: self.doc_notes.as_ref().map(Str::copy),
			sealed: self.sealed,
		}
	}


	pub fn is_specialized(&self) -> bool {
		matches!(self.descriptor, Descriptor::Specialized(_))
	}


	/// The class, for unbound parameters.
	pub fn class(&self) -> Option<ParamClass> {
		match self.descriptor {
			Descriptor::Unbound { class, .. } => Some(class),
			_ => None,
		}
	}


	/// The type constraint, for unbound parameters.
	pub fn types(&self) -> Option<&Constraint> {
		match &self.descriptor {
			Descriptor::Unbound { types, .. } => Some(types),
			_ => None,
		}
	}


	pub fn visibility(&self) -> Visibility {
		match self.descriptor {
			_ if self.sealed => Visibility::Sealed,
			Descriptor::Header => Visibility::Sealed,
			Descriptor::Specialized(_) => Visibility::Specialized,
			Descriptor::Unbound { .. } => Visibility::Public,
		}
	}
}


/// An immutable parameter table. Slot 0 is the header; parameters start at 1.
#[derive(Trace, Finalize)]
pub struct ParamTable {
	id: TableId,
	entries: Box<[ParamEntry]>,
	return_slot: Option<usize>,
	/// The prototype root slot for frames built from this table.
	/// When empty, frames run the action they were built for.
	archetype: GcCell<Option<Rootvar>>,
}


impl ParamTable {
	pub(in crate::runtime) fn new(id: TableId, finished: Finished) -> Self {
		debug_assert!(
			matches!(finished.entries.first(), Some(entry) if entry.descriptor == Descriptor::Header)
		);

		Self {
			id,
			entries: finished.entries.into_boxed_slice(),
			return_slot: finished.return_slot,
			archetype: GcCell::new(None),
		}
	}


	pub fn id(&self) -> TableId {
		self.id
	}


	/// The number of slots, including the header.
	pub fn len(&self) -> usize {
		self.entries.len()
	}


	/// Whether there are no parameters besides the header.
	pub fn is_empty(&self) -> bool {
		self.len() <= 1
	}


	/// All slots, including the header.
	pub fn entries(&self) -> &[ParamEntry] {
		&self.entries
	}


	pub fn get(&self, slot: usize) -> Option<&ParamEntry> {
		self.entries
			.get(slot)
			.filter(|_| slot != 0)
	}


	/// The parameters and their slots, skipping the header.
	pub fn params(&self) -> impl Iterator<Item = (usize, &ParamEntry)> {
		self.entries
			.iter()
			.enumerate()
			.skip(1)
	}


	/// Find the slot of a parameter, whatever its visibility.
	pub fn find(&self, name: Symbol) -> Option<usize> {
		self.params()
			.find(|(_, entry)| entry.name == name)
			.map(|(slot, _)| slot)
	}


	/// The physical position of the return slot.
	pub fn return_slot(&self) -> Option<usize> {
		self.return_slot
	}


	/// The return parameter, if any.
	pub fn return_param(&self) -> Option<&ParamEntry> {
		self.return_slot.and_then(|slot| self.get(slot))
	}


	pub fn archetype(&self) -> Option<Rootvar> {
		self.archetype
			.borrow()
			.as_ref()
			.map(Rootvar::copy)
	}


	/// Write the archetype. Generators do this once, before the table is shared.
	pub(in crate::runtime) fn set_archetype(&self, rootvar: Rootvar) {
		let mut archetype = self.archetype.borrow_mut();
		debug_assert!(archetype.is_none(), "archetype already set");
		*archetype = Some(rootvar);
	}
}


impl std::fmt::Debug for ParamTable {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_struct("ParamTable")
			.field("id", &self.id)
			.field("entries", &self.entries)
			.field("return_slot", &self.return_slot)
			.finish()
	}
}
