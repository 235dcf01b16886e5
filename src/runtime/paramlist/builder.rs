use std::collections::HashSet;

use crate::{
	runtime::{
		error::Error,
		value::{Str, Value},
	},
	symbol::{Keys, Symbol},
};
use super::{
	spec::{self, Flags},
	Descriptor,
	ParamClass,
	ParamEntry,
	ParamTable,
	Scratch,
	Transaction,
};


/// What to do with specialized entries when copying a table forward.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Sealing {
	/// Copy entries as they are.
	Preserve,
	/// Seal specialized entries, so that the new table does not expose them.
	SealSpecialized,
}


/// A finished sequence of entries, ready to become a parameter table.
#[derive(Debug)]
pub struct Finished {
	pub entries: Vec<ParamEntry>,
	pub return_slot: Option<usize>,
	pub description: Option<Str>,
}


/// Builds the entries of a new parameter table on top of the scratch area.
/// Dropping the builder, on success or failure, releases its scratch region.
#[derive(Debug)]
pub struct Builder<'s> {
	transaction: Transaction<'s>,
	keys: Keys,
	return_slot: Option<usize>,
	description: Option<Str>,
}


impl<'s> Builder<'s> {
	/// Open a transaction and push the header.
	pub fn new(scratch: &'s mut Scratch, keys: Keys) -> Self {
		let mut transaction = scratch.begin();
		transaction.push(ParamEntry::header());

		Self {
			transaction,
			keys,
			return_slot: None,
			description: None,
		}
	}


	/// Push a copy of every parameter of a table, in order.
	pub fn copy_from(&mut self, table: &ParamTable, sealing: Sealing) {
		for (_, entry) in table.params() {
			let mut copy = entry.copy();

			if sealing == Sealing::SealSpecialized && copy.is_specialized() {
				copy.sealed = true;
			}

			self.transaction.push(copy);
		}

		if let Some(slot) = table.return_slot() {
			self.return_slot = Some(slot);
		}
	}


	/// Append the parameters declared by a spec.
	/// A leading text in the spec replaces the description.
	pub fn declare(&mut self, spec: &[Value], flags: Flags) -> Result<(), Error> {
		let declarations = spec::parse_declarations(
			&mut self.transaction,
			spec,
			flags,
			self.keys,
			&mut self.return_slot,
		)?;

		if declarations.description.is_some() {
			self.description = declarations.description;
		}

		Ok(())
	}


	/// Set the description, unless the spec declared one.
	pub fn inherit_description(&mut self, description: Option<&Str>) {
		if self.description.is_none() {
			self.description = description.map(Str::copy);
		}
	}


	/// Pre-bind a visible parameter to a value.
	pub fn specialize(&mut self, name: Symbol, value: Value) -> Result<(), Error> {
		let entry = self.transaction
			.iter_mut()
			.skip(1)
			.find(|entry| entry.name == name)
			.ok_or_else(|| Error::unknown_parameter(name))?;

		if entry.sealed {
			return Err(Error::hidden_parameter(name));
		}

		match entry.descriptor {
			Descriptor::Unbound { class: ParamClass::Return, .. } => Err(Error::output_parameter(name)),

			Descriptor::Unbound { ref types, .. } if !types.accepts(&value) => Err(
				Error::type_error(name, value, types.clone())
			),

			Descriptor::Unbound { .. } => {
				entry.descriptor = Descriptor::Specialized(value);
				Ok(())
			}

			Descriptor::Specialized(_) | Descriptor::Header => Err(Error::hidden_parameter(name)),
		}
	}


	/// Pop the entries, checking that every name is unique across the whole table.
	pub fn finish(self) -> Result<Finished, Error> {
		let mut names = HashSet::new();

		for entry in self.transaction.iter().skip(1) {
			if !names.insert(entry.name) {
				return Err(Error::duplicate_parameter(entry.name));
			}
		}

		let return_slot = self.return_slot;
		let description = self.description;

		Ok(
			Finished {
				entries: self.transaction.pop(),
				return_slot,
				description,
			}
		)
	}
}

