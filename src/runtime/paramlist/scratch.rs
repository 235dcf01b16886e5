use std::ops::{Deref, DerefMut};

use super::ParamEntry;


/// The scratch area where parameter entries accumulate while a table is being built.
/// Regions of it are only ever held through a `Transaction`.
#[derive(Debug, Default)]
pub struct Scratch {
	entries: Vec<ParamEntry>,
}


impl Scratch {
	/// The number of entries currently pushed, by all open transactions.
	pub fn depth(&self) -> usize {
		self.entries.len()
	}


	/// Open a transaction at the current depth.
	pub fn begin(&mut self) -> Transaction {
		let base = self.entries.len();
		log::trace!("scratch transaction opened at depth {}", base);

		Transaction { scratch: self, base }
	}
}


/// A scoped region of the scratch area, starting at a base mark.
/// The region is released when the transaction is dropped, whatever the exit path. Indices
/// are relative to the base mark.
#[derive(Debug)]
pub struct Transaction<'s> {
	scratch: &'s mut Scratch,
	base: usize,
}


impl<'s> Transaction<'s> {
	pub fn push(&mut self, entry: ParamEntry) {
		self.scratch.entries.push(entry);
	}


	/// Insert an entry at a relative index, shifting the following ones.
	pub fn insert(&mut self, index: usize, entry: ParamEntry) {
		self.scratch.entries.insert(self.base + index, entry);
	}


	/// Open a nested transaction on top of this one.
	pub fn begin(&mut self) -> Transaction {
		self.scratch.begin()
	}


	/// Pop the whole region, releasing it.
	pub fn pop(self) -> Vec<ParamEntry> {
		log::trace!(
			"scratch transaction at depth {} popped {} entries",
			self.base,
			self.scratch.entries.len() - self.base,
		);

		self.scratch.entries.split_off(self.base)
	}
}


impl<'s> Deref for Transaction<'s> {
	type Target = [ParamEntry];

	fn deref(&self) -> &[ParamEntry] {
		&self.scratch.entries[self.base..]
	}
}


impl<'s> DerefMut for Transaction<'s> {
	fn deref_mut(&mut self) -> &mut [ParamEntry] {
		&mut self.scratch.entries[self.base..]
	}
}


impl<'s> Drop for Transaction<'s> {
	fn drop(&mut self) {
		if self.scratch.entries.len() > self.base {
			log::trace!(
				"scratch transaction at depth {} unwound {} entries",
				self.base,
				self.scratch.entries.len() - self.base,
			);

			self.scratch.entries.truncate(self.base);
		}
	}
}
