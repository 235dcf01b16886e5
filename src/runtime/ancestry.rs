use std::collections::HashMap;

use super::paramlist::TableId;


/// The maximum number of derivation steps walked when checking compatibility. Running a
/// frame through an action further apart than this fails, but calls never walk the chain.
pub const MAX_DEPTH: usize = 64;


/// The derivation links between parameter tables.
#[derive(Debug, Default)]
pub struct Ancestry {
	next_id: u32,
	links: HashMap<TableId, TableId>,
}


impl Ancestry {
	/// Allocate a fresh table id.
	pub fn allocate(&mut self) -> TableId {
		let id = TableId(self.next_id);
		self.next_id += 1;
		id
	}


	/// Record that `derived` was built from `source`.
	pub fn link(&mut self, derived: TableId, source: TableId) {
		debug_assert_ne!(derived, source);

		let previous = self.links.insert(derived, source);
		debug_assert!(previous.is_none(), "table linked twice");
	}


	/// The table a table was derived from, if any.
	pub fn source(&self, table: TableId) -> Option<TableId> {
		self.links.get(&table).copied()
	}


	/// The chain of tables `table` derives from, nearest first, excluding itself.
	pub fn ancestors(&self, table: TableId) -> impl Iterator<Item = TableId> + '_ {
		std::iter::successors(self.source(table), move |&id| self.source(id))
			.take(MAX_DEPTH)
	}


	/// Whether `ancestor` is `table` or reachable from it through derivation links.
	pub fn derives_from(&self, table: TableId, ancestor: TableId) -> bool {
		table == ancestor || self.ancestors(table).any(|id| id == ancestor)
	}


	/// Whether a frame built for one table can run through an action with the other.
	pub fn compatible(&self, frame: TableId, action: TableId) -> bool {
		self.derives_from(frame, action) || self.derives_from(action, frame)
	}
}
