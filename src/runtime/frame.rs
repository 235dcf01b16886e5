use std::collections::HashMap;

use gc::{Finalize, Gc, Trace};

use crate::symbol::{self, Symbol};
use super::{
	action::Action,
	paramlist::{Descriptor, ParamClass, ParamTable, Visibility},
	value::Value,
	Panic,
	Runtime,
};


/// The lexical environment a phase runs in. Natives may be bound to a set of words.
#[derive(Debug, Default)]
#[derive(Trace, Finalize)]
pub struct Binding(Option<Gc<HashMap<Symbol, Value>>>);


impl Binding {
	pub fn unbound() -> Self {
		Self(None)
	}


	pub fn new(words: HashMap<Symbol, Value>) -> Self {
		Self(Some(Gc::new(words)))
	}


	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	pub fn is_bound(&self) -> bool {
		self.0.is_some()
	}


	pub fn get(&self, word: Symbol) -> Option<&Value> {
		self.0
			.as_ref()
			.and_then(|words| words.get(&word))
	}
}


/// Bindings are the same if they share the same environment.
impl PartialEq for Binding {
	fn eq(&self, other: &Self) -> bool {
		match (&self.0, &other.0) {
			(None, None) => true,
			(Some(left), Some(right)) => std::ptr::eq(&**left, &**right),
			_ => false,
		}
	}
}


impl Eq for Binding { }


/// The root slot of a frame: which behavior is executing, and in which environment.
#[derive(Debug)]
#[derive(Trace, Finalize)]
pub struct Rootvar {
	pub phase: Gc<Action>,
	pub binding: Binding,
}


impl Rootvar {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self {
			phase: self.phase.clone(),
			binding: self.binding.copy(),
		}
	}


	/// The root slot frames of an action start with: its table's archetype, or the action
	/// itself, unbound.
	pub fn of(action: &Gc<Action>) -> Self {
		action
			.paramlist()
			.archetype()
			.unwrap_or_else(
				|| Self {
					phase: action.clone(),
					binding: Binding::unbound(),
				}
			)
	}
}


/// An invocation record, with one cell per slot of the table it was built for.
#[derive(Debug)]
pub struct Frame {
	table: Gc<ParamTable>,
	label: Option<Symbol>,
	rootvar: Rootvar,
	cells: Box<[Value]>,
}


impl Frame {
	/// Build a frame for an action. Specialized slots are prefilled, all others are none.
	pub fn new(action: &Gc<Action>) -> Self {
		let table = action.paramlist().clone();

		let cells = table
			.entries()
			.iter()
			.map(
				|entry| match &entry.descriptor {
					Descriptor::Specialized(value) => value.copy(),
					_ => Value::None,
				}
			)
			.collect();

		Self {
			label: action.label(),
			rootvar: Rootvar::of(action),
			table,
			cells,
		}
	}


	/// The table the frame was built for.
	pub fn table(&self) -> &Gc<ParamTable> {
		&self.table
	}


	/// The label of the action the frame was built for.
	pub fn label(&self) -> Option<Symbol> {
		self.label
	}


	pub fn rootvar(&self) -> &Rootvar {
		&self.rootvar
	}


	/// The phase currently executing.
	pub fn phase(&self) -> &Gc<Action> {
		&self.rootvar.phase
	}


	/// Point the root slot at another phase. Only the invoker may do this, after checking
	/// that the frame is compatible with the phase.
	pub(in crate::runtime) fn redirect(&mut self, rootvar: Rootvar) {
		self.rootvar = rootvar;
	}


	/// The cell at a slot. Slot 0 is the root slot, whose cell is always none, and so are
	/// slots past the end.
	pub fn arg(&self, slot: usize) -> &Value {
		self.cells
			.get(slot)
			.unwrap_or(&self.cells[0])
	}


	/// Get an argument through the public surface.
	pub fn get(&self, name: Symbol) -> Result<&Value, Panic> {
		let slot = self.public_slot(name)?;
		Ok(&self.cells[slot])
	}


	/// Set an argument through the public surface. The value is checked against the
	/// parameter's constraint, except that refinements may always be reset to none.
	pub fn set(&mut self, name: Symbol, value: Value) -> Result<(), Panic> {
		let slot = self.public_slot(name)?;
		let entry = &self.table.entries()[slot];

		match entry.descriptor {
			Descriptor::Unbound { class: ParamClass::Return, .. } => Err(Panic::output_parameter(name)),

			Descriptor::Unbound { class: ParamClass::Refinement, .. } if value.is_none() => {
				self.cells[slot] = value;
				Ok(())
			}

			Descriptor::Unbound { ref types, .. } if !types.accepts(&value) => Err(
				Panic::type_error(name, value, types.clone())
			),

			_ => {
				self.cells[slot] = value;
				Ok(())
			}
		}
	}


	/// The slot of a parameter that is visible to callers.
	fn public_slot(&self, name: Symbol) -> Result<usize, Panic> {
		let slot = self.table
			.find(name)
			.ok_or_else(|| Panic::unknown_argument(name))?;

		match self.table.entries()[slot].visibility() {
			Visibility::Public => Ok(slot),
			Visibility::Specialized | Visibility::Sealed => Err(Panic::hidden_parameter(name)),
		}
	}
}


/// Context for a native call.
#[derive(Debug)]
pub struct CallContext<'a> {
	/// The runtime instance.
	pub runtime: &'a Runtime,
	/// The frame being run. Its phase is the native.
	pub frame: &'a Frame,
}


impl<'a> CallContext<'a> {
	/// The arguments the executing phase declares, in slot order, without the return slot.
	/// Slots appended by derived actions are not included.
	pub fn args(&self) -> Vec<&'a Value> {
		let frame = self.frame;
		let phase = frame.phase().paramlist();

		(1 .. phase.len())
			.filter(|slot| Some(*slot) != phase.return_slot())
			.map(|slot| frame.arg(slot))
			.collect()
	}


	/// Get an argument of the executing phase by name, whatever its visibility.
	pub fn arg(&self, name: Symbol) -> Option<&'a Value> {
		let frame = self.frame;

		frame.phase()
			.paramlist()
			.find(name)
			.map(|slot| frame.arg(slot))
	}


	pub fn binding(&self) -> &'a Binding {
		&self.frame.rootvar.binding
	}


	/// Get the symbol interner.
	pub fn interner(&self) -> &'a symbol::Interner {
		self.runtime.interner()
	}
}
