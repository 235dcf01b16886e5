pub mod action;
pub mod ancestry;
mod error;
pub mod frame;
mod generator;
mod natives;
mod panic;
pub mod paramlist;
#[cfg(test)]
mod tests;
pub mod value;

use gc::Gc;

use crate::symbol::{self, Symbol};
use action::{Action, Details, Native};
use ancestry::Ancestry;
use frame::{Binding, CallContext, Frame};
use paramlist::{notation, Descriptor, ParamClass, ParamEntry, ParamTable, Scratch};
use value::{Registry, Type, Value};
pub use error::Error;
pub use frame::Rootvar;
pub use panic::Panic;


/// The context of all action derivation and invocation.
#[derive(Debug)]
pub struct Runtime {
	interner: symbol::Interner,
	scratch: Scratch,
	ancestry: Ancestry,
	types: Registry,
	/// The native library, sorted by name.
	natives: Vec<Gc<Action>>,
	/// The table shared by all typecheckers.
	checker_table: Gc<ParamTable>,
	/// The slot of the checked value in typechecker frames.
	checked_slot: usize,
}


impl Runtime {
	/// Create a runtime, instantiating the native library.
	pub fn new() -> Result<Self, Error> {
		let mut interner = symbol::Interner::new();
		let mut scratch = Scratch::default();
		let mut ancestry = Ancestry::default();
		let types = Registry::default();

		let checker_table = generator::typechecker_prototype(
			&mut interner,
			&mut scratch,
			&mut ancestry,
			&types,
		)?;

		let checked_slot = checker_table
			.find(interner.keys().value)
			.expect("the typechecker prototype declares a value parameter");

		let mut runtime = Self {
			interner,
			scratch,
			ancestry,
			types,
			natives: Vec::new(),
			checker_table: Gc::new(checker_table),
			checked_slot,
		};

		for native in inventory::iter::<Native> {
			let action = runtime.make_native(native.instantiate(), Binding::unbound())?;
			runtime.natives.push(action);
		}

		let interner = &runtime.interner;
		runtime.natives.sort_by_key(
			|action| action
				.label()
				.and_then(|label| interner.resolve(label))
				.map(<[u8]>::to_owned)
		);

		log::debug!("runtime created with {} natives", runtime.natives.len());

		Ok(runtime)
	}


	/// Get the symbol interner.
	pub fn interner(&self) -> &symbol::Interner {
		&self.interner
	}


	/// Get a symbol, interning the name if needed.
	pub fn symbol<T: AsRef<[u8]>>(&mut self, name: T) -> Symbol {
		self.interner.get_or_intern(name)
	}


	pub fn ancestry(&self) -> &Ancestry {
		&self.ancestry
	}


	/// The number of scratch entries in use. Zero whenever no generator is running.
	pub fn scratch_depth(&self) -> usize {
		self.scratch.depth()
	}


	/// The native library, sorted by name.
	pub fn natives(&self) -> &[Gc<Action>] {
		&self.natives
	}


	/// Find a native by name.
	pub fn native(&self, name: &str) -> Option<Gc<Action>> {
		let label = self.interner.get(name)?;

		self.natives
			.iter()
			.find(|action| action.label() == Some(label))
			.cloned()
	}


	/// Register an open type category. Its datatype becomes available to specs as `name`,
	/// which should end with `!`.
	pub fn register_extension(&mut self, name: &str) -> Type {
		let symbol = self.interner.get_or_intern(name);
		Type::Custom(self.types.register(symbol))
	}


	/// Read a spec or argument list in textual notation.
	pub fn read_spec(&mut self, text: &str) -> Result<Vec<Value>, Error> {
		notation::read(text, &mut self.interner, &self.types)
	}


	/// Call an action. Positional arguments fill the visible normal parameters in order,
	/// named arguments are set through the frame's public surface.
	pub fn call(
		&self,
		action: &Gc<Action>,
		positional: Vec<Value>,
		named: Vec<(Symbol, Value)>,
	) -> Result<Value, Panic> {
		let mut frame = Frame::new(action);

		let slots: Vec<Symbol> = action
			.parameters()
			.filter(|(_, entry)| entry.class() == Some(ParamClass::Normal))
			.map(|(_, entry)| entry.name)
			.collect();

		if positional.len() > slots.len() {
			return Err(Panic::too_many_arguments(slots.len(), positional.len()));
		}

		for (name, value) in slots.into_iter().zip(positional) {
			frame.set(name, value)?;
		}

		for (name, value) in named {
			frame.set(name, value)?;
		}

		self.invoke(frame)
	}


	/// Run a fulfilled frame. Adapter phases redirect the frame to their underlying action
	/// until some phase produces a result.
	pub fn invoke(&self, mut frame: Frame) -> Result<Value, Panic> {
		loop {
			let phase = frame.phase().clone();

			log::trace!("dispatching {:?}", phase);

			match phase.details() {
				Details::Native(fun) => {
					Self::check_required(&frame, phase.paramlist())?;
					let value = fun.call(CallContext { runtime: self, frame: &frame })?;
					return Self::check_return(&phase, value);
				}

				Details::Adapter(adapter) => {
					let underlying = &adapter.underlying;

					// The frame is compatible with the phase, so it is compatible with the
					// phase's source too. Only the link itself needs checking.
					let source = self.ancestry.source(phase.paramlist().id());
					if source != Some(underlying.paramlist().id()) {
						return Err(Panic::incompatible_frame(underlying.label()));
					}

					frame.redirect(Rootvar::of(underlying));
				}

				Details::DatatypeCheck(datatype) => return Ok(
					frame.arg(self.checked_slot).is_type(*datatype).into()
				),

				Details::TypesetCheck(typeset) => return Ok(
					typeset.contains(frame.arg(self.checked_slot).kind()).into()
				),
			}
		}
	}


	/// Run a frame through another action, which must be an ancestor or a derivation of the
	/// action the frame was built for.
	pub fn invoke_as(&self, mut frame: Frame, action: &Gc<Action>) -> Result<Value, Panic> {
		if !self.ancestry.compatible(frame.table().id(), action.paramlist().id()) {
			return Err(Panic::incompatible_frame(action.label()));
		}

		frame.redirect(Rootvar::of(action));

		self.invoke(frame)
	}


	/// Check that every required parameter of the executing phase was supplied. Slots
	/// appended by augmentation are not part of the phase's table, and so never required.
	fn check_required(frame: &Frame, phase: &ParamTable) -> Result<(), Panic> {
		for (slot, entry) in phase.params() {
			match &entry.descriptor {
				Descriptor::Unbound { class: ParamClass::Normal, types }
					if frame.arg(slot).is_none() && !types.contains(value::Kind::None) =>
						return Err(Panic::missing_argument(entry.name)),

				_ => (),
			}
		}

		Ok(())
	}


	/// Check a result against the return constraint of the phase that produced it.
	fn check_return(phase: &Action, value: Value) -> Result<Value, Panic> {
		match phase.paramlist().return_param().and_then(ParamEntry::types) {
			Some(types) if !types.accepts(&value) => Err(Panic::return_type_error(value, types.clone())),
			_ => Ok(value),
		}
	}
}
