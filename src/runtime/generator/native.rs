use gc::Gc;

use super::super::{
	action::{Action, Details, Meta, RustFun},
	frame::Binding,
	paramlist::{notation, Builder, Flags, ParamTable},
	Error,
	Rootvar,
	Runtime,
};


impl Runtime {
	/// Build an action for a native function, from the spec the native declares.
	/// A bound native runs in its binding, and so does anything derived from it.
	pub fn make_native(&mut self, fun: RustFun, binding: Binding) -> Result<Gc<Action>, Error> {
		let spec = notation::read(fun.spec(), &mut self.interner, &self.types)?;

		let mut builder = Builder::new(&mut self.scratch, self.interner.keys());
		builder.declare(&spec, Flags::RETURN)?;

		let finished = builder.finish()?;
		let description = finished.description.as_ref().map(|text| text.copy());

		let table = Gc::new(ParamTable::new(self.ancestry.allocate(), finished));
		let label = self.interner.get_or_intern(fun.name());

		let action = Gc::new(
			Action::new(
				table.clone(),
				Details::Native(fun),
				Some(Meta { description, derived_from: None }),
				Some(label),
			)
		);

		if binding.is_bound() {
			table.set_archetype(Rootvar { phase: action.clone(), binding });
		}

		log::trace!("native {:?} built with table {:?}", action, table.id());

		Ok(action)
	}
}
