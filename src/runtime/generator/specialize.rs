use gc::Gc;

use crate::{
	fmt::FmtString,
	symbol::Symbol,
};
use super::super::{
	action::{Action, Details, FrameAdapter, Meta},
	paramlist::{Builder, ParamTable, Sealing},
	value::Value,
	Error,
	Runtime,
};


impl Runtime {
	/// Derive an action with some parameters of `source` pre-bound. Bound parameters leave
	/// the public surface, but remain inspectable through `Action::specializations`.
	pub fn specialize(
		&mut self,
		source: &Gc<Action>,
		bindings: Vec<(Symbol, Value)>,
	) -> Result<Gc<Action>, Error> {
		let mut builder = Builder::new(&mut self.scratch, self.interner.keys());

		builder.copy_from(source.paramlist(), Sealing::Preserve);

		for (name, value) in bindings {
			builder.specialize(name, value)?;
		}

		builder.inherit_description(source.description());

		let finished = builder.finish()?;
		let description = finished.description.as_ref().map(|text| text.copy());

		// No archetype: frames run this action, whose adapter redirects them to the source.
		let table = Gc::new(ParamTable::new(self.ancestry.allocate(), finished));

		let action = Gc::new(
			Action::new(
				table.clone(),
				Details::Adapter(FrameAdapter::specialized(source.clone())),
				Some(Meta { description, derived_from: Some(source.clone()) }),
				source.label(),
			)
		);

		self.ancestry.link(table.id(), source.paramlist().id());

		log::debug!(
			"specialized {} into table {:?}",
			source.fmt_string(&self.interner),
			table.id(),
		);

		Ok(action)
	}
}
