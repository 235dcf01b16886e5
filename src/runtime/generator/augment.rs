use gc::Gc;

use crate::{
	fmt::FmtString,
	symbol::Symbol,
};
use super::super::{
	action::{Action, Details, FrameAdapter, Meta},
	paramlist::{Builder, Flags, ParamTable, Sealing},
	value::Value,
	Error,
	Rootvar,
	Runtime,
};


impl Runtime {
	/// Derive an action that behaves like `source`, and additionally accepts the parameters
	/// declared by `spec`. The new parameters are inert: the source never reads them.
	pub fn augment(&mut self, source: &Gc<Action>, spec: &[Value]) -> Result<Gc<Action>, Error> {
		self.augment_as(source, spec, None)
	}


	/// Augment, labelling the result. Without a label, the source's is inherited.
	pub fn augment_as(
		&mut self,
		source: &Gc<Action>,
		spec: &[Value],
		label: Option<Symbol>,
	) -> Result<Gc<Action>, Error> {
		let mut builder = Builder::new(&mut self.scratch, self.interner.keys());

		// Specialized parameters of the source must not show through the new action.
		builder.copy_from(source.paramlist(), Sealing::SealSpecialized);
		builder.declare(spec, Flags::NONE)?;
		builder.inherit_description(source.description());

		let finished = builder.finish()?;
		let description = finished.description.as_ref().map(|text| text.copy());

		let table = Gc::new(ParamTable::new(self.ancestry.allocate(), finished));
		table.set_archetype(Rootvar::of(source));

		let action = Gc::new(
			Action::new(
				table.clone(),
				Details::Adapter(FrameAdapter::augmented(source.clone())),
				Some(Meta { description, derived_from: Some(source.clone()) }),
				label.or_else(|| source.label()),
			)
		);

		self.ancestry.link(table.id(), source.paramlist().id());

		log::debug!(
			"augmented {} into table {:?} with {} slots",
			source.fmt_string(&self.interner),
			table.id(),
			table.len(),
		);

		Ok(action)
	}
}
