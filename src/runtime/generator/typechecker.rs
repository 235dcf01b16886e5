use gc::Gc;

use crate::symbol::Interner;
use super::super::{
	action::{Action, Details},
	ancestry::Ancestry,
	paramlist::{notation, Builder, Flags, ParamTable, Scratch},
	value::{Registry, Value},
	Error,
	Runtime,
};


/// The interface shared by every typechecker.
const PROTOTYPE: &str = "return: [logic!] value [any-type!]";


/// Build the table shared by all typecheckers. Its archetype is left empty, so that frames
/// run whichever checker they were built for.
pub fn prototype(
	interner: &mut Interner,
	scratch: &mut Scratch,
	ancestry: &mut Ancestry,
	types: &Registry,
) -> Result<ParamTable, Error> {
	let spec = notation::read(PROTOTYPE, interner, types)?;

	let mut builder = Builder::new(scratch, interner.keys());
	builder.declare(&spec, Flags::NONE)?;

	Ok(ParamTable::new(ancestry.allocate(), builder.finish()?))
}


impl Runtime {
	/// Build a predicate for a datatype or a typeset. The checker compares type tags
	/// directly, and for open categories the extension identity.
	pub fn make_typechecker(&self, descriptor: &Value) -> Result<Gc<Action>, Error> {
		let details = match descriptor {
			Value::Datatype(datatype) => Details::DatatypeCheck(*datatype),
			Value::Typeset(typeset) => Details::TypesetCheck(*typeset),
			other => return Err(Error::invalid_descriptor(other.copy())),
		};

		log::trace!("typechecker for {:?}", descriptor);

		Ok(Gc::new(Action::new(self.checker_table.clone(), details, None, None)))
	}
}
