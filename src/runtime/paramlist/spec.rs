use crate::{
	runtime::{
		error::Error,
		value::{Block, Constraint, Str, Typeset, Value},
	},
	symbol::{Keys, Symbol},
};
use super::{Descriptor, ParamClass, ParamEntry, Transaction};


/// Options for parsing declarations.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Flags {
	/// Synthesize a `return` parameter in the first slot if the spec declares none.
	pub return_: bool,
}


impl Flags {
	pub const NONE: Flags = Flags { return_: false };
	pub const RETURN: Flags = Flags { return_: true };
}


/// The result of parsing a spec, besides the pushed entries.
#[derive(Debug, Default)]
pub struct Declarations {
	/// The leading text of the spec.
	pub description: Option<Str>,
}


/// Parse a declarative spec, pushing one entry per declared parameter onto the
/// transaction. The transaction must already hold the header, and possibly entries copied
/// from another table.
///
/// `return_slot` is the position of the return parameter, if one is already present. It
/// is updated when the spec declares or synthesizes one.
pub fn parse_declarations(
	transaction: &mut Transaction,
	spec: &[Value],
	flags: Flags,
	keys: Keys,
	return_slot: &mut Option<usize>,
) -> Result<Declarations, Error> {
	let mut declarations = Declarations::default();
	// The slot of the parameter declared last by this spec, to which type blocks and
	// notes attach.
	let mut current: Option<usize> = None;

	for (position, item) in spec.iter().enumerate() {
		match item {
			Value::Text(text) => match current {
				None if declarations.description.is_none() => {
					declarations.description = Some(text.copy());
				}

				None => return Err(
					Error::spec_syntax(position, item.copy(), "duplicate description")
				),

				Some(slot) => {
					let entry = &mut transaction[slot];

					if entry.doc_notes.is_some() {
						return Err(
							Error::spec_syntax(position, item.copy(), "duplicate parameter notes")
						);
					}

					entry.doc_notes = Some(text.copy());
				}
			},

			Value::Block(block) => {
				let slot = current.ok_or_else(
					|| Error::spec_syntax(position, item.copy(), "type block before any parameter")
				)?;

				let types = parse_types(block, position)?;
				let entry = &mut transaction[slot];

				if entry.type_notes.is_some() {
					return Err(
						Error::spec_syntax(position, item.copy(), "duplicate type block")
					);
				}

				entry.type_notes = Some(block.copy());

				if let Descriptor::Unbound { types: ref mut declared, .. } = entry.descriptor {
					*declared = types;
				}
			}

			Value::Word(name) => {
				current = Some(declare(transaction, *name, ParamClass::Normal));
			}

			Value::Refinement(name) => {
				current = Some(declare(transaction, *name, ParamClass::Refinement));
			}

			Value::SetWord(name) if *name == keys.return_ => {
				if return_slot.is_some() {
					return Err(Error::duplicate_parameter(*name));
				}

				let slot = declare(transaction, *name, ParamClass::Return);
				*return_slot = Some(slot);
				current = Some(slot);
			}

			Value::SetWord(_) => return Err(
				Error::spec_syntax(position, item.copy(), "only return: may be declared as a set-word")
			),

			_ => return Err(
				Error::spec_syntax(position, item.copy(), "invalid spec item")
			),
		}
	}

	if flags.return_ && return_slot.is_none() {
		transaction.insert(
			1,
			ParamEntry::unbound(keys.return_, ParamClass::Return, default_types(ParamClass::Return))
		);
		*return_slot = Some(1);
	}

	Ok(declarations)
}


/// Push a parameter with its default constraint, returning its slot.
fn declare(transaction: &mut Transaction, name: Symbol, class: ParamClass) -> usize {
	transaction.push(ParamEntry::unbound(name, class, default_types(class)));
	transaction.len() - 1
}


/// The constraint of a parameter declared without a type block.
pub fn default_types(class: ParamClass) -> Constraint {
	match class {
		ParamClass::Normal | ParamClass::Refinement => Typeset::any_value().into(),
		ParamClass::Return => Typeset::any_type().into(),
	}
}


/// Collect the datatypes and typesets of a type block. Open categories are kept by
/// identity, so `[point!]` does not admit other custom values.
fn parse_types(block: &Block, position: usize) -> Result<Constraint, Error> {
	block
		.iter()
		.try_fold(
			Constraint::default(),
			|types, item| match item {
				Value::Datatype(datatype) => Ok(types.with_type(*datatype)),
				Value::Typeset(typeset) => Ok(types.with_typeset(*typeset)),
				other => Err(
					Error::spec_syntax(position, other.copy(), "type blocks may only hold datatypes and typesets")
				),
			}
		)
}
