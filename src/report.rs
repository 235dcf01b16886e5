//! Machine readable descriptions of an action's interface.

use serde::{
	ser::{SerializeMap, SerializeSeq},
	Serialize,
	Serializer,
};

use crate::{
	runtime::{
		action::Action,
		paramlist::ParamEntry,
		value::{Constraint, Type, Typeset, Value},
	},
	symbol::{self, Symbol},
};


/// The public interface of an action: its visible parameters and its inspectable
/// specializations. Sealed parameters are not reported.
#[derive(Debug, Copy, Clone)]
pub struct Report<'a> {
	pub action: &'a Action,
	pub interner: &'a symbol::Interner,
}


impl<'a> Report<'a> {
	pub fn new(action: &'a Action, interner: &'a symbol::Interner) -> Self {
		Self { action, interner }
	}


	fn name(&self, symbol: Symbol) -> String {
		self.interner
			.resolve(symbol)
			.map(|name| String::from_utf8_lossy(name).into_owned())
			.unwrap_or_else(|| symbol::ILL_FORMED.to_owned())
	}
}


impl<'a> Serialize for Report<'a> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let action = self.action;
		let mut map = serializer.serialize_map(Some(6))?;

		map.serialize_entry("label", &action.label().map(|label| self.name(label)))?;

		map.serialize_entry(
			"description",
			&action
				.description()
				.map(|text| String::from_utf8_lossy(text.as_bytes()).into_owned())
		)?;

		map.serialize_entry("dispatcher", &action.dispatcher().to_string())?;
		map.serialize_entry("derivation", &action.derivation().map(|kind| kind.to_string()))?;

		let parameters: Vec<ParamReport> = action
			.parameters()
			.map(|(_, entry)| ParamReport { entry, report: *self })
			.collect();
		map.serialize_entry("parameters", &parameters)?;

		let specializations: Vec<(String, ValueReport)> = action
			.specializations()
			.map(|(entry, value)| (self.name(entry.name), ValueReport { value, interner: self.interner }))
			.collect();
		map.serialize_entry("specializations", &Specializations(&specializations))?;

		map.end()
	}
}


struct ParamReport<'a> {
	entry: &'a ParamEntry,
	report: Report<'a>,
}


impl<'a> Serialize for ParamReport<'a> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let entry = self.entry;
		let mut map = serializer.serialize_map(Some(4))?;

		map.serialize_entry("name", &self.report.name(entry.name))?;
		map.serialize_entry("class", &entry.class().map(|class| class.to_string()))?;
		map.serialize_entry(
			"types",
			&entry.types().map(|types| ConstraintReport { types, report: self.report })
		)?;
		map.serialize_entry(
			"notes",
			&entry.doc_notes
				.as_ref()
				.map(|notes| String::from_utf8_lossy(notes.as_bytes()).into_owned())
		)?;

		map.end()
	}
}


/// Specializations serialize as an object, in table order.
struct Specializations<'a>(&'a [(String, ValueReport<'a>)]);


impl<'a> Serialize for Specializations<'a> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.0.len()))?;

		for (name, value) in self.0 {
			map.serialize_entry(name, value)?;
		}

		map.end()
	}
}


struct TypesetReport(Typeset);


impl Serialize for TypesetReport {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(None)?;

		for kind in self.0.kinds() {
			seq.serialize_element(kind.name())?;
		}

		seq.end()
	}
}


/// Constraints serialize as a list of datatype names, open categories last.
struct ConstraintReport<'a> {
	types: &'a Constraint,
	report: Report<'a>,
}


impl<'a> Serialize for ConstraintReport<'a> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(None)?;

		for kind in self.types.kinds().kinds() {
			seq.serialize_element(kind.name())?;
		}

		for extension in self.types.extensions() {
			seq.serialize_element(&self.report.name(extension.name))?;
		}

		seq.end()
	}
}


struct ValueReport<'a> {
	value: &'a Value,
	interner: &'a symbol::Interner,
}


impl<'a> ValueReport<'a> {
	fn of(&self, value: &'a Value) -> Self {
		Self { value, interner: self.interner }
	}


	fn name(&self, symbol: Symbol) -> String {
		self.interner
			.resolve(symbol)
			.map(|name| String::from_utf8_lossy(name).into_owned())
			.unwrap_or_else(|| symbol::ILL_FORMED.to_owned())
	}
}


impl<'a> Serialize for ValueReport<'a> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self.value {
			Value::None => serializer.serialize_unit(),
			Value::Logic(logic) => serializer.serialize_bool(*logic),
			Value::Integer(int) => serializer.serialize_i64(*int),
			Value::Text(text) => serializer.serialize_str(&String::from_utf8_lossy(text.as_bytes())),

			Value::Block(block) => {
				let mut seq = serializer.serialize_seq(Some(block.len()))?;

				for value in block.iter() {
					seq.serialize_element(&self.of(value))?;
				}

				seq.end()
			}

			Value::Word(symbol) => serializer.serialize_str(&self.name(*symbol)),
			Value::SetWord(symbol) => serializer.serialize_str(&format!("{}:", self.name(*symbol))),
			Value::Refinement(symbol) => serializer.serialize_str(&format!("/{}", self.name(*symbol))),
			Value::Datatype(Type::Builtin(kind)) => serializer.serialize_str(kind.name()),
			Value::Datatype(Type::Custom(extension)) => serializer.serialize_str(&self.name(extension.name)),
			Value::Typeset(typeset) => TypesetReport(*typeset).serialize(serializer),

			Value::Action(action) => match action.label() {
				Some(label) => serializer.serialize_str(&self.name(label)),
				None => serializer.serialize_str("action!"),
			},

			Value::Custom(custom) => self.of(&custom.payload).serialize(serializer),
		}
	}
}
