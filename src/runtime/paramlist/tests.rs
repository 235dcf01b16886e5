use assert_matches::assert_matches;

use crate::{
	runtime::{
		error::Error,
		value::{Constraint, Kind, Registry, Type, Typeset, Value},
	},
	symbol::Interner,
};
use super::*;


struct Context {
	interner: Interner,
	registry: Registry,
	scratch: Scratch,
}


impl Context {
	fn new() -> Self {
		Self {
			interner: Interner::new(),
			registry: Registry::default(),
			scratch: Scratch::default(),
		}
	}


	fn read(&mut self, text: &str) -> Vec<Value> {
		notation::read(text, &mut self.interner, &self.registry)
			.unwrap_or_else(|error| panic!("invalid spec {:?}: {}", text, error))
	}


	fn build(&mut self, text: &str, flags: Flags) -> Result<Finished, Error> {
		let spec = self.read(text);
		let mut builder = Builder::new(&mut self.scratch, self.interner.keys());
		builder.declare(&spec, flags)?;
		builder.finish()
	}


	fn table(&mut self, text: &str, flags: Flags) -> ParamTable {
		let finished = self
			.build(text, flags)
			.unwrap_or_else(|error| panic!("failed to build {:?}: {}", text, error));

		ParamTable::new(TableId(0), finished)
	}


	fn symbol(&mut self, name: &str) -> Symbol {
		self.interner.get_or_intern(name)
	}
}


#[test]
fn test_notation() {
	let mut context = Context::new();

	let values = context.read(r#""Say \"hi\"" a /b c: [integer! any-word!] -5 none true false"#);

	let a = context.symbol("a");
	let b = context.symbol("b");
	let c = context.symbol("c");

	assert_eq!(
		values,
		vec![
			r#"Say "hi""#.into(),
			Value::Word(a),
			Value::Refinement(b),
			Value::SetWord(c),
			Block::new(
				vec![
					Type::Builtin(Kind::Integer).into(),
					Typeset::any_word().into(),
				]
			).into(),
			Value::Integer(-5),
			Value::None,
			Value::Logic(true),
			Value::Logic(false),
		]
	);
}


#[test]
fn test_notation_extension() {
	let mut context = Context::new();

	let name = context.symbol("point!");
	let extension = context.registry.register(name);

	assert_eq!(context.read("point!"), vec![Value::Datatype(Type::Custom(extension))]);
	// Registering twice yields the same category.
	assert_eq!(context.registry.register(name), extension);
}


#[test]
fn test_notation_errors() {
	let mut context = Context::new();

	let mut read = |text: &str| notation::read(text, &mut context.interner, &context.registry);

	assert_matches!(read("a ]"), Err(Error::SpecSyntax { position: 2, found: None, .. }));
	assert_matches!(read("a [b"), Err(Error::SpecSyntax { position: 2, found: None, .. }));
	assert_matches!(read(r#"a "b"#), Err(Error::SpecSyntax { position: 2, found: None, .. }));
	assert_matches!(read(r#""\q""#), Err(Error::SpecSyntax { position: 1, found: None, .. }));
	assert_matches!(read("foo!"), Err(Error::SpecSyntax { position: 0, found: None, .. }));
	assert_matches!(read("1a"), Err(Error::SpecSyntax { position: 0, found: None, .. }));
	assert_matches!(read("/"), Err(Error::SpecSyntax { position: 0, found: None, .. }));
	assert_matches!(read("a:b:"), Err(Error::SpecSyntax { .. }));
	assert_matches!(read(""), Ok(values) if values.is_empty());
}


#[test]
fn test_declarations() {
	let mut context = Context::new();
	let table = context.table(r#""Doc" a [integer!] "A note" /b"#, Flags::NONE);

	let a = context.symbol("a");
	let b = context.symbol("b");

	assert_eq!(table.len(), 3);
	assert_eq!(table.return_slot(), None);
	assert_eq!(table.find(a), Some(1));
	assert_eq!(table.find(b), Some(2));

	let a = table.get(1).expect("missing a");
	assert_eq!(a.class(), Some(ParamClass::Normal));
	assert_eq!(a.types(), Some(&Constraint::from(Kind::Integer)));
	assert_matches!(&a.doc_notes, Some(notes) if notes.as_bytes() == b"A note");
	assert_matches!(&a.type_notes, Some(block) if block.len() == 1);

	let b = table.get(2).expect("missing b");
	assert_eq!(b.class(), Some(ParamClass::Refinement));
	assert_eq!(b.types(), Some(&Constraint::from(Typeset::any_value())));
	assert_matches!(b.types(), Some(types) if !types.contains(Kind::None));

	assert!(table.get(0).is_none());
	assert_eq!(table.entries()[0].visibility(), Visibility::Sealed);
}


#[test]
fn test_description() {
	let mut context = Context::new();

	let finished = context
		.build(r#""Doc" a"#, Flags::NONE)
		.expect("failed to build");

	assert_matches!(finished.description, Some(text) if text.as_bytes() == b"Doc");
}


#[test]
fn test_synthesized_return() {
	let mut context = Context::new();
	let keys = context.interner.keys();

	let table = context.table("a b", Flags::RETURN);

	assert_eq!(table.len(), 4);
	assert_eq!(table.return_slot(), Some(1));
	assert_eq!(table.find(keys.return_), Some(1));
	assert_matches!(
		table.return_param(),
		Some(ParamEntry { descriptor: Descriptor::Unbound { class: ParamClass::Return, types }, .. })
			if *types == Typeset::any_type().into()
	);

	// A declared return is not duplicated, and keeps its position.
	let table = context.table("a return: [integer!] b", Flags::RETURN);

	assert_eq!(table.len(), 4);
	assert_eq!(table.return_slot(), Some(2));
	assert_eq!(table.return_param().and_then(ParamEntry::types), Some(&Constraint::from(Kind::Integer)));
}


#[test]
fn test_spec_syntax_errors() {
	let mut context = Context::new();

	let mut build = |text: &str| context.build(text, Flags::NONE);

	assert_matches!(build("[integer!] a"), Err(Error::SpecSyntax { position: 0, .. }));
	assert_matches!(build("a [integer!] [text!]"), Err(Error::SpecSyntax { position: 2, .. }));
	assert_matches!(build("a [b]"), Err(Error::SpecSyntax { position: 1, found: Some(Value::Word(_)), .. }));
	assert_matches!(build("foo:"), Err(Error::SpecSyntax { position: 0, found: Some(Value::SetWord(_)), .. }));
	assert_matches!(build("a 5"), Err(Error::SpecSyntax { position: 1, found: Some(Value::Integer(5)), .. }));
	assert_matches!(build(r#""x" "y""#), Err(Error::SpecSyntax { position: 1, .. }));
	assert_matches!(build(r#"a "x" "y""#), Err(Error::SpecSyntax { position: 2, .. }));

	assert_eq!(context.scratch.depth(), 0);
}


#[test]
fn test_duplicate_parameter() {
	let mut context = Context::new();
	let a = context.symbol("a");
	let keys = context.interner.keys();

	assert_matches!(
		context.build("a b /a", Flags::NONE),
		Err(Error::DuplicateParameter(name)) if name == a
	);

	assert_matches!(
		context.build("return: a return:", Flags::NONE),
		Err(Error::DuplicateParameter(name)) if name == keys.return_
	);

	assert_eq!(context.scratch.depth(), 0);
}


#[test]
fn test_copy_forward() {
	let mut context = Context::new();
	let source = context.table("a [integer!] b", Flags::RETURN);

	let a = context.symbol("a");
	let c = context.symbol("c");
	let keys = context.interner.keys();
	let spec = context.read("c return:");

	// Copying a table with a return and declaring another one is a duplicate.
	let mut builder = Builder::new(&mut context.scratch, keys);
	builder.copy_from(&source, Sealing::SealSpecialized);
	assert_matches!(
		builder.declare(&spec, Flags::NONE),
		Err(Error::DuplicateParameter(name)) if name == keys.return_
	);
	drop(builder);

	assert_eq!(context.scratch.depth(), 0);

	// Without a return in the source, the declared one is kept where it was declared.
	let source = context.table("a [integer!] b", Flags::NONE);

	let mut builder = Builder::new(&mut context.scratch, keys);
	builder.copy_from(&source, Sealing::SealSpecialized);
	builder.declare(&spec, Flags::NONE).expect("failed to declare");
	let table = ParamTable::new(TableId(1), builder.finish().expect("failed to finish"));

	assert_eq!(table.len(), 5);
	assert_eq!(table.find(a), Some(1));
	assert_eq!(table.find(c), Some(3));
	assert_eq!(table.return_slot(), Some(4));
	assert_eq!(context.scratch.depth(), 0);
}


#[test]
fn test_specialize_and_seal() {
	let mut context = Context::new();
	let source = context.table("a [integer!] b", Flags::RETURN);

	let a = context.symbol("a");
	let b = context.symbol("b");
	let missing = context.symbol("missing");
	let keys = context.interner.keys();

	let mut builder = Builder::new(&mut context.scratch, keys);
	builder.copy_from(&source, Sealing::Preserve);

	assert_matches!(builder.specialize(missing, Value::Integer(1)), Err(Error::UnknownParameter(_)));
	assert_matches!(builder.specialize(keys.return_, Value::Integer(1)), Err(Error::OutputParameter(_)));
	assert_matches!(
		builder.specialize(a, "text".into()),
		Err(Error::TypeError { name, expected, .. }) if name == a && expected == Kind::Integer.into()
	);

	builder.specialize(a, Value::Integer(1)).expect("failed to specialize");
	assert_matches!(builder.specialize(a, Value::Integer(2)), Err(Error::HiddenParameter(_)));

	let specialized = ParamTable::new(TableId(1), builder.finish().expect("failed to finish"));
	let slot = specialized.find(a).expect("missing a");

	assert_eq!(specialized.entries()[slot].visibility(), Visibility::Specialized);
	assert_matches!(specialized.entries()[slot].descriptor, Descriptor::Specialized(Value::Integer(1)));

	// Copying forward seals the specialization.
	let mut builder = Builder::new(&mut context.scratch, keys);
	builder.copy_from(&specialized, Sealing::SealSpecialized);
	assert_matches!(builder.specialize(a, Value::Integer(2)), Err(Error::HiddenParameter(_)));
	let sealed = ParamTable::new(TableId(2), builder.finish().expect("failed to finish"));

	assert_eq!(sealed.entries()[slot].visibility(), Visibility::Sealed);
	assert_eq!(sealed.entries()[sealed.find(b).expect("missing b")].visibility(), Visibility::Public);
	assert_eq!(context.scratch.depth(), 0);
}


#[test]
fn test_scratch_transactions() {
	let mut scratch = Scratch::default();

	{
		let mut outer = scratch.begin();
		outer.push(ParamEntry::header());

		{
			let mut inner = outer.begin();
			inner.push(ParamEntry::header());
			inner.push(ParamEntry::header());
			assert_eq!(inner.len(), 2);
		}

		assert_eq!(outer.len(), 1);

		let mut popped = outer.begin();
		popped.push(ParamEntry::header());
		assert_eq!(popped.pop().len(), 1);

		assert_eq!(outer.len(), 1);
	}

	assert_eq!(scratch.depth(), 0);
}
