mod fmt;

use std::ops::Deref;

use gc::{unsafe_empty_trace, Finalize, Gc, Trace};

use crate::symbol::Symbol;
use super::{
	frame::CallContext,
	paramlist::{Descriptor, ParamEntry, ParamTable, Visibility},
	value::{Str, Type, Typeset, Value},
	Panic,
};


/// A native function implementation.
pub trait NativeFun: Trace + Finalize + 'static {
	/// Get a human-readable name for the function.
	/// This is also the name the native is registered under, and therefore must be unique.
	fn name(&self) -> &'static str;
	/// The spec of the native, in textual notation.
	fn spec(&self) -> &'static str;
	/// Invoke the function.
	fn call(&self, context: CallContext) -> Result<Value, Panic>;
}


/// A garbage-collected native function.
#[derive(Trace, Finalize)]
pub struct RustFun(Gc<Box<dyn NativeFun>>);


impl RustFun {
	/// Shallow copy.
	pub fn copy(&self) -> Self {
		Self(self.0.clone())
	}


	pub fn name(&self) -> &'static str {
		self.0.name()
	}


	pub fn spec(&self) -> &'static str {
		self.0.spec()
	}


	pub fn call(&self, context: CallContext) -> Result<Value, Panic> {
		self.0.call(context)
	}
}


impl std::fmt::Debug for RustFun {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}


impl<T: NativeFun> From<T> for RustFun {
	fn from(fun: T) -> Self {
		Self(Gc::new(Box::new(fun)))
	}
}


/// A native registration. Natives are instantiated per runtime, as garbage collected
/// values cannot live in statics.
pub struct Native(fn() -> RustFun);


impl Native {
	pub fn of<T: NativeFun + Default>() -> Self {
		Self(instantiate::<T>)
	}


	pub fn instantiate(&self) -> RustFun {
		(self.0)()
	}
}


fn instantiate<T: NativeFun + Default>() -> RustFun {
	T::default().into()
}


inventory::collect!(Native);


/// Which derivation produced an adapter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdapterKind {
	Specialized,
	Augmented,
}


impl Finalize for AdapterKind { }


unsafe impl Trace for AdapterKind {
	unsafe_empty_trace!();
}


/// Runs a frame through the underlying action. Specialization and augmentation share this
/// behavior: the frame's root slot is redirected to the underlying action and dispatch
/// starts over.
#[derive(Debug)]
#[derive(Trace, Finalize)]
pub struct FrameAdapter {
	pub underlying: Gc<Action>,
	pub kind: AdapterKind,
}


impl FrameAdapter {
	pub fn specialized(underlying: Gc<Action>) -> Self {
		Self { underlying, kind: AdapterKind::Specialized }
	}


	pub fn augmented(underlying: Gc<Action>) -> Self {
		Self { underlying, kind: AdapterKind::Augmented }
	}
}


/// The behavior-specific data of an action.
#[derive(Debug)]
#[derive(Trace, Finalize)]
pub enum Details {
	Native(RustFun),
	Adapter(FrameAdapter),
	DatatypeCheck(Type),
	TypesetCheck(Typeset),
}


/// The behavior selector of an action, derived from its details.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dispatcher {
	Native,
	Adapter,
	DatatypeChecker,
	TypesetChecker,
}


/// Optional action metadata.
#[derive(Debug)]
#[derive(Trace, Finalize)]
pub struct Meta {
	pub description: Option<Str>,
	/// The action this one was derived from.
	pub derived_from: Option<Gc<Action>>,
}


/// An immutable callable.
#[derive(Trace, Finalize)]
pub struct Action {
	paramlist: Gc<ParamTable>,
	details: Details,
	meta: Option<Meta>,
	label: Option<Symbol>,
}


impl Action {
	pub(in crate::runtime) fn new(
		paramlist: Gc<ParamTable>,
		details: Details,
		meta: Option<Meta>,
		label: Option<Symbol>,
	) -> Self {
		Self { paramlist, details, meta, label }
	}


	pub fn paramlist(&self) -> &Gc<ParamTable> {
		&self.paramlist
	}


	pub fn details(&self) -> &Details {
		&self.details
	}


	pub fn dispatcher(&self) -> Dispatcher {
		match self.details {
			Details::Native(_) => Dispatcher::Native,
			Details::Adapter(_) => Dispatcher::Adapter,
			Details::DatatypeCheck(_) => Dispatcher::DatatypeChecker,
			Details::TypesetCheck(_) => Dispatcher::TypesetChecker,
		}
	}


	/// How the action was derived, if it was.
	pub fn derivation(&self) -> Option<AdapterKind> {
		match &self.details {
			Details::Adapter(adapter) => Some(adapter.kind),
			_ => None,
		}
	}


	pub fn meta(&self) -> Option<&Meta> {
		self.meta.as_ref()
	}


	pub fn description(&self) -> Option<&Str> {
		self.meta
			.as_ref()
			.and_then(|meta| meta.description.as_ref())
	}


	pub fn label(&self) -> Option<Symbol> {
		self.label
	}


	/// The parameters callers may see, with their slots. This includes the return
	/// parameter, which is visible but not settable.
	pub fn parameters(&self) -> impl Iterator<Item = (usize, &ParamEntry)> {
		self.paramlist
			.deref()
			.params()
			.filter(|(_, entry)| entry.visibility() == Visibility::Public)
	}


	/// The specialized parameters that are not sealed, with their values.
	pub fn specializations(&self) -> impl Iterator<Item = (&ParamEntry, &Value)> {
		self.paramlist
			.deref()
			.params()
			.filter_map(
				|(_, entry)| match &entry.descriptor {
					Descriptor::Specialized(value) if !entry.sealed => Some((entry, value)),
					_ => None,
				}
			)
	}
}


/// Actions are compared by identity.
impl PartialEq for Action {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self, other)
	}
}


impl Eq for Action { }


/// The archetype of a table refers back to actions, so this must not recurse into it.
impl std::fmt::Debug for Action {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_struct("Action")
			.field("table", &self.paramlist.id())
			.field("dispatcher", &self.dispatcher())
			.field("label", &self.label)
			.finish()
	}
}
