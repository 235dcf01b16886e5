mod fmt;

use gc::{unsafe_empty_trace, Finalize, Trace};
use intaglio::{Symbol as SymbolInner, bytes::SymbolTable};

pub use self::fmt::ILL_FORMED;


/// A symbol is a reference to a name stored in the symbol interner.
/// Parameter names, labels and words are all symbols.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Symbol(SymbolInner);


/// The default symbol is a dummy symbol, which will yield "<invalid symbol>" when
/// resolved. Parameter table headers are named with it.
impl Default for Symbol {
	fn default() -> Self {
		Self(SymbolInner::new(0))
	}
}


impl From<Symbol> for usize {
	fn from(symbol: Symbol) -> usize {
		symbol.0.id() as usize
	}
}


impl Finalize for Symbol { }


/// Symbols hold no garbage collected references.
unsafe impl Trace for Symbol {
	unsafe_empty_trace!();
}


/// Symbols the runtime refers to by name.
#[derive(Debug, Copy, Clone)]
pub struct Keys {
	/// The output parameter of an action.
	pub return_: Symbol,
	/// The argument of a typechecker.
	pub value: Symbol,
}


/// A symbol interner, used to store parameter names, labels and words.
#[derive(Debug)]
pub struct Interner {
	table: SymbolTable,
	keys: Keys,
}


impl Interner {
	/// Create a new interner. Please note that this allocates memory even if no symbols are
	/// inserted.
	pub fn new() -> Self {
		let mut table = SymbolTable::new();

		table
			.intern(b"<invalid symbol>".as_ref())
			.expect("failed to intern symbol");

		let mut intern = |name: &'static [u8]| Symbol(
			table
				.intern(name)
				.expect("failed to intern symbol")
		);

		let keys = Keys {
			return_: intern(b"return"),
			value: intern(b"value"),
		};

		Self { table, keys }
	}


	/// The well known symbols.
	pub fn keys(&self) -> Keys {
		self.keys
	}


	/// Get the symbol for a value, if it has been interned.
	pub fn get<T>(&self, value: T) -> Option<Symbol>
	where
		T: AsRef<[u8]>,
	{
		self.table
			.check_interned(value.as_ref())
			.map(Symbol)
	}


	/// Get the symbol for a value. The value is interned if needed.
	pub fn get_or_intern<T>(&mut self, value: T) -> Symbol
	where
		T: AsRef<[u8]>,
	{
		let value = value.as_ref().to_owned();

		Symbol(
			self.table
				.intern(value)
				.expect("failed to intern symbol")
		)
	}


	/// Resolve the string for a symbol.
	pub fn resolve(&self, symbol: Symbol) -> Option<&[u8]> {
		self.table.get(symbol.0)
	}


	/// Get the number of interned strings.
	/// This does not include the dummy symbol.
	pub fn len(&self) -> usize {
		self.table.len() - 1
	}


	/// Whether only the dummy symbol has been interned.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}


impl Default for Interner {
	fn default() -> Self {
		Self::new()
	}
}
