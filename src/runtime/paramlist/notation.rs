//! A reader for the textual notation of spec blocks.
//!
//! This is not a general scanner. It reads words, refinements (`/name`), set-words
//! (`name:`), datatype and typeset names (`name!`), nested blocks, texts, integers and the
//! `none`, `true` and `false` literals, which is all a spec or an argument list needs.

use std::{
	iter::Peekable,
	str::CharIndices,
};

use crate::{
	runtime::{
		error::Error,
		value::{Block, Registry, Value},
	},
	symbol::Interner,
};


/// Read a sequence of values.
pub fn read(text: &str, interner: &mut Interner, types: &Registry) -> Result<Vec<Value>, Error> {
	let mut reader = Reader {
		text,
		chars: text.char_indices().peekable(),
		interner,
		types,
	};

	// The blocks being read, along with the offset of their opening bracket.
	let mut stack: Vec<(usize, Vec<Value>)> = vec![(0, Vec::new())];

	while let Some(&(offset, c)) = reader.chars.peek() {
		match c {
			c if c.is_whitespace() => {
				reader.chars.next();
			}

			'[' => {
				reader.chars.next();
				stack.push((offset, Vec::new()));
			}

			']' => {
				reader.chars.next();

				if stack.len() == 1 {
					return Err(Error::notation(offset, "unbalanced ]"));
				}

				let (_, values) = stack.pop().expect("empty block stack");
				let parent = &mut stack.last_mut().expect("empty block stack").1;
				parent.push(Block::new(values).into());
			}

			'"' => {
				let value = reader.text_literal(offset)?;
				stack.last_mut().expect("empty block stack").1.push(value);
			}

			_ => {
				let value = reader.word(offset)?;
				stack.last_mut().expect("empty block stack").1.push(value);
			}
		}
	}

	if stack.len() > 1 {
		let (offset, _) = stack.pop().expect("empty block stack");
		return Err(Error::notation(offset, "unterminated block"));
	}

	Ok(stack.pop().map(|(_, values)| values).unwrap_or_default())
}


struct Reader<'a, 'i> {
	text: &'a str,
	chars: Peekable<CharIndices<'a>>,
	interner: &'i mut Interner,
	types: &'i Registry,
}


impl<'a, 'i> Reader<'a, 'i> {
	/// Read a double quoted text. The opening quote is at `start`.
	fn text_literal(&mut self, start: usize) -> Result<Value, Error> {
		self.chars.next();

		let mut text = String::new();

		loop {
			match self.chars.next() {
				Some((_, '"')) => return Ok(text.as_str().into()),

				Some((offset, '\\')) => match self.chars.next() {
					Some((_, '"')) => text.push('"'),
					Some((_, '\\')) => text.push('\\'),
					Some((_, 'n')) => text.push('\n'),
					Some((_, 't')) => text.push('\t'),
					Some(_) => return Err(Error::notation(offset, "invalid escape sequence")),
					None => return Err(Error::notation(start, "unterminated text")),
				},

				Some((_, c)) => text.push(c),

				None => return Err(Error::notation(start, "unterminated text")),
			}
		}
	}


	/// Read a word-like token starting at `start`.
	fn word(&mut self, start: usize) -> Result<Value, Error> {
		let mut end = self.text.len();

		while let Some(&(offset, c)) = self.chars.peek() {
			if c.is_whitespace() || c == '[' || c == ']' || c == '"' {
				end = offset;
				break;
			}

			self.chars.next();
		}

		let text = self.text;
		let token = &text[start .. end];

		if let Some(name) = token.strip_prefix('/') {
			return valid_name(name, start)
				.map(|name| Value::Refinement(self.interner.get_or_intern(name)));
		}

		if let Some(name) = token.strip_suffix(':') {
			return valid_name(name, start)
				.map(|name| Value::SetWord(self.interner.get_or_intern(name)));
		}

		if token.ends_with('!') {
			return self.types
				.lookup(token.as_bytes(), self.interner)
				.ok_or_else(|| Error::notation(start, "unknown datatype"));
		}

		if let Ok(int) = token.parse::<i64>() {
			return Ok(Value::Integer(int));
		}

		match token {
			"none" => Ok(Value::None),
			"true" => Ok(Value::Logic(true)),
			"false" => Ok(Value::Logic(false)),
			name => valid_name(name, start)
				.map(|name| Value::Word(self.interner.get_or_intern(name))),
		}
	}
}


/// Validate the name part of a word-like token.
fn valid_name(name: &str, start: usize) -> Result<&str, Error> {
	let valid = !name.is_empty()
		&& !name.starts_with(|c: char| c.is_ascii_digit())
		&& !name.contains(|c: char| c == '/' || c == ':' || c == '!');

	if valid {
		Ok(name)
	} else {
		Err(Error::notation(start, "invalid word"))
	}
}
