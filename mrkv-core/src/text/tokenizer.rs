use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;

/// One alternative per category, in classification priority order.
///
/// Letters are `\p{L}`, digits `\p{Nd}`, punctuation `\p{P}`. The general
/// categories are disjoint, so a leftmost match is always the maximal run
/// of the category of its first character.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(\p{L}+)|(\p{Nd}+)|(\p{P}+)").expect("token pattern is valid")
});

/// Character class a token is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
	Letter,
	Digit,
	Punctuation,
}

impl Category {
	/// Classifies `c`, or returns `None` for a separator.
	pub fn of(c: char) -> Option<Self> {
		let mut buf = [0; 4];
		let caps = TOKEN_PATTERN.captures(c.encode_utf8(&mut buf))?;
		if caps.get(1).is_some() {
			Some(Self::Letter)
		} else if caps.get(2).is_some() {
			Some(Self::Digit)
		} else {
			Some(Self::Punctuation)
		}
	}

	/// Letters and digits.
	pub fn is_alphanumeric(c: char) -> bool {
		matches!(Self::of(c), Some(Self::Letter | Self::Digit))
	}
}

/// Lazy token stream over a buffered reader.
///
/// The reader is consumed one line at a time; line breaks are separators,
/// so no token spans two lines. Invalid UTF-8 is replaced with U+FFFD,
/// which is a separator too.
///
/// A read error ends the stream: tokenizing never fails.
pub struct Tokens<R> {
	reader: R,
	line: String,
	pos: usize,
	done: bool,
}

impl<R: BufRead> Tokens<R> {
	pub fn new(reader: R) -> Self {
		Self { reader, line: String::new(), pos: 0, done: false }
	}

	/// Loads the next line. Returns `false` at end of stream.
	fn refill(&mut self) -> bool {
		let mut bytes = Vec::new();
		match self.reader.read_until(b'\n', &mut bytes) {
			Ok(0) => false,
			Ok(_) => {
				self.line = String::from_utf8_lossy(&bytes).into_owned();
				self.pos = 0;
				true
			}
			Err(err) => {
				tracing::warn!("Token stream ended on read error: {err}");
				false
			}
		}
	}
}

impl<R: BufRead> Iterator for Tokens<R> {
	type Item = String;

	fn next(&mut self) -> Option<String> {
		while !self.done {
			if let Some(m) = TOKEN_PATTERN.find_at(&self.line, self.pos) {
				self.pos = m.end();
				return Some(m.as_str().to_owned());
			}
			if !self.refill() {
				self.done = true;
				self.line.clear();
			}
		}
		None
	}
}

/// Tokenizes any buffered reader.
pub fn tokenize<R: BufRead>(reader: R) -> Tokens<R> {
	Tokens::new(reader)
}

/// Tokenizes an in-memory string.
pub fn tokenize_str(text: &str) -> Tokens<&[u8]> {
	Tokens::new(text.as_bytes())
}
