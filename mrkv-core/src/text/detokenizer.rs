use super::tokenizer::Category;

/// Punctuation that is always followed by a space.
const SPACED_PUNCTUATION: [char; 6] = ['.', ',', '?', '!', ';', ':'];

/// Joins tokens into a single string with natural spacing.
///
/// A single space goes between two tokens when either:
/// - the left token ends with one of `. , ? ! ; :`
/// - the left token ends and the right token starts with a letter or digit
///
/// Every other adjacency is glued, so `hole` + `.` gives `hole.` and
/// `don` + `'` + `t` gives `don't`.
pub fn join<S: AsRef<str>>(tokens: &[S]) -> String {
	let mut text = String::new();

	for (i, token) in tokens.iter().enumerate() {
		let token = token.as_ref();
		text.push_str(token);

		if let Some(next) = tokens.get(i + 1) {
			if needs_space(token, next.as_ref()) {
				text.push(' ');
			}
		}
	}

	text
}

fn needs_space(left: &str, right: &str) -> bool {
	let Some(last) = left.chars().next_back() else {
		return false;
	};
	if SPACED_PUNCTUATION.contains(&last) {
		return true;
	}
	match right.chars().next() {
		Some(first) => Category::is_alphanumeric(last) && Category::is_alphanumeric(first),
		None => false,
	}
}
