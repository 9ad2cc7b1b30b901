/// Cyrillic vowels (lowercase) that carry a syllable.
pub const VOWELS: &[char] = &['а', 'е', 'ё', 'и', 'о', 'у', 'ы', 'э', 'ю', 'я'];

/// Returns `true` if `c` is a vowel, in either case.
pub fn is_vowel(c: char) -> bool {
	c.to_lowercase().any(|lower| VOWELS.contains(&lower))
}

fn is_consonant(c: char) -> bool {
	c.is_alphabetic() && !is_vowel(c)
}

/// Whether a syllable ends right after `chars[i]`.
///
/// A boundary follows a vowel when the next character is a vowel too
/// (`а|и`), or when exactly one consonant separates it from the next vowel
/// (`а|ма`). Longer consonant clusters stay with the current syllable.
fn ends_syllable(chars: &[char], i: usize) -> bool {
	if !is_vowel(chars[i]) {
		return false;
	}
	match (chars.get(i + 1), chars.get(i + 2)) {
		(Some(&next), _) if is_vowel(next) => true,
		(Some(&next), Some(&after)) => is_consonant(next) && is_vowel(after),
		_ => false,
	}
}

/// Splits a word into syllables on vowel boundaries.
///
/// The split is lossless: joining the result gives back `word`. A word with
/// no vowel is a single syllable and the empty word has none.
///
/// # Examples
/// ```
/// use name_gen_core::model::syllable::split_syllables;
///
/// assert_eq!(split_syllables("Альтаир"), vec!["Альта", "ир"]);
/// ```
pub fn split_syllables(word: &str) -> Vec<String> {
	let chars: Vec<char> = word.chars().collect();
	let mut syllables = Vec::new();
	let mut syllable = String::new();

	for (i, c) in chars.iter().enumerate() {
		syllable.push(*c);
		if ends_syllable(&chars, i) {
			syllables.push(std::mem::take(&mut syllable));
		}
	}
	// The tail after the last boundary belongs to the final syllable.
	if !syllable.is_empty() {
		syllables.push(syllable);
	}

	syllables
}

/// Last syllable of `word`, or an empty string for an empty word.
pub fn last_syllable(word: &str) -> String {
	split_syllables(word).pop().unwrap_or_default()
}

/// Everything before the last syllable of `word`.
///
/// Used to turn an existing name into a leading fragment. A word made of a
/// single syllable is returned whole.
pub fn leading_fragment(word: &str) -> String {
	let mut syllables = split_syllables(word);
	if syllables.len() > 1 {
		syllables.pop();
	}
	syllables.concat()
}
