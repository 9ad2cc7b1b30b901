use std::collections::HashMap;
use std::sync::LazyLock;

/// Cyrillic to Latin rules, keyed by the lowercase source character.
///
/// Aliases produced from this table are persisted and compared verbatim by
/// other parts of the system. Editing an existing rule invalidates every
/// alias derived before the edit.
pub static TRANSLITERATION_RULES: &[(char, &str)] = &[
	('а', "a"),
	('б', "b"),
	('в', "v"),
	('г', "g"),
	('д', "d"),
	('е', "e"),
	('ё', "yo"),
	('ж', "zh"),
	('з', "z"),
	('и', "i"),
	('й', "y"),
	('к', "k"),
	('л', "l"),
	('м', "m"),
	('н', "n"),
	('о', "o"),
	('п', "p"),
	('р', "r"),
	('с', "s"),
	('т', "t"),
	('у', "u"),
	('ф', "f"),
	('х', "kh"),
	('ц', "ts"),
	('ч', "ch"),
	('ш', "sh"),
	('щ', "shch"),
	('ъ', "\""),
	('ы', "y"),
	('ь', "'"),
	('э', "e"),
	('ю', "yu"),
	('я', "ya"),
	(' ', "_"),
];

static RULE_INDEX: LazyLock<HashMap<char, &'static str>> =
	LazyLock::new(|| TRANSLITERATION_RULES.iter().copied().collect());

/// Lowercases a single character, keeping it unchanged when the lowercase
/// form is not exactly one character.
fn fold_case(c: char) -> char {
	let mut lower = c.to_lowercase();
	match (lower.next(), lower.next()) {
		(Some(l), None) => l,
		_ => c,
	}
}

/// Appends `replacement` with only its first character uppercased.
fn push_capitalized(alias: &mut String, replacement: &str) {
	let mut chars = replacement.chars();
	if let Some(first) = chars.next() {
		alias.extend(first.to_uppercase());
		alias.push_str(chars.as_str());
	}
}

/// Transliterates a display name into its ASCII alias.
///
/// Characters are looked up case-insensitively. An uppercase source character
/// capitalizes only the first letter of its replacement (`Ц` → `Ts`).
/// Characters without a rule are copied unchanged.
///
/// # Examples
/// ```
/// use name_gen_core::alias::transliterate;
///
/// assert_eq!(transliterate("Пользователь"), "Pol'zovatel'");
/// assert_eq!(transliterate("Информационная статья"), "Informatsionnaya_stat'ya");
/// ```
pub fn transliterate(input: &str) -> String {
	let mut alias = String::with_capacity(input.len());

	for c in input.chars() {
		let lower = fold_case(c);
		match RULE_INDEX.get(&lower) {
			Some(replacement) if lower != c => push_capitalized(&mut alias, replacement),
			Some(replacement) => alias.push_str(replacement),
			None => alias.push(c),
		}
	}

	alias
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_aliases() {
		assert_eq!(transliterate("Пользователь"), "Pol'zovatel'");
		assert_eq!(transliterate("Информационная статья"), "Informatsionnaya_stat'ya");
		assert_eq!(transliterate("Новость"), "Novost'");
	}

	#[test]
	fn uppercase_capitalizes_first_letter_only() {
		assert_eq!(transliterate("Цапля"), "Tsaplya");
		assert_eq!(transliterate("ЩУКА"), "ShchUKA");
		assert_eq!(transliterate("Ёж"), "Yozh");
		assert_eq!(transliterate("ЦЕНТР"), "TsENTR");
	}

	#[test]
	fn signs_have_no_case() {
		assert_eq!(transliterate("ОБЪЕМ"), "OB\"EM");
		assert_eq!(transliterate("ДЕНЬ"), "DEN'");
	}

	#[test]
	fn unmapped_characters_pass_through() {
		assert_eq!(transliterate(""), "");
		assert_eq!(transliterate("File-42.txt"), "File-42.txt");
		assert_eq!(transliterate("Тип 2"), "Tip_2");
		assert_eq!(transliterate("Straße"), "Straße");
	}

	#[test]
	fn transliteration_is_deterministic() {
		let input = "Альтаир и Вега, звёзды";
		let first = transliterate(input);
		for _ in 0..10 {
			assert_eq!(transliterate(input), first);
		}
	}

	#[test]
	fn every_rule_key_is_lowercase() {
		for (source, _) in TRANSLITERATION_RULES {
			assert_eq!(fold_case(*source), *source);
		}
	}

	#[test]
	fn rule_table_has_unique_keys() {
		assert_eq!(RULE_INDEX.len(), TRANSLITERATION_RULES.len());
	}
}
