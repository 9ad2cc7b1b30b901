use serde::{Deserialize, Serialize};

use super::transliterate;

/// Kind of record a file can be attached to.
///
/// Dispatch happens on this tag. The transliterated alias is only a label
/// and can follow display name edits without breaking lookups; `from_alias`
/// exists to read values that were stored as aliases.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentTarget {
	User,
	InformationArticle,
	News,
}

impl AttachmentTarget {
	/// Every target, in declaration order.
	pub const ALL: [AttachmentTarget; 3] = [
		AttachmentTarget::User,
		AttachmentTarget::InformationArticle,
		AttachmentTarget::News,
	];

	/// Human-facing name of the target.
	pub fn display_name(self) -> &'static str {
		match self {
			Self::User => "Пользователь",
			Self::InformationArticle => "Информационная статья",
			Self::News => "Новость",
		}
	}

	/// Stable tag stored alongside records.
	pub fn tag(self) -> &'static str {
		match self {
			Self::User => "user",
			Self::InformationArticle => "information_article",
			Self::News => "news",
		}
	}

	/// Latin alias of the display name, used as a label.
	///
	/// Not stable across display name changes, persist `tag` instead.
	pub fn alias(self) -> String {
		transliterate(self.display_name())
	}

	/// Resolves a stored tag, `None` if unknown.
	pub fn from_tag(tag: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|target| target.tag() == tag)
	}

	/// Resolves a persisted alias back to its target (exact match).
	pub fn from_alias(alias: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|target| target.alias() == alias)
	}
}
