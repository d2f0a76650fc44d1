pub type Id = super::Id;

/// Longest accepted tag name, in characters.
pub const MAX_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, serde::Serialize)]
pub struct Tag {
	pub id: Id,
	pub tag: String,
}
