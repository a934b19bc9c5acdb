use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// The managed resource. `id` is assigned by storage on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Request body for create/update. Any `id` in the body is ignored.
///
/// Fields are optional so that an absent key and an explicit `null` both read as "not set".
/// Only a JSON object decodes; arrays and scalars are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ArticleInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

// serde's derived struct visitor would also take a positional array.
#[derive(Deserialize)]
struct ArticleInputFields {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl TryFrom<Map<String, Value>> for ArticleInput {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let ArticleInputFields { title, content } =
            ArticleInputFields::deserialize(Value::Object(object))?;
        Ok(Self { title, content })
    }
}

/// Title and content as written to storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
}

impl NewArticle {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn with_id(self, id: i64) -> Article {
        Article {
            id,
            title: self.title,
            content: self.content,
        }
    }
}

/// Lenient conversion used by update: unset fields become empty strings.
impl From<ArticleInput> for NewArticle {
    fn from(input: ArticleInput) -> Self {
        Self {
            title: input.title.unwrap_or_default(),
            content: input.content.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_ignores_id_and_tolerates_null() {
        let input: ArticleInput =
            serde_json::from_str(r#"{"id":42,"title":null,"content":"World"}"#)
                .expect("parse input");
        assert_eq!(input.title, None);
        assert_eq!(input.content.as_deref(), Some("World"));

        let article = NewArticle::from(input).with_id(7);
        assert_eq!(
            serde_json::to_string(&article).expect("serialize"),
            r#"{"id":7,"title":"","content":"World"}"#
        );
    }

    #[test]
    fn input_rejects_wrong_field_types() {
        assert!(serde_json::from_str::<ArticleInput>(r#"{"title":5}"#).is_err());
        assert!(serde_json::from_str::<ArticleInput>("[]").is_err());
        assert!(serde_json::from_str::<ArticleInput>(r#"["Hello","World"]"#).is_err());
        assert!(serde_json::from_str::<ArticleInput>(r#""Hello""#).is_err());
    }
}
