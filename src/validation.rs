//! Required-field checks for article creation.
//!
//! Constraints are a static table of `(field, accessor)` pairs; every entry is checked so a
//! client sees all missing fields at once, in table order.

use serde::{Deserialize, Serialize};

use crate::model::{ArticleInput, NewArticle};

/// One field-level failure, serialized as `{"key": .., "error": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub key: String,
    pub error: String,
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        Self {
            key: field.to_string(),
            error: format!("Field validation for '{field}' failed on the 'required' tag"),
        }
    }
}

type Accessor = fn(&ArticleInput) -> Option<&str>;

fn title(input: &ArticleInput) -> Option<&str> {
    input.title.as_deref()
}

fn content(input: &ArticleInput) -> Option<&str> {
    input.content.as_deref()
}

const REQUIRED_FIELDS: &[(&str, Accessor)] = &[("title", title), ("content", content)];

/// Returns the storable article, or every missing required field.
pub fn validate(input: ArticleInput) -> Result<NewArticle, Vec<ValidationError>> {
    let errors: Vec<ValidationError> = REQUIRED_FIELDS
        .iter()
        .filter(|(_, get)| get(&input).is_none_or(str::is_empty))
        .map(|(field, _)| ValidationError::required(field))
        .collect();

    if errors.is_empty() {
        Ok(NewArticle::from(input))
    } else {
        Err(errors)
    }
}
