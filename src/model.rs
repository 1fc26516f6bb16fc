//! The fatwa record and the request bodies that create or replace one.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A ruling record as stored and served.
///
/// `id` is assigned once on creation and never changes afterwards.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Fatwa {
    /// Server-generated identifier, the table's partition key.
    pub id: String,
    /// Short title, may be empty.
    #[serde(default)]
    pub title: String,
    /// The question asked.
    #[serde(default)]
    pub question: String,
    /// The ruling given.
    #[serde(default)]
    pub answer: String,
    /// Link to the source, may be empty.
    #[serde(default)]
    pub link: String,
    /// Who gave the ruling.
    #[serde(default)]
    pub author: String,
    /// Subject area, may be empty.
    #[serde(default)]
    pub topic: String,
    /// Language code of the record.
    #[serde(default)]
    pub lang: String,
}

/// Required fields were missing or empty in a request body.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    /// Names of the offending fields, in declaration order.
    pub missing: Vec<&'static str>,
}

fn check_required(fields: [(&'static str, &str); 4]) -> Result<(), ValidationError> {
    let missing: Vec<_> = fields
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

/// JSON `null` reads as an empty string, like an absent field.
fn nullable<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a create request.
///
/// Keys are read in lower case or with a leading capital (`question` or
/// `Question`); other casings are ignored like any unknown key.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CreateFatwa {
    /// Optional title.
    #[serde(default, alias = "Title", deserialize_with = "nullable")]
    pub title: String,
    /// Required.
    #[serde(default, alias = "Question", deserialize_with = "nullable")]
    pub question: String,
    /// Required.
    #[serde(default, alias = "Answer", deserialize_with = "nullable")]
    pub answer: String,
    /// Optional link.
    #[serde(default, alias = "Link", deserialize_with = "nullable")]
    pub link: String,
    /// Required.
    #[serde(default, alias = "Author", deserialize_with = "nullable")]
    pub author: String,
    /// Optional topic.
    #[serde(default, alias = "Topic", deserialize_with = "nullable")]
    pub topic: String,
    /// Required.
    #[serde(default, alias = "Lang", deserialize_with = "nullable")]
    pub lang: String,
}

impl CreateFatwa {
    /// Check that `question`, `answer`, `author` and `lang` are non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required([
            ("question", self.question.as_str()),
            ("answer", self.answer.as_str()),
            ("author", self.author.as_str()),
            ("lang", self.lang.as_str()),
        ])
    }

    /// The record this body creates under `id`.
    pub fn into_fatwa(self, id: String) -> Fatwa {
        Fatwa {
            id,
            title: self.title,
            question: self.question,
            answer: self.answer,
            link: self.link,
            author: self.author,
            topic: self.topic,
            lang: self.lang,
        }
    }
}

/// Body of a replace request.
///
/// Every business field of the stored record is overwritten with these
/// values; nothing is merged with the previous state.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct UpdateFatwa {
    /// Optional title.
    #[serde(default, alias = "Title", deserialize_with = "nullable")]
    pub title: String,
    /// Required.
    #[serde(default, alias = "Question", deserialize_with = "nullable")]
    pub question: String,
    /// Required.
    #[serde(default, alias = "Answer", deserialize_with = "nullable")]
    pub answer: String,
    /// Optional link.
    #[serde(default, alias = "Link", deserialize_with = "nullable")]
    pub link: String,
    /// Required.
    #[serde(default, alias = "Author", deserialize_with = "nullable")]
    pub author: String,
    /// Optional topic.
    #[serde(default, alias = "Topic", deserialize_with = "nullable")]
    pub topic: String,
    /// Required.
    #[serde(default, alias = "Lang", deserialize_with = "nullable")]
    pub lang: String,
}

impl UpdateFatwa {
    /// Check that `question`, `answer`, `author` and `lang` are non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required([
            ("question", self.question.as_str()),
            ("answer", self.answer.as_str()),
            ("author", self.author.as_str()),
            ("lang", self.lang.as_str()),
        ])
    }
}
