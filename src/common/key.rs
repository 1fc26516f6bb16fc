use crate::common::Item;

use serde::Serialize;
use serde_dynamo::{Error, Result, to_attribute_value};

/// Partition key of an item.
///
/// ```rust
/// use fatwa_api::common::key;
///
/// let key = key::Key {
///     name: "id".to_string(),
///     value: "1".to_string(),
/// };
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Key<T> {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: T,
}

impl<T> Key<T> {
    /// Key on the given attribute.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl<T: Serialize> TryFrom<Key<T>> for Item {
    type Error = Error;

    fn try_from(key: Key<T>) -> Result<Self> {
        let value = to_attribute_value(key.value)?;
        Ok(Self::from([(key.name, value)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;

    #[rstest]
    #[case::string(
        Key::new("id", "b".to_string()),
        Item::from([(
            "id".to_string(),
            types::AttributeValue::S("b".to_string()),
        )])
    )]
    #[case::uuid_like(
        Key::new("id", "2f1c5a0e-7d41-4c9b-9a57-5c2d9b0d1e11".to_string()),
        Item::from([(
            "id".to_string(),
            types::AttributeValue::S("2f1c5a0e-7d41-4c9b-9a57-5c2d9b0d1e11".to_string()),
        )])
    )]
    fn test_key_to_item(#[case] key: Key<String>, #[case] expected: Item) {
        let actual: Item = key.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
