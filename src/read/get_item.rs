use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result};

/// get item request
#[derive(Clone, Debug, Default, PartialEq)]
struct GetItemInput {
    key: common::Item,
    read_args: read::common::ReadArgs,
}

/// Get item request.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use fatwa_api::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let get_item = read::get_item::GetItem {
///     key: common::key::Key::new("id", "1".to_string()),
///     read_args: read::common::ReadArgs {
///         table_name: "Fatawa".to_string(),
///         ..Default::default()
///     },
/// };
/// get_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GetItem<T> {
    /// The primary key of the item to retrieve.
    pub key: common::key::Key<T>,
    /// Table name and consistency.
    pub read_args: read::common::ReadArgs,
}

impl<T: Serialize> TryFrom<GetItem<T>> for GetItemInput {
    type Error = Error;

    fn try_from(get_item: GetItem<T>) -> Result<Self> {
        let key = get_item.key.try_into()?;
        Ok(Self {
            key,
            read_args: get_item.read_args,
        })
    }
}

impl<T: Serialize> GetItem<T> {
    /// Execute the get item request.
    #[tracing::instrument(name = "dynamodb.get_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::get_item::GetItemOutput,
        error::SdkError<operation::get_item::GetItemError>,
    > {
        let get_item: GetItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.get_item().set_key(Some(get_item.key));
        crate::apply_read_operation!(builder, get_item.read_args)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;

    #[rstest]
    #[case::default_read(
        GetItem {
            key: common::key::Key::new("id", "a".to_string()),
            read_args: read::common::ReadArgs {
                table_name: "b".to_string(),
                ..Default::default()
            },
        },
        GetItemInput {
            key: common::Item::from([(
                "id".to_string(),
                types::AttributeValue::S("a".to_string()),
            )]),
            read_args: read::common::ReadArgs {
                table_name: "b".to_string(),
                ..Default::default()
            },
        }
    )]
    #[case::consistent_read(
        GetItem {
            key: common::key::Key::new("id", "c".to_string()),
            read_args: read::common::ReadArgs {
                consistent_read: Some(true),
                table_name: "d".to_string(),
            },
        },
        GetItemInput {
            key: common::Item::from([(
                "id".to_string(),
                types::AttributeValue::S("c".to_string()),
            )]),
            read_args: read::common::ReadArgs {
                consistent_read: Some(true),
                table_name: "d".to_string(),
            },
        }
    )]
    fn test_get_item(#[case] args: GetItem<String>, #[case] expected: GetItemInput) {
        let actual: GetItemInput = args.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}
