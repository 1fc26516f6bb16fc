use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation};
use serde::Serialize;
use serde_dynamo::{Error, Result};

/// delete item request
#[derive(Debug, PartialEq)]
struct DeleteItemInput {
    key: common::Item,
    write_operation: write::common::WriteInput,
}

/// Delete item request.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types};
/// use fatwa_api::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     key: common::key::Key::new("id", "1".to_string()),
///     write_args: write::common::WriteArgs {
///         return_values: Some(types::ReturnValue::AllOld),
///         table_name: "Fatawa".to_string(),
///         ..Default::default()
///     },
/// };
/// delete_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq)]
pub struct DeleteItem<T> {
    /// The primary key of the item to delete.
    pub key: common::key::Key<T>,
    /// Table name, condition and return values.
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<DeleteItem<T>> for DeleteItemInput {
    type Error = Error;

    fn try_from(delete_item: DeleteItem<T>) -> Result<Self> {
        let key = delete_item.key.try_into()?;
        Ok(Self {
            key,
            write_operation: delete_item.write_args.into(),
        })
    }
}

impl<T: Serialize> DeleteItem<T> {
    /// Execute the delete item request.
    #[tracing::instrument(name = "dynamodb.delete_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        let delete_item: DeleteItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.delete_item().set_key(Some(delete_item.key));
        crate::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await
    }
}
