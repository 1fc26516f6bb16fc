use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::{Error, Result};
use std::collections;

/// Attribute assignments rendered as one `SET` clause.
///
/// Every listed attribute is overwritten with its new value; attributes not
/// listed are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetAssignments(pub Vec<(String, types::AttributeValue)>);

impl From<SetAssignments> for common::ExpressionInput {
    fn from(assignments: SetAssignments) -> Self {
        let operations = assignments
            .0
            .into_iter()
            .enumerate()
            .map(|(index, (name, value))| {
                let placeholder = common::name_placeholder(&name);
                let value_placeholder = format!(":set{index}");
                Self {
                    expression: format!("{placeholder} = {value_placeholder}"),
                    expression_attribute_names: collections::HashMap::from([(placeholder, name)]),
                    expression_attribute_values: common::Item::from([(value_placeholder, value)]),
                }
            })
            .collect();
        let mut operation = Self::merge(", ", operations);
        if !operation.expression.is_empty() {
            operation.expression = format!("SET {}", operation.expression);
        }
        operation
    }
}

impl From<common::Item> for SetAssignments {
    fn from(item: common::Item) -> Self {
        let mut assignments: Vec<_> = item.into_iter().collect();
        // stable placeholder numbering regardless of map iteration order
        assignments.sort_by(|(left, _), (right, _)| left.cmp(right));
        Self(assignments)
    }
}

/// update item request
#[derive(Clone, Debug, Default, PartialEq)]
struct UpdateItemInput {
    key: common::Item,
    update_expression: String,
    write_operation: write::common::WriteInput,
}

/// Update item request.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::{Client, types};
/// use fatwa_api::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     key: common::key::Key::new("id", "1".to_string()),
///     assignments: write::update_item::SetAssignments(vec![(
///         "title".to_string(),
///         types::AttributeValue::S("New".to_string()),
///     )]),
///     write_args: write::common::WriteArgs {
///         condition: Some(common::condition::ConditionMap::exists("id")),
///         return_values: Some(types::ReturnValue::AllNew),
///         table_name: "Fatawa".to_string(),
///     },
/// };
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem<T> {
    /// The primary key of the item to update.
    pub key: common::key::Key<T>,
    /// The attributes to overwrite.
    pub assignments: SetAssignments,
    /// Table name, condition and return values.
    pub write_args: write::common::WriteArgs,
}

impl<T: Serialize> TryFrom<UpdateItem<T>> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem<T>) -> Result<Self> {
        let key = update_item.key.try_into()?;
        let mut write_operation: write::common::WriteInput = update_item.write_args.into();
        let update_expression = write_operation.merge_expression(update_item.assignments.into());
        Ok(Self {
            key,
            update_expression,
            write_operation,
        })
    }
}

impl<T: Serialize> UpdateItem<T> {
    /// Execute the update item request.
    #[tracing::instrument(name = "dynamodb.update_item", skip_all, err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.key))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}
