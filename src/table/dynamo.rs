use crate::{
    common::{Item, condition::ConditionMap, key::Key},
    error::{Result, StoreError},
    read, table, write,
};

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types};

/// Table stored in DynamoDB.
///
/// The client is cheap to clone and safe to share between concurrent
/// invocations; build it once per process and hand it in.
#[derive(Clone, Debug)]
pub struct DynamoTable {
    client: Client,
    scan_limit: Option<i32>,
    table_name: String,
}

impl DynamoTable {
    /// Table `table_name` reached through `client`.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            scan_limit: None,
            table_name: table_name.into(),
        }
    }

    /// Cap the number of items DynamoDB evaluates per scan page.
    pub fn with_scan_limit(mut self, scan_limit: Option<i32>) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    /// Name of the underlying table.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn read_args(&self) -> read::common::ReadArgs {
        read::common::ReadArgs {
            table_name: self.table_name.clone(),
            ..Default::default()
        }
    }

    fn write_args(
        &self,
        condition: Option<ConditionMap>,
        return_values: types::ReturnValue,
    ) -> write::common::WriteArgs {
        write::common::WriteArgs {
            condition,
            return_values: Some(return_values),
            table_name: self.table_name.clone(),
        }
    }
}

fn non_empty(item: Option<Item>) -> Option<Item> {
    item.filter(|item| !item.is_empty())
}

#[async_trait]
impl table::Table for DynamoTable {
    async fn get_item(&self, key: Key<String>) -> Result<Option<Item>> {
        // strongly consistent so a record is readable right after it is written
        let output = read::get_item::GetItem {
            key,
            read_args: read::common::ReadArgs {
                consistent_read: Some(true),
                ..self.read_args()
            },
        }
        .send(&self.client)
        .await
        .map_err(|err| StoreError::request("GetItem", err))?;
        Ok(non_empty(output.item))
    }

    async fn scan_page(&self, exclusive_start_key: Option<Item>) -> Result<table::Page> {
        let output = read::scan::Scan {
            exclusive_start_key,
            limit: self.scan_limit,
            read_args: self.read_args(),
        }
        .send(&self.client)
        .await
        .map_err(|err| StoreError::request("Scan", err))?;
        let last_evaluated_key = read::scan::continuation(&output);
        tracing::debug!(
            count = output.count,
            scanned = output.scanned_count,
            more = last_evaluated_key.is_some(),
            "scanned page"
        );
        Ok(table::Page {
            items: output.items.unwrap_or_default(),
            last_evaluated_key,
        })
    }

    async fn put_item(&self, item: Item) -> Result<()> {
        write::put_item::PutItem {
            item,
            write_args: self.write_args(None, types::ReturnValue::None),
        }
        .send(&self.client)
        .await
        .map_err(|err| StoreError::request("PutItem", err))?;
        Ok(())
    }

    async fn update_item(
        &self,
        key: Key<String>,
        assignments: Item,
    ) -> Result<table::Conditional<Item>> {
        let condition = ConditionMap::exists(key.name.clone());
        let result = write::update_item::UpdateItem {
            key,
            assignments: assignments.into(),
            write_args: self.write_args(Some(condition), types::ReturnValue::AllNew),
        }
        .send(&self.client)
        .await;
        match result {
            Ok(output) => Ok(match non_empty(output.attributes) {
                Some(item) => table::Conditional::Applied(item),
                None => table::Conditional::ConditionFailed,
            }),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|err| err.is_conditional_check_failed_exception()) =>
            {
                Ok(table::Conditional::ConditionFailed)
            }
            Err(err) => Err(StoreError::request("UpdateItem", err)),
        }
    }

    async fn delete_item(&self, key: Key<String>) -> Result<Option<Item>> {
        let output = write::delete_item::DeleteItem {
            key,
            write_args: self.write_args(None, types::ReturnValue::AllOld),
        }
        .send(&self.client)
        .await
        .map_err(|err| StoreError::request("DeleteItem", err))?;
        Ok(non_empty(output.attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::table::Table;

    use aws_sdk_dynamodb::{operation, types::error as type_error};
    use aws_smithy_mocks::{mock, mock_client};
    use rstest::rstest;

    fn client() -> Client {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
            .build();
        Client::from_conf(config)
    }

    fn key() -> Key<String> {
        Key::new("id", "a".to_string())
    }

    fn stored() -> Item {
        Item::from([
            ("id".to_string(), types::AttributeValue::S("a".to_string())),
            ("question".to_string(), types::AttributeValue::S("q".to_string())),
        ])
    }

    fn assignments() -> Item {
        Item::from([("question".to_string(), types::AttributeValue::S("q".to_string()))])
    }

    #[test]
    fn test_write_args_target_configured_table() {
        let table = DynamoTable::new(client(), "Fatawa");
        let args = table.write_args(
            Some(ConditionMap::exists("id")),
            types::ReturnValue::AllNew,
        );
        assert_eq!(args.table_name, "Fatawa");
        assert_eq!(args.return_values, Some(types::ReturnValue::AllNew));
        assert_eq!(args.condition, Some(ConditionMap::exists("id")));
    }

    #[rstest]
    #[case::missing(None, None)]
    #[case::empty(Some(Item::new()), None)]
    #[case::present(
        Some(Item::from([("id".to_string(), types::AttributeValue::S("a".to_string()))])),
        Some(Item::from([("id".to_string(), types::AttributeValue::S("a".to_string()))]))
    )]
    fn test_non_empty(#[case] item: Option<Item>, #[case] expected: Option<Item>) {
        assert_eq!(non_empty(item), expected);
    }

    #[tokio::test]
    async fn test_get_item_reads_consistently() {
        let rule = mock!(Client::get_item)
            .match_requests(|request| {
                request.table_name() == Some("Fatawa") && request.consistent_read() == Some(true)
            })
            .then_output(|| {
                operation::get_item::GetItemOutput::builder()
                    .set_item(Some(stored()))
                    .build()
            });
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "Fatawa");
        let item = table.get_item(key()).await.unwrap();
        assert_eq!(item, Some(stored()));
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_get_item_without_item_is_absent() {
        let rule = mock!(Client::get_item)
            .then_output(|| operation::get_item::GetItemOutput::builder().build());
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "Fatawa");
        assert_eq!(table.get_item(key()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_item_applied() {
        let rule = mock!(Client::update_item)
            .match_requests(|request| {
                request.condition_expression() == Some("attribute_exists(#id)")
                    && request.return_values() == Some(&types::ReturnValue::AllNew)
            })
            .then_output(|| {
                operation::update_item::UpdateItemOutput::builder()
                    .set_attributes(Some(stored()))
                    .build()
            });
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "Fatawa");
        let outcome = table.update_item(key(), assignments()).await.unwrap();
        assert_eq!(outcome, table::Conditional::Applied(stored()));
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_update_item_failed_condition_is_absent() {
        let rule = mock!(Client::update_item).then_error(|| {
            operation::update_item::UpdateItemError::ConditionalCheckFailedException(
                type_error::ConditionalCheckFailedException::builder()
                    .message("The conditional request failed")
                    .build(),
            )
        });
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "Fatawa");
        let outcome = table.update_item(key(), assignments()).await.unwrap();
        assert_eq!(outcome, table::Conditional::ConditionFailed);
    }

    #[tokio::test]
    async fn test_update_item_without_attributes_is_absent() {
        let rule = mock!(Client::update_item)
            .then_output(|| operation::update_item::UpdateItemOutput::builder().build());
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "Fatawa");
        let outcome = table.update_item(key(), assignments()).await.unwrap();
        assert_eq!(outcome, table::Conditional::ConditionFailed);
    }

    #[tokio::test]
    async fn test_update_item_other_errors_are_reported() {
        let rule = mock!(Client::update_item).then_error(|| {
            operation::update_item::UpdateItemError::ResourceNotFoundException(
                type_error::ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "Fatawa");
        let err = table.update_item(key(), assignments()).await.unwrap_err();
        assert!(
            matches!(err, StoreError::Request { operation: "UpdateItem", .. }),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn test_delete_item_returns_old_item() {
        let rule = mock!(Client::delete_item)
            .match_requests(|request| request.return_values() == Some(&types::ReturnValue::AllOld))
            .then_output(|| {
                operation::delete_item::DeleteItemOutput::builder()
                    .set_attributes(Some(stored()))
                    .build()
            });
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "Fatawa");
        assert_eq!(table.delete_item(key()).await.unwrap(), Some(stored()));
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_delete_item_without_attributes_is_absent() {
        let rule = mock!(Client::delete_item)
            .then_output(|| operation::delete_item::DeleteItemOutput::builder().build());
        let table = DynamoTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "Fatawa");
        assert_eq!(table.delete_item(key()).await.unwrap(), None);
    }
}
