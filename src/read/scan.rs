use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation};

/// Scan request for a single page.
///
/// DynamoDB stops a scan after `limit` items or 1 MB of data, whichever comes
/// first, and hands back a `LastEvaluatedKey` to resume from.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use fatwa_api::read;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan = read::scan::Scan {
///     read_args: read::common::ReadArgs {
///         table_name: "Fatawa".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// let page = scan.send(client).await?;
/// let next = read::scan::continuation(&page);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Key to resume from, taken from the previous page.
    pub exclusive_start_key: Option<common::Item>,
    /// The maximum number of items to evaluate for this page.
    pub limit: Option<i32>,
    /// Table name and consistency.
    pub read_args: read::common::ReadArgs,
}

impl Scan {
    /// Execute the scan request, fetching exactly one page.
    #[tracing::instrument(name = "dynamodb.scan", skip_all, fields(resumed = self.exclusive_start_key.is_some()), err)]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let builder = client
            .scan()
            .set_exclusive_start_key(self.exclusive_start_key)
            .set_limit(self.limit);
        crate::apply_read_operation!(builder, self.read_args)
            .send()
            .await
    }
}

/// Continuation token of a scan page, `None` once the table is exhausted.
pub fn continuation(output: &operation::scan::ScanOutput) -> Option<common::Item> {
    output
        .last_evaluated_key
        .as_ref()
        .filter(|key| !key.is_empty())
        .cloned()
}
