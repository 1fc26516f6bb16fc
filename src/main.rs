use fatwa_api::{
    config::Config, logging, repository::FatwaRepository, router, table::dynamo::DynamoTable,
};
use lambda_http::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    let config = Config::from_env()?;
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&sdk_config);
    let table = DynamoTable::new(client, &config.table_name).with_scan_limit(config.scan_page_limit);
    tracing::info!(table = table.table_name(), "starting handler");
    let repository = FatwaRepository::new(table);

    run(service_fn(|request| router::handle(&repository, request))).await
}
