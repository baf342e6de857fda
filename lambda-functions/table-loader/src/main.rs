use aws_lambda_events::s3::S3Event;
use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use table_loader::{handle_event, DynamoTable, LoaderConfig, S3ObjectStore, TableLoaderService};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .init();

    let config = LoaderConfig::from_env();
    let sdk_config = config.load_sdk_config().await;

    let store = S3ObjectStore::from_config(&sdk_config, &config);
    let table = DynamoTable::new(DynamoClient::new(&sdk_config), config.table_name.clone());
    info!(table = table.table_name(), region = ?config.region, "Initialized table loader");

    let service = Arc::new(TableLoaderService::new(store, table));

    let func = service_fn(move |event: LambdaEvent<S3Event>| {
        let service = service.clone();

        async move { handle_event(service.as_ref(), &event.payload).await }
    });

    run(func).await
}
