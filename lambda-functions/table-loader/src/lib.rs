pub mod config;
pub mod loader;
pub mod store;
pub mod table;

pub use config::LoaderConfig;
pub use loader::{decode_key, object_locations, parse_records, record_to_item, Record, TableLoaderService};
pub use store::{ObjectLocation, ObjectStore, S3ObjectStore};
pub use table::{DynamoTable, Item, ItemWriter};

use aws_lambda_events::s3::S3Event;
use lambda_runtime::Error;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

pub const SUCCESS_BODY: &str = "Data inserted into DynamoDB";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn inserted() -> Self {
        Self {
            status_code: 200,
            body: SUCCESS_BODY.to_string(),
        }
    }
}

pub async fn handle_event<S, W>(
    service: &TableLoaderService<S, W>,
    event: &S3Event,
) -> Result<Response, Error>
where
    S: ObjectStore,
    W: ItemWriter,
{
    info!(records = event.records.len(), "Received event");

    match service.load(event).await {
        Ok(count) => {
            info!(count, "Load complete");
            Ok(Response::inserted())
        }
        Err(e) => {
            error!(error = ?e, "Load failed");
            Err(e.into())
        }
    }
}
