use anyhow::{bail, ensure, Context, Result};
use aws_lambda_events::s3::S3Event;
use serde_dynamo::to_item;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::store::{ObjectLocation, ObjectStore};
use crate::table::{Item, ItemWriter};

pub type Record = Map<String, Value>;

/// Notification keys arrive form-encoded: spaces as `+`, everything else as `%XX`.
pub fn decode_key(raw: &str) -> Result<String> {
    let plus_decoded = raw.replace('+', " ");
    let decoded = urlencoding::decode(&plus_decoded)
        .with_context(|| format!("object key {} is not valid UTF-8 once decoded", raw))?;
    Ok(decoded.into_owned())
}

/// Pulls the bucket/key pairs out of a storage notification.
pub fn object_locations(event: &S3Event) -> Result<Vec<ObjectLocation>> {
    ensure!(!event.records.is_empty(), "event contained no records");

    event
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| -> Result<ObjectLocation> {
            let bucket = record
                .s3
                .bucket
                .name
                .as_deref()
                .with_context(|| format!("record {} has no bucket name", i))?;
            let key = record
                .s3
                .object
                .key
                .as_deref()
                .with_context(|| format!("record {} has no object key", i))?;
            Ok(ObjectLocation::new(bucket, decode_key(key)?))
        })
        .collect()
}

/// Parses an object body as a JSON array of flat records.
pub fn parse_records(content: &[u8]) -> Result<Vec<Record>> {
    let document: Value = serde_json::from_slice(content).context("object is not valid JSON")?;

    let Value::Array(elements) = document else {
        bail!("expected a JSON array of records");
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| -> Result<Record> {
            match element {
                Value::Object(record) => Ok(record),
                other => bail!("element {} is not a record: {}", i, other),
            }
        })
        .collect()
}

pub fn record_to_item(record: Record) -> Result<Item> {
    Ok(to_item(record)?)
}

/// Copies JSON records from stored objects into a table.
pub struct TableLoaderService<S, W> {
    store: S,
    writer: W,
}

impl<S: ObjectStore, W: ItemWriter> TableLoaderService<S, W> {
    pub fn new(store: S, writer: W) -> Self {
        Self { store, writer }
    }

    /// Fetches one object and writes every record it holds. The document is
    /// parsed in full before the first write, so a malformed object writes nothing.
    pub async fn load_object(&self, location: &ObjectLocation) -> Result<usize> {
        let content = self.store.get_object(location).await?;
        let records = parse_records(&content)
            .with_context(|| format!("failed to parse records from {}", location))?;

        let items = records
            .into_iter()
            .map(record_to_item)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("failed to convert records from {}", location))?;

        let count = items.len();
        for item in items {
            debug!(attributes = item.len(), "Inserting record");
            self.writer.put_item(item).await?;
        }

        info!(bucket = %location.bucket, key = %location.key, count, "Inserted records");
        Ok(count)
    }

    /// Loads every object named by the notification, in order. Returns the
    /// total number of records written.
    pub async fn load(&self, event: &S3Event) -> Result<usize> {
        let locations = object_locations(event)?;

        let mut total = 0;
        for location in &locations {
            total += self.load_object(location).await?;
        }

        Ok(total)
    }
}
