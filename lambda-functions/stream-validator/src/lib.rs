pub mod event;

pub use event::{scalar_text, DisplayImage, Image, StreamChange, StreamEvent, StreamRecord};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

/// Attribute every entry must carry for the batch to be accepted.
pub const REQUIRED_FIELD: &str = "value";

/// Attribute used to identify entries in logs and errors.
pub const ID_FIELD: &str = "id";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// An entry's image has no `value` attribute. Fails the entire batch.
    #[error("Malformed record detected at position {index} (id: {}): {new_image}", .id.as_deref().unwrap_or("unknown"))]
    MalformedEntry {
        index: usize,
        id: Option<String>,
        new_image: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedEntry {
    pub index: usize,
    pub id: Option<String>,
}

/// Acknowledgment that every entry of a batch passed validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ack {
    pub accepted: Vec<AcceptedEntry>,
}

impl Ack {
    pub fn ids(&self) -> Vec<Option<&str>> {
        self.accepted.iter().map(|entry| entry.id.as_deref()).collect()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl From<Ack> for Response {
    fn from(_: Ack) -> Self {
        Self { status_code: 200 }
    }
}

fn entry_id(image: &Image) -> Option<String> {
    image
        .get(ID_FIELD)
        .and_then(scalar_text)
        .map(str::to_string)
}

/// Checks every entry of the batch in order. The first entry without a
/// `value` attribute stops processing and fails the whole batch; nothing
/// after it is looked at.
pub fn validate(batch: &StreamEvent) -> Result<Ack, ValidationError> {
    let mut ack = Ack::default();

    for (index, record) in batch.records.iter().enumerate() {
        let new_image = &record.dynamodb.new_image;
        let id = entry_id(new_image);

        debug!(
            index,
            event_id = record.event_id.as_deref(),
            event_name = record.event_name.as_deref(),
            new_image = %DisplayImage(new_image),
            "Processing record"
        );

        if !new_image.contains_key(REQUIRED_FIELD) {
            return Err(ValidationError::MalformedEntry {
                index,
                id,
                new_image: DisplayImage(new_image).to_string(),
            });
        }

        info!(
            index,
            id = id.as_deref().unwrap_or("unknown"),
            "Successfully processed record"
        );
        ack.accepted.push(AcceptedEntry { index, id });
    }

    Ok(ack)
}

/// Validates a delivered batch and maps the outcome onto the function result.
/// A validation failure is returned as-is so the invocation fails and the
/// event source's retry / dead-letter policy takes over.
pub fn handle_batch(batch: &StreamEvent) -> Result<Response, ValidationError> {
    info!(batch_size = batch.records.len(), "Received records");

    match validate(batch) {
        Ok(ack) => {
            info!(accepted = ack.accepted.len(), "Batch accepted");
            Ok(Response::from(ack))
        }
        Err(e) => {
            error!(error = %e, "Rejecting batch");
            Err(e)
        }
    }
}
