//! Wire types for the change-feed batches delivered by a DynamoDB stream.

use serde::{Deserialize, Serialize};
use serde_dynamo::{AttributeValue, Item};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute map of a stream image in the tagged wire form
/// (`{"id": {"S": "abc123"}, "n": {"N": "42"}}`).
pub type Image = Item;

/// Text of a string or number attribute.
pub fn scalar_text(value: &AttributeValue) -> Option<&str> {
    match value {
        AttributeValue::S(s) | AttributeValue::N(s) => Some(s.as_str()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "Records")]
    pub records: Vec<StreamRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamRecord {
    #[serde(rename = "eventID", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,

    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,

    pub dynamodb: StreamChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChange {
    #[serde(rename = "Keys", default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Image>,

    #[serde(rename = "NewImage")]
    pub new_image: Image,

    #[serde(
        rename = "SequenceNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence_number: Option<String>,
}

/// Renders an image back into its stream JSON form for log lines and errors.
pub struct DisplayImage<'a>(pub &'a Image);

impl fmt::Display for DisplayImage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sorted: BTreeMap<&String, &AttributeValue> = self.0.iter().collect();
        match serde_json::to_string(&sorted) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}
