use lambda_runtime::{Context, LambdaEvent};
use serde_json::json;
use stream_validator::{handle_batch, validate, StreamEvent, ValidationError};

fn parse(event_json: serde_json::Value) -> StreamEvent {
    serde_json::from_value(event_json).unwrap()
}

#[test]
fn test_scenario_single_valid_record() {
    let event = parse(json!({
        "Records": [
            {"dynamodb": {"NewImage": {"id": {"S": "1"}, "value": {"S": "x"}}}}
        ]
    }));

    let response = handle_batch(&event).unwrap();
    assert_eq!(serde_json::to_value(response).unwrap(), json!({"statusCode": 200}));
}

#[test]
fn test_scenario_second_record_malformed() {
    let event = parse(json!({
        "Records": [
            {"dynamodb": {"NewImage": {"id": {"S": "1"}, "value": {"S": "x"}}}},
            {"dynamodb": {"NewImage": {"id": {"S": "2"}}}}
        ]
    }));

    match handle_batch(&event) {
        Err(ValidationError::MalformedEntry { index, id, new_image }) => {
            assert_eq!(index, 1);
            assert_eq!(id.as_deref(), Some("2"));
            assert!(new_image.contains(r#""S":"2""#));
        }
        Ok(response) => panic!("batch should fail, got {:?}", response),
    }
}

#[test]
fn test_scenario_empty_batch() {
    let event = parse(json!({"Records": []}));

    let ack = validate(&event).unwrap();
    assert!(ack.accepted.is_empty());
    assert_eq!(handle_batch(&event).unwrap().status_code, 200);
}

#[test]
fn test_every_id_reported_in_order() {
    let records: Vec<_> = (0..25)
        .map(|i| {
            json!({
                "eventID": format!("evt-{}", i),
                "eventName": "INSERT",
                "dynamodb": {
                    "NewImage": {"id": {"S": i.to_string()}, "value": {"N": i.to_string()}}
                }
            })
        })
        .collect();
    let event = parse(json!({ "Records": records }));

    let ack = validate(&event).unwrap();
    let ids: Vec<String> = ack
        .accepted
        .iter()
        .filter_map(|entry| entry.id.clone())
        .collect();
    let expected: Vec<String> = (0..25).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_one_bad_record_fails_a_large_batch() {
    let mut records: Vec<_> = (0..50)
        .map(|i| json!({"dynamodb": {"NewImage": {"id": {"S": i.to_string()}, "value": {"S": "ok"}}}}))
        .collect();
    records[37] = json!({"dynamodb": {"NewImage": {"id": {"S": "37"}, "other": {"S": "bad"}}}});
    let event = parse(json!({ "Records": records }));

    let err = validate(&event).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::MalformedEntry { index: 37, .. }
    ));
}

#[test]
fn test_lambda_event_parsing() {
    let event = LambdaEvent {
        payload: parse(json!({
            "Records": [{
                "eventID": "c4ca4238a0b923820dcc509a6f75849b",
                "eventName": "INSERT",
                "eventSource": "aws:dynamodb",
                "awsRegion": "us-east-1",
                "dynamodb": {
                    "Keys": {"id": {"S": "abc123"}},
                    "NewImage": {"id": {"S": "abc123"}, "value": {"S": "hello"}},
                    "SequenceNumber": "4421584500000000017450439091",
                    "SizeBytes": 26,
                    "StreamViewType": "NEW_AND_OLD_IMAGES"
                },
                "eventSourceARN": "arn:aws:dynamodb:us-east-1:123456789012:table/dynotbl_1/stream/2024-01-01T00:00:00.000"
            }]
        })),
        context: Context::default(),
    };

    assert_eq!(event.payload.records.len(), 1);
    let ack = validate(&event.payload).unwrap();
    assert_eq!(ack.ids(), vec![Some("abc123")]);
}

#[test]
fn test_malformed_event_shape_is_rejected() {
    let missing_records = serde_json::from_value::<StreamEvent>(json!({"records": []}));
    assert!(missing_records.is_err());

    let missing_image = serde_json::from_value::<StreamEvent>(json!({
        "Records": [{"eventName": "REMOVE", "dynamodb": {"Keys": {"id": {"S": "1"}}}}]
    }));
    assert!(missing_image.is_err());

    let missing_change = serde_json::from_value::<StreamEvent>(json!({
        "Records": [{"eventName": "INSERT"}]
    }));
    assert!(missing_change.is_err());

    let unknown_wire_type = serde_json::from_value::<StreamEvent>(json!({
        "Records": [{"dynamodb": {"NewImage": {"id": {"X": "1"}, "value": {"S": "x"}}}}]
    }));
    assert!(unknown_wire_type.is_err());
}
