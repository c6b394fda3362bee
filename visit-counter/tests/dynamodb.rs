use {
    std::collections::HashMap,
    aws_sdk_dynamodb::{
        Client,
        Config,
        config::{BehaviorVersion, Credentials, Region, retry::RetryConfig},
        types::AttributeValue,
    },
    http::StatusCode,
    lambda_runtime::{Context, LambdaEvent},
    serde_json::json,
    visit_counter::{
        DynamoDbCounterStore,
        DynamoDbResource,
        StoreError,
        dynamodb::visit_count_from_attributes,
        handle_invocation,
        update_visit_count,
    },
};

fn attributes(value: AttributeValue) -> HashMap<String, AttributeValue> {
    HashMap::from([("visit_count".to_owned(), value)])
}

#[test]
fn visit_count_from_updated_attributes() {
    let attributes = attributes(AttributeValue::N("42".to_owned()));
    assert_eq!(Ok(42), visit_count_from_attributes(Some(&attributes)));
}

#[test]
fn no_attributes_in_response() {
    assert_eq!(
        Err(StoreError::AttributeMissing { attribute: "Attributes".to_owned() }),
        visit_count_from_attributes(None),
    );
}

#[test]
fn no_visit_count_in_attributes() {
    let attributes = HashMap::from([("visit".to_owned(), AttributeValue::S("visit_info".to_owned()))]);
    assert_eq!(
        Err(StoreError::AttributeMissing { attribute: "visit_count".to_owned() }),
        visit_count_from_attributes(Some(&attributes)),
    );
}

#[test]
fn visit_count_of_wrong_type() {
    let attributes = attributes(AttributeValue::S("one".to_owned()));
    match visit_count_from_attributes(Some(&attributes)) {
        Err(StoreError::MalformedAttribute { attribute, .. }) => assert_eq!("visit_count", attribute),
        other => panic!("expected malformed attribute error, got: {other:?}"),
    }
}

#[test]
fn visit_count_not_an_integer() {
    for number in ["-1", "1.5", ""] {
        let attributes = attributes(AttributeValue::N(number.to_owned()));
        match visit_count_from_attributes(Some(&attributes)) {
            Err(StoreError::MalformedAttribute { .. }) => {},
            other => panic!("expected malformed attribute error for {number:?}, got: {other:?}"),
        }
    }
}

fn unreachable_resource() -> DynamoDbResource {
    let config = Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .endpoint_url("http://127.0.0.1:1")
        .credentials_provider(Credentials::new("testing", "testing", None, None, "test"))
        .retry_config(RetryConfig::disabled())
        .build();
    DynamoDbResource::new(Client::from_conf(config), "test_visit_count")
}

#[tokio::test]
async fn unreachable_store_is_internal_error() {
    let resource = unreachable_resource();

    let envelope = update_visit_count(&DynamoDbCounterStore::new(&resource)).await;
    let error = envelope.parse_body().unwrap().error().unwrap().to_owned();

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, envelope.status_code);
    assert!(error.starts_with("Error: store request failed:"), "unexpected error: {error}");
}

#[tokio::test]
async fn invocation_never_fails() {
    let resource = unreachable_resource();
    let event = LambdaEvent::new(json!({ "ignored": true }), Context::default());

    let envelope = handle_invocation(event, &resource).await.unwrap();
    let error = envelope.parse_body().unwrap().error().unwrap().to_owned();

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, envelope.status_code);
    assert!(error.starts_with("Error:"), "unexpected error: {error}");
}
