use {
    std::collections::HashMap,
    async_trait::async_trait,
    aws_config::{BehaviorVersion, meta::region::RegionProviderChain},
    aws_sdk_dynamodb::{
        Client,
        config::Region,
        error::DisplayErrorContext,
        types::{AttributeValue, ReturnValue},
    },
    tracing::info,
    visit_counter_core::{KEY_ATTRIBUTE, KEY_VALUE, COUNT_ATTRIBUTE},
    crate::{
        config::{CounterConfig, DEFAULT_REGION},
        error::StoreError,
        store::CounterStore,
    },
};

/// Attribute map of `UpdateItem` output, named the way the DynamoDB api names it.
const ATTRIBUTES: &str = "Attributes";

/// DynamoDB client and table name, created once per process and shared by all invocations.
#[derive(Clone, Debug)]
pub struct DynamoDbResource {
    client: Client,
    table_name: String,
}

impl DynamoDbResource {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub async fn from_config(config: &CounterConfig) -> Self {
        let region = RegionProviderChain::first_try(config.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        info!(table_name = config.table_name.as_str(), region = ?sdk_config.region(), "dynamodb client created");
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// Store handle over the counter table in DynamoDB. Cheap to create: clones the shared client.
pub struct DynamoDbCounterStore {
    client: Client,
    table_name: String,
}

impl DynamoDbCounterStore {
    pub fn new(resource: &DynamoDbResource) -> Self {
        Self {
            client: resource.client.clone(),
            table_name: resource.table_name.clone(),
        }
    }
}

#[async_trait]
impl CounterStore for DynamoDbCounterStore {
    async fn increment_and_get(&self) -> Result<u64, StoreError> {
        // ADD creates both the item and the attribute when missing, in a single server-side write
        let output = self.client.update_item()
            .table_name(&self.table_name)
            .key(KEY_ATTRIBUTE, AttributeValue::S(KEY_VALUE.to_owned()))
            .update_expression("ADD #count :inc")
            .expression_attribute_names("#count", COUNT_ATTRIBUTE)
            .expression_attribute_values(":inc", AttributeValue::N("1".to_owned()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|err| StoreError::RequestFailed { reason: DisplayErrorContext(&err).to_string() })?;

        visit_count_from_attributes(output.attributes())
    }
}

/// Reads the new visit count from `UpdateItem` output attributes.
pub fn visit_count_from_attributes(attributes: Option<&HashMap<String, AttributeValue>>) -> Result<u64, StoreError> {
    let attributes = attributes
        .ok_or_else(|| StoreError::AttributeMissing { attribute: ATTRIBUTES.to_owned() })?;
    let value = attributes.get(COUNT_ATTRIBUTE)
        .ok_or_else(|| StoreError::AttributeMissing { attribute: COUNT_ATTRIBUTE.to_owned() })?;
    let number = value.as_n()
        .map_err(|other| StoreError::MalformedAttribute {
            attribute: COUNT_ATTRIBUTE.to_owned(),
            reason: format!("expected a number, got {other:?}"),
        })?;

    number.parse::<u64>()
        .map_err(|err| StoreError::MalformedAttribute {
            attribute: COUNT_ATTRIBUTE.to_owned(),
            reason: format!("failed to parse {number:?} as a non-negative integer: {err}"),
        })
}
