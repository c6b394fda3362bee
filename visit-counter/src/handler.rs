use {
    std::path::Path,
    lambda_runtime::LambdaEvent,
    serde_json::Value,
    tracing::{info, warn, error},
    visit_counter_core::ResponseEnvelope,
    crate::{
        config::CounterConfig,
        dynamodb::{DynamoDbResource, DynamoDbCounterStore},
        error::{StoreError, CommandError},
        store::{CounterStore, SqliteCounterStore},
    },
};

/// Entry point called by the function runtime for every invocation. Event payload is ignored.
///
/// Never fails: every store outcome is turned into a [`ResponseEnvelope`].
pub async fn handle_invocation(event: LambdaEvent<Value>, resource: &DynamoDbResource) -> Result<ResponseEnvelope, lambda_runtime::Error> {
    info!(request_id = event.context.request_id.as_str(), table_name = resource.table_name(), "handling invocation");
    let store = DynamoDbCounterStore::new(resource);
    Ok(update_visit_count(&store).await)
}

/// Increments the visit counter once and maps the outcome to a response envelope.
pub async fn update_visit_count<S: CounterStore + Sync + ?Sized>(store: &S) -> ResponseEnvelope {
    match store.increment_and_get().await {
        Ok(visit_count) => {
            info!(visit_count, "visit counted");
            ResponseEnvelope::visit_count(visit_count)
        },
        Err(err @ StoreError::AttributeMissing { .. }) => {
            warn!("counter store response is missing data: {err}");
            ResponseEnvelope::not_found(err.to_string())
        },
        Err(err) => {
            error!("failed to increment visit counter: {err}");
            ResponseEnvelope::internal_error(err.to_string())
        },
    }
}

/// Counts one visit against a local sqlite database.
///
/// The table is created only when asked for and the table name is configured, so an
/// unconfigured function fails the same way it does against DynamoDB.
pub async fn invoke_sqlite(config: &CounterConfig, path: impl AsRef<Path>, create_table: bool) -> Result<ResponseEnvelope, CommandError> {
    let store = SqliteCounterStore::open(path, config.table_name.clone())?;

    if create_table {
        if config.is_unconfigured() {
            warn!("table name is not configured, not creating table {:?}", config.table_name);
        } else {
            store.create_table().map_err(CommandError::TableCreate)?;
        }
    }

    Ok(update_visit_count(&store).await)
}
