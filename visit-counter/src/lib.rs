pub use {
    visit_counter_core::{ResponseEnvelope, ResponseBody},
    crate::{
        config::CounterConfig,
        dynamodb::{DynamoDbResource, DynamoDbCounterStore},
        error::{StoreError, CommandError},
        handler::{handle_invocation, invoke_sqlite, update_visit_count},
        store::{CounterStore, SqliteCounterStore, SqliteCounterStoreOpenError},
    },
};

pub mod config;
pub mod dynamodb;
pub mod error;
pub mod handler;
pub mod logging;
pub mod store;
