use {
    std::{path::Path, sync::{Arc, Mutex, MutexGuard}},
    async_trait::async_trait,
    rusqlite::Connection,
    thiserror::Error,
    tracing::info,
    visit_counter_core::{KEY_ATTRIBUTE, KEY_VALUE, COUNT_ATTRIBUTE},
    crate::error::StoreError,
};

/// Narrow capability over the counter table: bump the visit counter of the
/// counter record and get the new value back.
///
/// Implementations must perform the increment as one atomic operation on the
/// store side (upsert-add). Reading the current value and writing it back
/// loses updates when invocations run concurrently.
#[async_trait]
pub trait CounterStore {
    /// Adds one to the counter, creating the record with a count of 1 if it does not exist yet.
    async fn increment_and_get(&self) -> Result<u64, StoreError>;
}

#[derive(Error, Debug)]
pub enum SqliteCounterStoreOpenError {
    #[error("failed to open connection: {0:?}")]
    ConnectionOpenError(rusqlite::Error),
}

/// Counter table in a local sqlite database. Used for local runs and tests.
#[derive(Clone)]
pub struct SqliteCounterStore {
    connection: Arc<Mutex<Connection>>,
    table_name: String,
}

impl SqliteCounterStore {
    pub fn open(path: impl AsRef<Path>, table_name: impl Into<String>) -> Result<Self, SqliteCounterStoreOpenError> {
        Ok(Self::from_connection(
            Connection::open(path).map_err(SqliteCounterStoreOpenError::ConnectionOpenError)?,
            table_name,
        ))
    }

    pub fn in_memory(table_name: impl Into<String>) -> Result<Self, SqliteCounterStoreOpenError> {
        Ok(Self::from_connection(
            Connection::open_in_memory().map_err(SqliteCounterStoreOpenError::ConnectionOpenError)?,
            table_name,
        ))
    }

    fn from_connection(connection: Connection, table_name: impl Into<String>) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
            table_name: table_name.into(),
        }
    }

    /// Creates the counter table if it is missing. The counter record itself is created by the first increment.
    pub fn create_table(&self) -> Result<(), StoreError> {
        let connection = self.lock_connection()?;
        connection.execute(
            &format!(
                "create table if not exists {} ({} text primary key, {} integer)",
                quoted(&self.table_name),
                quoted(KEY_ATTRIBUTE),
                quoted(COUNT_ATTRIBUTE),
            ),
            (),
        ).map_err(|err| StoreError::RequestFailed { reason: format!("failed to create table {}: {err}", self.table_name) })?;

        info!(table_name = self.table_name.as_str(), "counter table is ready");
        Ok(())
    }

    fn increment(&self) -> Result<u64, StoreError> {
        let connection = self.lock_connection()?;
        let count = quoted(COUNT_ATTRIBUTE);
        let key = quoted(KEY_ATTRIBUTE);

        let value = connection.query_row(
            &format!(
                "insert into {table} ({key}, {count}) values (?1, 1) \
                 on conflict({key}) do update set {count} = coalesce({count}, 0) + 1 \
                 returning {count}",
                table = quoted(&self.table_name),
            ),
            [KEY_VALUE],
            |row| row.get::<_, Option<i64>>(0),
        ).map_err(|err| match err {
            rusqlite::Error::QueryReturnedNoRows => StoreError::AttributeMissing {
                attribute: COUNT_ATTRIBUTE.to_owned(),
            },
            other @ (rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..)) => StoreError::MalformedAttribute {
                attribute: COUNT_ATTRIBUTE.to_owned(),
                reason: format!("{other}"),
            },
            other => StoreError::RequestFailed { reason: format!("{other}") },
        })?;

        let value = value.ok_or_else(|| StoreError::AttributeMissing { attribute: COUNT_ATTRIBUTE.to_owned() })?;
        u64::try_from(value).map_err(|_| StoreError::MalformedAttribute {
            attribute: COUNT_ATTRIBUTE.to_owned(),
            reason: format!("expected a non-negative integer, got {value}"),
        })
    }

    fn lock_connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection.lock()
            .map_err(|err| StoreError::RequestFailed { reason: format!("failed to acquire sqlite connection: {err:?}") })
    }
}

#[async_trait]
impl CounterStore for SqliteCounterStore {
    async fn increment_and_get(&self) -> Result<u64, StoreError> {
        self.increment()
    }
}

fn quoted(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}
