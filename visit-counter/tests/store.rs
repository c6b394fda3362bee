use {
    std::sync::atomic::{AtomicU64, Ordering},
    async_trait::async_trait,
    visit_counter::{CounterStore, StoreError},
};

/// Fails every increment with the same error.
pub struct FailingStore {
    error: StoreError,
}

impl FailingStore {
    pub fn new(error: StoreError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl CounterStore for FailingStore {
    async fn increment_and_get(&self) -> Result<u64, StoreError> {
        Err(self.error.clone())
    }
}

/// Counts in memory, for checking handler behaviour without a database.
#[derive(Default)]
pub struct MemoryStore {
    count: AtomicU64,
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn increment_and_get(&self) -> Result<u64, StoreError> {
        Ok(self.count.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
