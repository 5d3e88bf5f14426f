use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;
use slotbook_core::KeyValueStore;

// Mock store for testing
mock! {
    pub SlotStore {}

    #[async_trait]
    impl KeyValueStore for SlotStore {
        async fn get(&self, key: &str) -> eyre::Result<Option<Value>>;

        async fn set(&self, key: &str, value: Value) -> eyre::Result<()>;
    }
}
