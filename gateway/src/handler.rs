use crate::Event;
use async_trait::async_trait;

/// Receives every decoded dispatch. Each call runs on its own task, so a slow or failing
/// handler never blocks the shard's read loop.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    async fn handle_event(&self, event: Event);
}
