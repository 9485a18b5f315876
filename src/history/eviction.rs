//! Periodic eviction sweep.
//!
//! The sweep runs on a fixed interval and calls `ConversationStore::evict`,
//! which takes the same lock as ordinary writes; a sweep can therefore never
//! interleave with a concurrent message or chat creation.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::ConversationStore;

pub fn spawn_sweep(store: Arc<ConversationStore>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick fires immediately; skip it so the sweep starts one
        // full period after startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let report = store.evict();
            if report.is_empty() {
                tracing::debug!("eviction sweep found nothing to trim");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RetentionConfig;
    use crate::models::MessageRole;

    #[tokio::test(start_paused = true)]
    async fn sweep_trims_on_schedule() {
        let store = Arc::new(ConversationStore::new(RetentionConfig {
            returned_messages: 5,
            max_messages_per_chat: 2,
            max_chats_per_user: 25,
            max_total_messages: 500,
            sweep_interval_secs: 900,
        }));

        let chat = store.create_chat(None, None);
        for i in 0..5 {
            store
                .create_message(chat.id, MessageRole::User, &format!("m{i}"), None)
                .expect("create message");
        }

        let handle = spawn_sweep(store.clone(), Duration::from_secs(900));
        tokio::time::sleep(Duration::from_secs(901)).await;

        assert_eq!(store.message_count(chat.id), 2);
        handle.abort();
    }
}
