//! In-memory conversation store.
//!
//! Chats and messages live in arena-style maps keyed by monotonically
//! increasing ids, behind a single mutex so ordinary writes and the periodic
//! eviction sweep are mutually exclusive. The public contract is the store
//! boundary a persistent backend could later stand behind without changing
//! callers.

pub mod eviction;

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::core::config::RetentionConfig;
use crate::core::errors::ApiError;
use crate::models::{Chat, Message, MessageRole, SourceReference};

#[derive(Default)]
struct Inner {
    chats: BTreeMap<u64, Chat>,
    /// Keyed by message id; ids are allocated in creation order, so map
    /// iteration order is creation order.
    messages: BTreeMap<u64, Message>,
    next_chat_id: u64,
    next_message_id: u64,
}

pub struct ConversationStore {
    inner: Mutex<Inner>,
    limits: RetentionConfig,
}

/// Outcome of one eviction sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EvictionReport {
    /// Messages dropped by the per-chat ceiling.
    pub messages_trimmed: usize,
    /// Chats dropped by the per-user ceiling (their messages count into
    /// `messages_cascaded`).
    pub chats_dropped: usize,
    pub messages_cascaded: usize,
    /// Messages dropped by the global ceiling.
    pub messages_trimmed_globally: usize,
}

impl EvictionReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ConversationStore {
    pub fn new(limits: RetentionConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_chat_id: 1,
                next_message_id: 1,
                ..Inner::default()
            }),
            limits,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Recover from poisoning; the store holds plain data and every
        // critical section leaves it consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn create_chat(&self, title: Option<String>, user_id: Option<String>) -> Chat {
        let mut inner = self.lock();
        let id = inner.next_chat_id;
        inner.next_chat_id += 1;
        let chat = Chat {
            id,
            title,
            user_id,
            created_at: Utc::now(),
        };
        inner.chats.insert(id, chat.clone());
        chat
    }

    pub fn get_chat(&self, id: u64) -> Option<Chat> {
        self.lock().chats.get(&id).cloned()
    }

    /// All chats, newest first.
    pub fn list_chats(&self) -> Vec<Chat> {
        let inner = self.lock();
        let mut chats: Vec<Chat> = inner.chats.values().cloned().collect();
        chats.sort_by(|a, b| b.id.cmp(&a.id));
        chats
    }

    /// Returns false when the chat does not exist, so the caller can map the
    /// miss to a 404 instead of handling an error.
    pub fn update_chat_title(&self, id: u64, title: &str) -> bool {
        let mut inner = self.lock();
        match inner.chats.get_mut(&id) {
            Some(chat) => {
                chat.title = Some(title.to_string());
                true
            }
            None => false,
        }
    }

    /// Deletes a chat and cascades to its messages. Returns false when the
    /// chat does not exist.
    pub fn delete_chat(&self, id: u64) -> bool {
        let mut inner = self.lock();
        if inner.chats.remove(&id).is_none() {
            return false;
        }
        inner.messages.retain(|_, m| m.chat_id != id);
        true
    }

    /// Appends a message. Empty content is rejected; an unknown chat id is
    /// created implicitly, covering chats started by their first message.
    pub fn create_message(
        &self,
        chat_id: u64,
        role: MessageRole,
        content: &str,
        sources: Option<Vec<SourceReference>>,
    ) -> Result<Message, ApiError> {
        if content.trim().is_empty() {
            return Err(ApiError::Validation(
                "message content must not be empty".to_string(),
            ));
        }

        let mut inner = self.lock();
        if !inner.chats.contains_key(&chat_id) {
            inner.chats.insert(
                chat_id,
                Chat {
                    id: chat_id,
                    title: None,
                    user_id: None,
                    created_at: Utc::now(),
                },
            );
            inner.next_chat_id = inner.next_chat_id.max(chat_id + 1);
        }

        let id = inner.next_message_id;
        inner.next_message_id += 1;
        let message = Message {
            id,
            chat_id,
            role,
            content: content.to_string(),
            sources,
            created_at: Utc::now(),
        };
        inner.messages.insert(id, message.clone());
        Ok(message)
    }

    /// Messages of a chat in ascending creation order, capped to the most
    /// recent `returned_messages`. The cap bounds what callers receive, not
    /// what is persisted.
    pub fn messages_for_chat(&self, chat_id: u64) -> Vec<Message> {
        let inner = self.lock();
        let all: Vec<Message> = inner
            .messages
            .values()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        let skip = all.len().saturating_sub(self.limits.returned_messages);
        all.into_iter().skip(skip).collect()
    }

    pub fn message_count(&self, chat_id: u64) -> usize {
        self.lock()
            .messages
            .values()
            .filter(|m| m.chat_id == chat_id)
            .count()
    }

    pub fn total_messages(&self) -> usize {
        self.lock().messages.len()
    }

    /// Runs one eviction sweep under the store lock, enforcing in order the
    /// per-chat message ceiling, the per-user chat ceiling (cascading), and
    /// the global message ceiling.
    pub fn evict(&self) -> EvictionReport {
        let mut inner = self.lock();
        let mut report = EvictionReport::default();

        // Ceiling 1: newest `max_messages_per_chat` messages per chat.
        let chat_ids: Vec<u64> = inner.chats.keys().copied().collect();
        for chat_id in chat_ids {
            let ids: Vec<u64> = inner
                .messages
                .values()
                .filter(|m| m.chat_id == chat_id)
                .map(|m| m.id)
                .collect();
            if ids.len() > self.limits.max_messages_per_chat {
                let excess = ids.len() - self.limits.max_messages_per_chat;
                for id in ids.into_iter().take(excess) {
                    inner.messages.remove(&id);
                    report.messages_trimmed += 1;
                }
            }
        }

        // Ceiling 2: newest `max_chats_per_user` chats per user, dropped
        // chats cascade to their messages.
        let mut by_user: BTreeMap<Option<String>, Vec<u64>> = BTreeMap::new();
        for chat in inner.chats.values() {
            by_user
                .entry(chat.user_id.clone())
                .or_default()
                .push(chat.id);
        }
        for (_, mut ids) in by_user {
            if ids.len() <= self.limits.max_chats_per_user {
                continue;
            }
            // Creation time follows id order; keep the newest ids.
            ids.sort_unstable();
            let excess = ids.len() - self.limits.max_chats_per_user;
            for chat_id in ids.into_iter().take(excess) {
                inner.chats.remove(&chat_id);
                let before = inner.messages.len();
                inner.messages.retain(|_, m| m.chat_id != chat_id);
                report.messages_cascaded += before - inner.messages.len();
                report.chats_dropped += 1;
            }
        }

        // Ceiling 3: globally oldest messages across all chats.
        while inner.messages.len() > self.limits.max_total_messages {
            if inner.messages.pop_first().is_none() {
                break;
            }
            report.messages_trimmed_globally += 1;
        }

        if !report.is_empty() {
            tracing::info!(
                messages_trimmed = report.messages_trimmed,
                chats_dropped = report.chats_dropped,
                messages_cascaded = report.messages_cascaded,
                messages_trimmed_globally = report.messages_trimmed_globally,
                "eviction sweep trimmed retained data"
            );
        }
        report
    }
}
