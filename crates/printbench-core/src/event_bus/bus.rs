//! Event bus with ordered handlers and a bounded journal.

use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0.simple().to_string().get(..8).unwrap_or_default())
    }
}

/// Which events a subscriber wants
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Only events in one of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(AppEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    handler: EventHandler,
}

#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Capacity of the broadcast channel behind [`EventBus::receiver`].
    pub channel_capacity: usize,
    /// Number of published events kept in the journal; 0 disables it.
    pub journal_capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            journal_capacity: 0,
        }
    }
}

/// A published event and its position in the publish order
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub sequence: u64,
    pub event: AppEvent,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// Nobody received the event
    #[error("No active subscribers")]
    NoSubscribers,
}

/// Event bus shared between a workbench session and its observers.
///
/// Handlers run synchronously on the publishing thread, in the order they
/// subscribed. Async consumers obtain a broadcast receiver via
/// [`EventBus::receiver`]. Every event gets a sequence number starting at
/// 1, so observers can ask for what happened after a known point.
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
    subscriptions: RwLock<Vec<Subscription>>,
    journal: Mutex<VecDeque<JournalEntry>>,
    last_sequence: AtomicU64,
    config: EventBusConfig,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            subscriptions: RwLock::new(Vec::new()),
            journal: Mutex::new(VecDeque::with_capacity(config.journal_capacity)),
            last_sequence: AtomicU64::new(0),
            config,
        }
    }

    /// Publish an event to handlers, receivers, and the journal
    ///
    /// Returns the sequence number assigned to the event. The event is
    /// journaled even when nobody is listening; that case is reported as
    /// `NoSubscribers`, which callers that only notify are free to ignore.
    pub fn publish(&self, event: AppEvent) -> Result<u64, EventBusError> {
        let sequence = self.last_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!("Publishing #{}: {}", sequence, event.description());

        if self.config.journal_capacity > 0 {
            let mut journal = self.journal.lock();
            if journal.len() == self.config.journal_capacity {
                journal.pop_front();
            }
            journal.push_back(JournalEntry {
                sequence,
                event: event.clone(),
            });
        }

        let mut delivered = 0;
        for subscription in self.subscriptions.read().iter() {
            if subscription.filter.matches(&event) {
                (subscription.handler)(event.clone());
                delivered += 1;
            }
        }
        delivered += self.sender.send(event).unwrap_or(0);

        if delivered == 0 && self.subscriber_count() == 0 {
            Err(EventBusError::NoSubscribers)
        } else {
            Ok(sequence)
        }
    }

    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscriptions.write().push(Subscription {
            id,
            filter,
            handler: Box::new(handler),
        });
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Receiver for polling events from an async task
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        let removed = subscriptions.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Sequence number of the most recent event, 0 before the first publish
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence.load(Ordering::SeqCst)
    }

    /// Journaled events published after `sequence`, oldest first
    pub fn journal_since(&self, sequence: u64) -> Vec<JournalEntry> {
        self.journal
            .lock()
            .iter()
            .filter(|entry| entry.sequence > sequence)
            .cloned()
            .collect()
    }

    pub fn clear_journal(&self) {
        self.journal.lock().clear();
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("last_sequence", &self.last_sequence())
            .field("config", &self.config)
            .finish()
    }
}
