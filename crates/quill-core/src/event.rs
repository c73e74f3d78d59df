//! Event system for history notifications.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! Instead of keeping references to observers, the session broadcasts
//! events as values over `tokio::sync::broadcast`. Subscribers receive
//! clones; a slow subscriber lags instead of blocking the editing loop.

use tokio::sync::broadcast;

/// Something that happened to the history of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEvent {
    /// A new command was applied and committed
    Executed {
        label: String,
        /// Redoable commands dropped by branch truncation
        discarded: usize,
    },
    /// The command at the cursor was undone
    Undone { label: String },
    /// The command after the cursor was redone
    Redone { label: String },
    /// The log was dropped
    Cleared,
}

/// Event bus for broadcasting history events.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<HistoryEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: HistoryEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to events.
    ///
    /// Returns a receiver that will get all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for consuming events asynchronously.
///
/// ## Example
///
/// ```ignore
/// let mut handler = EventHandler::new(session.subscribe());
///
/// tokio::spawn(async move {
///     while let Some(event) = handler.next().await {
///         if let HistoryEvent::Executed { discarded, .. } = event {
///             // refresh the redo menu
///         }
///     }
/// });
/// ```
#[derive(Debug)]
pub struct EventHandler {
    receiver: broadcast::Receiver<HistoryEvent>,
}

impl EventHandler {
    /// Creates a new event handler.
    pub fn new(receiver: broadcast::Receiver<HistoryEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next event, `None` once every sender is gone.
    pub async fn next(&mut self) -> Option<HistoryEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_bus() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(HistoryEvent::Cleared);

        let event = rx.recv().await.unwrap();
        assert_eq!(event, HistoryEvent::Cleared);
    }

    #[tokio::test]
    async fn test_handler_ends_when_bus_dropped() {
        let bus = EventBus::new();
        let mut handler = EventHandler::new(bus.subscribe());

        bus.emit(HistoryEvent::Undone {
            label: "Insert \"a\"".to_string(),
        });
        drop(bus);

        assert!(matches!(
            handler.next().await,
            Some(HistoryEvent::Undone { .. })
        ));
        assert_eq!(handler.next().await, None);
    }
}
