//=========================================================================
// Input Bridge
//=========================================================================
//
// Single-slot blocking rendezvous between an event-producing context and
// one consumer thread.
//
// Architecture:
//   publish(e) ──lock──> slot = Some(e) ──notify_one──┐
//                                                     ▼
//   await_next() ──lock──> [slot empty? wait(cv)] ──> take slot
//
// The predicate check and the wait happen under the same mutex, so a
// publish racing with the start of a wait is never lost. The slot holds
// at most one event: a newer publish overwrites an unread older one.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};
use parking_lot::{Condvar, Mutex};

//=== Internal Dependencies ===============================================

use super::EventSource;
use crate::core::error::{GameError, GameResult};

//=== Slot ================================================================

struct Slot<T> {
    pending: Option<T>,
    closed: bool,
}

//=== InputBridge =========================================================

/// Most-recent-wins handoff of events to a single blocked waiter.
///
/// `publish` never blocks and may be called from any thread. `await_next`
/// is meant for exactly one consumer at a time.
///
/// # Close
///
/// [`close`](Self::close) is an extension to the plain blocking contract:
/// it wakes every waiter with [`GameError::BridgeClosed`] once the pending
/// event (if any) has been delivered. A bridge that is never closed blocks
/// indefinitely, as the base design requires.
pub struct InputBridge<T> {
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

impl<T> InputBridge<T> {
    /// Creates an open bridge with an empty slot.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                pending: None,
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    //--- Producer Side ----------------------------------------------------

    /// Stores `event` in the slot, replacing any unread event, and wakes
    /// one waiter.
    ///
    /// Publishing to a closed bridge drops the event.
    pub fn publish(&self, event: T) {
        let mut slot = self.slot.lock();
        if slot.closed {
            trace!(target: "bridge", "Publish after close ignored");
            return;
        }
        if slot.pending.replace(event).is_some() {
            debug!(target: "bridge", "Unread event overwritten by newer publish");
        }
        drop(slot);
        self.ready.notify_one();
    }

    /// Closes the bridge and wakes every waiter.
    pub fn close(&self) {
        let mut slot = self.slot.lock();
        if !slot.closed {
            slot.closed = true;
            debug!(target: "bridge", "Bridge closed");
        }
        drop(slot);
        self.ready.notify_all();
    }

    //--- Consumer Side ----------------------------------------------------

    /// Blocks until an event is available, then takes it out of the slot.
    ///
    /// An event published before this call is returned immediately. Each
    /// event is delivered at most once.
    ///
    /// # Errors
    ///
    /// [`GameError::BridgeClosed`] if the bridge is closed and the slot is
    /// empty.
    pub fn await_next(&self) -> GameResult<T> {
        let mut slot = self.slot.lock();
        loop {
            if let Some(event) = slot.pending.take() {
                return Ok(event);
            }
            if slot.closed {
                return Err(GameError::BridgeClosed);
            }
            self.ready.wait(&mut slot);
        }
    }

    /// Removes and returns the unread event, if any, without blocking.
    pub fn take_pending(&self) -> Option<T> {
        self.slot.lock().pending.take()
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.slot.lock().closed
    }
}

impl<T> Default for InputBridge<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send> EventSource<T> for InputBridge<T> {
    fn next_event(&self) -> GameResult<T> {
        self.await_next()
    }

    fn discard_pending(&self) {
        if self.take_pending().is_some() {
            trace!(target: "bridge", "Stale event discarded");
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use crossbeam_channel::bounded;

    //=====================================================================
    // Delivery Tests
    //=====================================================================

    #[test]
    fn publish_before_wait_is_delivered() {
        let bridge = InputBridge::new();
        bridge.publish(7);
        assert_eq!(bridge.await_next().unwrap(), 7);
    }

    #[test]
    fn most_recent_publish_wins() {
        let bridge = InputBridge::new();
        bridge.publish('1');
        bridge.publish('4');
        assert_eq!(bridge.await_next().unwrap(), '4');
        assert!(bridge.take_pending().is_none(), "older event must not resurface");
    }

    #[test]
    fn each_event_delivered_at_most_once() {
        let bridge = Arc::new(InputBridge::new());
        bridge.publish(1);
        assert_eq!(bridge.await_next().unwrap(), 1);

        let (done_tx, done_rx) = bounded(1);
        let consumer = {
            let bridge = Arc::clone(&bridge);
            thread::spawn(move || {
                let value = bridge.await_next().unwrap();
                done_tx.send(value).unwrap();
            })
        };

        // The second wait must block: nothing new has been published.
        assert!(done_rx.recv_timeout(Duration::from_millis(50)).is_err());

        bridge.publish(2);
        assert_eq!(done_rx.recv_timeout(Duration::from_secs(5)).unwrap(), 2);
        consumer.join().unwrap();
    }

    #[test]
    fn blocked_waiter_wakes_on_publish() {
        let bridge = Arc::new(InputBridge::new());
        let consumer = {
            let bridge = Arc::clone(&bridge);
            thread::spawn(move || bridge.await_next())
        };

        thread::sleep(Duration::from_millis(20));
        bridge.publish("escape");

        assert_eq!(consumer.join().unwrap().unwrap(), "escape");
    }

    #[test]
    fn racing_publish_and_wait_never_loses_the_event() {
        for round in 0..200 {
            let bridge = Arc::new(InputBridge::new());
            let producer = {
                let bridge = Arc::clone(&bridge);
                thread::spawn(move || bridge.publish(round))
            };

            assert_eq!(bridge.await_next().unwrap(), round);
            producer.join().unwrap();
        }
    }

    //=====================================================================
    // Close Tests
    //=====================================================================

    #[test]
    fn close_wakes_blocked_waiter() {
        let bridge: Arc<InputBridge<u8>> = Arc::new(InputBridge::new());
        let consumer = {
            let bridge = Arc::clone(&bridge);
            thread::spawn(move || bridge.await_next())
        };

        thread::sleep(Duration::from_millis(20));
        bridge.close();

        assert!(matches!(consumer.join().unwrap(), Err(GameError::BridgeClosed)));
    }

    #[test]
    fn pending_event_survives_close() {
        let bridge = InputBridge::new();
        bridge.publish(3);
        bridge.close();

        assert_eq!(bridge.await_next().unwrap(), 3);
        assert!(matches!(bridge.await_next(), Err(GameError::BridgeClosed)));
    }

    #[test]
    fn publish_after_close_is_dropped() {
        let bridge = InputBridge::new();
        bridge.close();
        bridge.publish(9);

        assert!(bridge.is_closed());
        assert!(bridge.take_pending().is_none());
    }

    //=====================================================================
    // EventSource Tests
    //=====================================================================

    #[test]
    fn discard_pending_drops_stale_event() {
        let bridge = InputBridge::new();
        bridge.publish(true);

        EventSource::discard_pending(&bridge);

        assert!(bridge.take_pending().is_none());
    }
}
