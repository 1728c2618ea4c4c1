//=========================================================================
// Bridge Set
//=========================================================================
//
// The three bridges of one session, shared between the frontend (which
// publishes) and the game-logic thread (which waits).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::info;

//=== Internal Dependencies ===============================================

use super::{EventSource, InputBridge, KeyPress};

//=== BridgeSet ===========================================================

/// Key, prompt and line bridges of one session.
#[derive(Clone, Default)]
pub struct BridgeSet {
    pub keys: Arc<InputBridge<KeyPress>>,
    pub prompts: Arc<InputBridge<bool>>,
    pub lines: Arc<InputBridge<String>>,
}

impl BridgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key bridge as seen by the controller.
    pub fn key_source(&self) -> Arc<dyn EventSource<KeyPress>> {
        self.keys.clone()
    }

    /// Prompt bridge as seen by the controller.
    pub fn prompt_source(&self) -> Arc<dyn EventSource<bool>> {
        self.prompts.clone()
    }

    /// Closes every bridge, waking all waiters.
    pub fn close_all(&self) {
        if self.is_closed() {
            return;
        }
        self.keys.close();
        self.prompts.close();
        self.lines.close();
        info!(target: "bridge", "All input bridges closed");
    }

    pub fn is_closed(&self) -> bool {
        self.keys.is_closed() && self.prompts.is_closed() && self.lines.is_closed()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GameError;

    #[test]
    fn clones_share_bridges() {
        let bridges = BridgeSet::new();
        let frontend = bridges.clone();

        frontend.keys.publish(KeyPress::Pause);
        frontend.prompts.publish(true);

        assert_eq!(bridges.key_source().next_event().unwrap(), KeyPress::Pause);
        assert!(bridges.prompt_source().next_event().unwrap());
    }

    #[test]
    fn close_all_wakes_every_waiter() {
        let bridges = BridgeSet::new();
        let waiter = bridges.clone();

        let handle = std::thread::spawn(move || {
            (
                waiter.keys.await_next().is_err(),
                waiter.prompts.await_next().is_err(),
                matches!(waiter.lines.await_next(), Err(GameError::BridgeClosed)),
            )
        });

        std::thread::sleep(std::time::Duration::from_millis(20));
        bridges.close_all();

        assert_eq!(handle.join().unwrap(), (true, true, true));
        assert!(bridges.is_closed());
    }

    #[test]
    fn close_all_is_idempotent() {
        let bridges = BridgeSet::new();
        bridges.close_all();
        bridges.close_all();
        assert!(bridges.is_closed());
    }
}
