//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges frontends (winit window, terminal) with the game-logic thread.
//
// The frontend publishes; the controller blocks on the bridge until the
// next event arrives. Three bridges exist per session:
//   InputBridge<KeyPress>  digits, escape, pause
//   InputBridge<bool>      yes/no prompt answers
//   InputBridge<String>    typed lines (start index)
//
// Components:
// - `interface`: Event types and the `EventSource` seam
// - `input_bridge`: The mutex + condvar single-slot rendezvous
// - `bridge_set`: The three bridges of a session, closed together
//
//=========================================================================

//=== Module Declarations =================================================

mod bridge_set;
mod input_bridge;
mod interface;

//=== Public API ==========================================================

pub use bridge_set::BridgeSet;
pub use input_bridge::InputBridge;
pub use interface::{EventSource, KeyPress};
