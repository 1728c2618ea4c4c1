//=========================================================================
// Pi Recall Library Root
//
// This crate defines the public API surface of the pi recall drill.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the platform-independent core (bridges, particles, render
//   loop, game controller, storage, settings) for embedding and tests
// - Keep the window and terminal frontends private
//
// Typical usage:
// ```no_run
// use pi_recall::EngineBuilder;
//
// fn main() -> Result<(), pi_recall::core::GameError> {
//     let best = EngineBuilder::new().build()?.run()?;
//     println!("PB: {}", best);
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that runs off the main thread and never touches
// winit. `prelude` re-exports the types most callers need.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit + pixels window, `console` the classic terminal
// mode. `engine` wires either of them to the core.
//
mod console;
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, Frontend};
