//=========================================================================
// Render Loop
//=========================================================================
//
// Fixed-cadence animation driver running on its own thread.
//
// Each fire:
//   1. ParticleField::tick()
//   2. redraw hook (the frontend repaints via ParticleField::render)
//
// The loop never touches the input bridges or the controller, so the
// animation keeps moving while the game thread is blocked on a key.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};
use log::{debug, error, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::error::{GameError, GameResult};
use crate::core::particles::ParticleField;

//=== RedrawHook ==========================================================

/// Callback asking the frontend for a new frame.
pub type RedrawHook = Arc<dyn Fn() + Send + Sync>;

//=== Worker ==============================================================

struct Worker {
    stop: Sender<()>,
    handle: thread::JoinHandle<()>,
}

//=== RenderLoop ==========================================================

/// Periodic `tick → redraw` timer for a [`ParticleField`].
///
/// # Lifecycle
///
/// - [`start`](Self::start) spawns the timer thread; a second start
///   without a stop fails with [`GameError::AlreadyRunning`].
/// - [`stop`](Self::stop) joins the thread; stopping an idle loop is a
///   no-op. [`try_stop`](Self::try_stop) reports it as
///   [`GameError::NotRunning`] instead.
/// - Dropping a running loop stops it.
pub struct RenderLoop {
    field: Arc<ParticleField>,
    interval: Duration,
    redraw: RedrawHook,
    worker: Option<Worker>,
}

impl RenderLoop {
    /// Creates an idle loop.
    pub fn new(field: Arc<ParticleField>, interval: Duration, redraw: RedrawHook) -> Self {
        Self {
            field,
            interval,
            redraw,
            worker: None,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Starts the timer thread.
    ///
    /// # Errors
    ///
    /// [`GameError::AlreadyRunning`] if the loop is already started.
    pub fn start(&mut self) -> GameResult<()> {
        if self.worker.is_some() {
            error!(target: "render_loop", "Render loop started twice");
            return Err(GameError::AlreadyRunning);
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticker = tick(self.interval);
        let field = Arc::clone(&self.field);
        let redraw = Arc::clone(&self.redraw);

        let handle = thread::Builder::new()
            .name("render-loop".into())
            .spawn(move || {
                let mut fires: u64 = 0;
                loop {
                    select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticker) -> _ => {
                            let removed = field.tick();
                            if removed > 0 {
                                trace!(target: "render_loop", "Pruned {} glyphs", removed);
                            }
                            redraw();
                            fires += 1;
                        }
                    }
                }
                debug!(target: "render_loop", "Timer thread exiting after {} fires", fires);
            })
            .map_err(|e| GameError::Platform(format!("render loop thread: {}", e)))?;

        info!(target: "render_loop", "Render loop started ({:?} cadence)", self.interval);
        self.worker = Some(Worker {
            stop: stop_tx,
            handle,
        });
        Ok(())
    }

    /// Stops the timer thread and waits for it. No-op when idle.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        // A full or disconnected channel both mean the thread will exit.
        let _ = worker.stop.try_send(());
        drop(worker.stop);

        if worker.handle.join().is_err() {
            error!(target: "render_loop", "Render loop thread panicked");
        }
        info!(target: "render_loop", "Render loop stopped");
    }

    /// Like [`stop`](Self::stop), but reports an idle loop.
    ///
    /// # Errors
    ///
    /// [`GameError::NotRunning`] if the loop was not started.
    pub fn try_stop(&mut self) -> GameResult<()> {
        if self.worker.is_none() {
            return Err(GameError::NotRunning);
        }
        self.stop();
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
