//=========================================================================
// Pi Recall Engine
//
// Main entry point and coordinator for a drill session.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_settings()         ├─ loads reference + best
//         └─ with_frontend()         ├─ spawns game-logic thread
//                                    ├─ runs frontend (blocks)
//                                    └─ saves best on exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::thread;

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::console::Console;
use crate::core::game::{GameController, ReferenceDigits, SessionHost};
use crate::core::particles::ParticleField;
use crate::core::platform_bridge::BridgeSet;
use crate::core::{FileStore, GameError, GameResult, RenderLoop, Settings};
use crate::platform::Platform;

//=== Frontend ============================================================

/// Which user interface drives the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Frontend {
    /// winit window with animated glyphs.
    #[default]
    Window,

    /// Line-oriented terminal ("classic" mode).
    Console,
}

//=== FrontendSignal ======================================================

/// Notifications from the game-logic thread to the running frontend.
pub(crate) trait FrontendSignal: Send + Sync {
    /// Asks for a repaint of the particle field.
    fn request_redraw(&self);

    /// Tells the frontend the controller reached `Quit`.
    fn session_ended(&self);
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Settings**: [`Settings::default`]
/// - **Frontend**: [`Frontend::Window`]
///
/// # Examples
///
/// ```no_run
/// use pi_recall::{EngineBuilder, Frontend};
/// use pi_recall::core::Settings;
///
/// let best = EngineBuilder::new()
///     .with_settings(Settings::default())
///     .with_frontend(Frontend::Console)
///     .build()?
///     .run()?;
/// println!("best: {}", best);
/// # Ok::<(), pi_recall::core::GameError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    settings: Settings,
    frontend: Frontend,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Selects the frontend.
    pub fn with_frontend(mut self, frontend: Frontend) -> Self {
        self.frontend = frontend;
        self
    }

    /// Shorthand for choosing the terminal frontend.
    pub fn classic(self, classic: bool) -> Self {
        self.with_frontend(if classic {
            Frontend::Console
        } else {
            Frontend::Window
        })
    }

    /// Validates the settings and builds the engine.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidConfig`] if a setting is out of range.
    pub fn build(self) -> GameResult<Engine> {
        self.settings.validate()?;
        info!(
            "Building engine ({:?} frontend, {:?} tick)",
            self.frontend,
            self.settings.tick_interval()
        );

        Ok(Engine {
            store: FileStore::from_settings(&self.settings),
            settings: self.settings,
            frontend: self.frontend,
        })
    }
}

//=== Engine ==============================================================

/// Pi recall runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► Game Logic Thread
///   │     └─► GameController ──owns──> RenderLoop (Timer Thread)
///   │
///   └─► Frontend (Window Event Loop or Terminal)
///
/// Communication: BridgeSet (frontend → logic), FrontendSignal (logic → frontend)
/// ```
pub struct Engine {
    settings: Settings,
    frontend: Frontend,
    store: FileStore,
}

impl Engine {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frontend(&self) -> Frontend {
        self.frontend
    }

    //--- Execution --------------------------------------------------------

    /// Runs the drill until the player quits and returns the final best.
    ///
    /// # Lifecycle
    ///
    /// 1. Loads the reference digits (fatal) and the best score (0 if absent)
    /// 2. Creates the bridges and the particle field
    /// 3. Spawns the game-logic thread
    /// 4. Runs the frontend on the calling thread (blocks here)
    /// 5. Closes the bridges and joins the logic thread
    /// 6. Saves the best score; a failed save is reported, not returned
    ///
    /// # Errors
    ///
    /// Reference loading failures, frontend failures, and controller
    /// failures other than a closed bridge.
    pub fn run(self) -> GameResult<usize> {
        info!("Starting engine runtime");

        //--- 1. Load persistent state ----------------------------------
        let reference = self.store.load_reference()?;
        let initial_best = self.store.load_best_or_default();
        info!(
            "Best so far: {} digits ({})",
            initial_best,
            self.store.best_path().display()
        );

        //--- 2. Shared state -------------------------------------------
        let bridges = BridgeSet::new();
        let field = Arc::new(ParticleField::from_settings(&self.settings)?);

        //--- 3-5. Logic thread + frontend ------------------------------
        let session = Session {
            settings: &self.settings,
            bridges: &bridges,
            field,
            reference,
            best: initial_best,
        };
        let outcome = match self.frontend {
            Frontend::Window => session.run_window(),
            Frontend::Console => session.run_console(),
        };

        //--- 6. Persist --------------------------------------------------
        let best = outcome.best.max(initial_best);
        if let Err(e) = self.store.save_best(best) {
            error!("Failed to save best score: {}", e);
            eprintln!("Could not save your PB of {} digits: {}", best, e);
        }

        info!("Engine shutdown complete (best: {})", best);
        match outcome.failure {
            Some(e) => Err(e),
            None => Ok(best),
        }
    }
}

//=== Session =============================================================

/// Everything a frontend run needs, borrowed from the engine.
struct Session<'a> {
    settings: &'a Settings,
    bridges: &'a BridgeSet,
    field: Arc<ParticleField>,
    reference: ReferenceDigits,
    best: usize,
}

/// Result of one frontend run.
struct Outcome {
    best: usize,
    failure: Option<GameError>,
}

impl Session<'_> {
    fn run_window(self) -> Outcome {
        let platform = match Platform::new(self.settings, self.field.clone(), self.bridges.clone())
        {
            Ok(platform) => platform,
            Err(e) => {
                error!("Platform initialization failed: {}", e);
                return Outcome {
                    best: self.best,
                    failure: Some(e.into()),
                };
            }
        };
        let signal: Arc<dyn FrontendSignal> = Arc::new(platform.signal());
        let host = platform.session_host();

        let logic = match self.spawn_logic(host, signal) {
            Ok(logic) => logic,
            Err(e) => {
                return Outcome {
                    best: self.best,
                    failure: Some(e),
                }
            }
        };

        info!("Platform initialized, entering event loop");
        let platform_result = platform.run();
        info!("Platform event loop exited");

        self.finish(logic, platform_result.map_err(GameError::from).err())
    }

    fn run_console(self) -> Outcome {
        let console = Console::new(self.bridges.clone());
        let signal: Arc<dyn FrontendSignal> = Arc::new(console.signal());
        let host = console.session_host();

        let logic = match self.spawn_logic(host, signal) {
            Ok(logic) => logic,
            Err(e) => {
                return Outcome {
                    best: self.best,
                    failure: Some(e),
                }
            }
        };

        info!("Console frontend running");
        let console_result = console.run();

        self.finish(logic, console_result.err())
    }

    //--- Internal Helpers -------------------------------------------------

    /// Spawns the game-logic thread running the controller to `Quit`.
    fn spawn_logic<H>(
        &self,
        host: H,
        signal: Arc<dyn FrontendSignal>,
    ) -> GameResult<thread::JoinHandle<GameResult<usize>>>
    where
        H: SessionHost + Send + 'static,
    {
        let redraw_signal = Arc::clone(&signal);
        let render_loop = RenderLoop::new(
            Arc::clone(&self.field),
            self.settings.tick_interval(),
            Arc::new(move || redraw_signal.request_redraw()),
        );

        let mut controller = GameController::new(
            host,
            self.bridges.key_source(),
            self.bridges.prompt_source(),
            Arc::clone(&self.field),
            self.reference.clone(),
            self.best,
        )
        .with_render_loop(render_loop);

        let handle = thread::Builder::new()
            .name("game-logic".into())
            .spawn(move || {
                let result = controller.run();
                signal.session_ended();
                result
            })
            .map_err(|e| GameError::Platform(format!("game logic thread: {}", e)))?;

        info!("Game logic thread spawned");
        Ok(handle)
    }

    /// Unblocks and joins the logic thread once the frontend has returned.
    fn finish(
        self,
        logic: thread::JoinHandle<GameResult<usize>>,
        frontend_failure: Option<GameError>,
    ) -> Outcome {
        // The frontend may have exited first; wake a controller still waiting.
        self.bridges.close_all();

        let (best, logic_failure) = match logic.join() {
            Ok(Ok(best)) => {
                info!("Game logic thread terminated cleanly");
                (best, None)
            }
            Ok(Err(e)) => {
                error!("Game logic failed: {}", e);
                (self.best, Some(e))
            }
            Err(_) => {
                error!("Game logic thread panicked");
                (self.best, None)
            }
        };

        Outcome {
            best,
            failure: frontend_failure.or(logic_failure),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
