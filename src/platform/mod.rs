//=========================================================================
// Platform Subsystem
//
// Window frontend: bridges winit (OS-level events) with the game-logic
// thread and presents the particle field through `pixels`.
//
// Architecture:
// ```text
//  Main Thread:                         Logic Thread:
//  ┌──────────────────────────────┐    ┌───────────────────────┐
//  │  winit Event Loop            │    │  GameController       │
//  │   ↓ KeyboardInput            │    │   ↑ await_next        │
//  │  InputProcessor ─────────────┼───►│  BridgeSet            │
//  │                              │    │                       │
//  │  UserEvent::Redraw ◄─────────┼────┤  RenderLoop hook      │
//  │  UserEvent::SessionEnded ◄───┼────┤  controller reached   │
//  │   ↓ RedrawRequested          │    │  Quit                 │
//  │  ParticleField::render       │    │                       │
//  │  Overlay::draw ◄─────────────┼────┤  WindowHost           │
//  │  Pixels::render              │    └───────────────────────┘
//  └──────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Main thread requirement**: winit mandates the main thread on
//   macOS/iOS, so this runs on the thread that called `Engine::run()`
// - **Close = shutdown**: closing the window closes every bridge, which
//   ends the controller with `BridgeClosed`
// - **Lazy window**: created in `resumed()`, as winit 0.30 requires
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod input_processor;
mod window_host;

//=== External Crates =====================================================

use std::sync::Arc;

use log::*;
use parking_lot::Mutex;
use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::particles::{Canvas, ParticleField};
use crate::core::platform_bridge::BridgeSet;
use crate::core::{GameError, Settings};
use crate::engine::FrontendSignal;
use input_processor::InputProcessor;
use window_host::{Overlay, WindowHost};

const WINDOW_TITLE: &str = "Pi Recall";

//=== UserEvent ===========================================================

/// Events injected into the winit loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UserEvent {
    /// The render loop ticked; repaint.
    Redraw,

    /// The controller reached `Quit`; leave the event loop.
    SessionEnded,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal for the window frontend.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    /// Failed to create event loop (no display, or created twice).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),

    #[error("window creation failed: {0}")]
    WindowCreation(#[from] OsError),

    #[error("pixel surface error: {0}")]
    Surface(#[from] pixels::Error),

    #[error("pixel buffer resize failed: {0}")]
    Resize(#[from] pixels::TextureError),
}

impl From<PlatformError> for GameError {
    fn from(e: PlatformError) -> Self {
        GameError::Platform(e.to_string())
    }
}

//=== WindowSignal ========================================================

/// [`FrontendSignal`] that wakes the winit loop through its proxy.
pub(crate) struct WindowSignal {
    proxy: Mutex<EventLoopProxy<UserEvent>>,
}

impl WindowSignal {
    fn send(&self, event: UserEvent) {
        if self.proxy.lock().send_event(event).is_err() {
            trace!(target: "platform", "Event loop gone, dropping {:?}", event);
        }
    }
}

impl FrontendSignal for WindowSignal {
    fn request_redraw(&self) {
        self.send(UserEvent::Redraw);
    }

    fn session_ended(&self) {
        self.send(UserEvent::SessionEnded);
    }
}

//=== Platform ============================================================

/// Window frontend, ready to run.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` creates the event loop
/// 2. **Wiring**: `signal()` and `session_host()` go to the logic thread
/// 3. **Execution**: `run()` blocks until the session ends or the window
///    closes
///
/// # Thread Safety
///
/// This type is NOT Send; it must stay on the main thread. The logic
/// thread talks to it through [`WindowSignal`] and the shared overlay.
pub(crate) struct Platform {
    event_loop: EventLoop<UserEvent>,
    app: App,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates the event loop. The window itself appears in `run()`.
    pub(crate) fn new(
        settings: &Settings,
        field: Arc<ParticleField>,
        bridges: BridgeSet,
    ) -> Result<Self, PlatformError> {
        let event_loop = EventLoop::<UserEvent>::with_user_event()
            .build()
            .map_err(PlatformError::EventLoopCreation)?;

        let overlay = Arc::new(Mutex::new(Overlay::default()));
        let app = App {
            pixels: None,
            window: None,
            buffer_size: (settings.surface_width, settings.surface_height),
            glyph_scale: settings.glyph_scale,
            field,
            overlay: overlay.clone(),
            input: InputProcessor::new(bridges.clone(), overlay),
            bridges,
            failure: None,
        };

        info!(target: "platform", "Platform subsystem initialized");
        Ok(Self { event_loop, app })
    }

    //--- Wiring -----------------------------------------------------------

    pub(crate) fn signal(&self) -> WindowSignal {
        WindowSignal {
            proxy: Mutex::new(self.event_loop.create_proxy()),
        }
    }

    /// Session host for the logic thread, drawing into this window.
    pub(crate) fn session_host(&self) -> WindowHost {
        WindowHost::new(
            self.app.overlay.clone(),
            self.app.bridges.lines.clone(),
            Arc::new(self.signal()),
        )
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the session ends or the window closes.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the loop fails or the window/surface cannot be
    /// created.
    pub(crate) fn run(self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");
        let Platform {
            event_loop,
            mut app,
        } = self;

        event_loop
            .run_app(&mut app)
            .map_err(PlatformError::EventLoopExecution)?;

        match app.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

//=== App =================================================================

/// winit application state. Lives on the main thread.
struct App {
    // Dropped before the window it presents to.
    pixels: Option<Pixels<'static>>,
    window: Option<Arc<Window>>,
    buffer_size: (u32, u32),
    glyph_scale: u32,
    field: Arc<ParticleField>,
    overlay: Arc<Mutex<Overlay>>,
    input: InputProcessor,
    bridges: BridgeSet,
    failure: Option<PlatformError>,
}

impl App {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let (w, h) = self.buffer_size;
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(w, h));

        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));

        let surface = SurfaceTexture::new(width, height, Arc::clone(&window));
        let pixels = Pixels::new(width, height, surface)?;

        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            width,
            height,
            window.scale_factor()
        );

        self.buffer_size = (width, height);
        self.field.set_center((width as f32 / 2.0, height as f32 / 2.0));
        window.request_redraw();
        self.pixels = Some(pixels);
        self.window = Some(window);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let Some(pixels) = self.pixels.as_mut() else {
            return Ok(());
        };
        pixels.resize_surface(width, height)?;
        pixels.resize_buffer(width, height)?;

        self.buffer_size = (width, height);
        self.field.set_center((width as f32 / 2.0, height as f32 / 2.0));
        debug!(target: "platform", "Resized to {}x{}", width, height);
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), PlatformError> {
        let Some(pixels) = self.pixels.as_mut() else {
            return Ok(());
        };
        let (width, height) = self.buffer_size;

        let mut canvas = Canvas::new(pixels.frame_mut(), width, height, self.glyph_scale);
        self.field.render(&mut canvas);
        self.overlay.lock().draw(&mut canvas);

        pixels.render()?;
        Ok(())
    }

    /// Records a fatal error and leaves the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        error!(target: "platform", "{}", error);
        self.bridges.close_all();
        self.failure = Some(error);
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler<UserEvent> for App {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Redraw => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            UserEvent::SessionEnded => {
                info!(target: "platform", "Session ended, closing window");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.bridges.close_all();
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.input.process_key_event(&key_event);
            }

            WindowEvent::Resized(size) => {
                if let Err(e) = self.resize(size.width, size.height) {
                    self.fail(event_loop, e);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
