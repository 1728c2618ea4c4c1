//=========================================================================
// Session Scenarios
//=========================================================================
//
// End-to-end runs of the game controller on its own thread, fed through
// real input bridges the way a frontend feeds it.
//
// Synchronization:
//   questions, notices and index requests arrive on a channel;
//   each digit press waits until its glyph appears in the field.
//
//=========================================================================

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use pi_recall::prelude::*;

const TIMEOUT: Duration = Duration::from_secs(5);

//=== Test Helpers ========================================================

#[derive(Debug, Clone, PartialEq)]
enum HostEvent {
    Asked(Question),
    Told(Notice),
    IndexRequested,
}

/// Forwards everything the controller shows to the test thread.
struct ChannelHost {
    events: Sender<HostEvent>,
    lines: Arc<InputBridge<String>>,
}

impl SessionHost for ChannelHost {
    fn show_question(&mut self, question: Question) {
        let _ = self.events.send(HostEvent::Asked(question));
    }

    fn read_start_index(&mut self, _len: usize) -> GameResult<String> {
        let _ = self.lines.take_pending();
        let _ = self.events.send(HostEvent::IndexRequested);
        self.lines.await_next()
    }

    fn notify(&mut self, notice: &Notice) {
        let _ = self.events.send(HostEvent::Told(notice.clone()));
    }
}

struct Finished {
    result: GameResult<usize>,
    cursor: usize,
}

struct Session {
    bridges: BridgeSet,
    field: Arc<ParticleField>,
    events: Receiver<HostEvent>,
    handle: thread::JoinHandle<Finished>,
}

impl Session {
    fn start(reference: &str, best: usize) -> Self {
        Self::start_with(reference, best, None)
    }

    fn start_with(reference: &str, best: usize, render_loop: Option<(Duration, RedrawHook)>) -> Self {
        let bridges = BridgeSet::new();
        let field = Arc::new(ParticleField::new(
            (250.0, 250.0),
            0.008,
            2.0,
            StdRng::seed_from_u64(11),
        )
        .unwrap());
        let (tx, events) = unbounded();
        let host = ChannelHost {
            events: tx,
            lines: bridges.lines.clone(),
        };

        let mut game = GameController::new(
            host,
            bridges.key_source(),
            bridges.prompt_source(),
            field.clone(),
            ReferenceDigits::new(reference).unwrap(),
            best,
        );
        if let Some((interval, hook)) = render_loop {
            game = game.with_render_loop(RenderLoop::new(field.clone(), interval, hook));
        }

        let handle = thread::spawn(move || {
            let result = game.run();
            Finished {
                result,
                cursor: game.score().cursor(),
            }
        });

        Self {
            bridges,
            field,
            events,
            handle,
        }
    }

    fn expect(&self, expected: HostEvent) {
        match self.events.recv_timeout(TIMEOUT) {
            Ok(event) => assert_eq!(event, expected),
            Err(RecvTimeoutError::Timeout) => panic!("timed out waiting for {:?}", expected),
            Err(RecvTimeoutError::Disconnected) => panic!("session ended before {:?}", expected),
        }
    }

    fn answer(&self, question: Question, answer: bool) {
        self.expect(HostEvent::Asked(question));
        self.bridges.prompts.publish(answer);
    }

    /// Presses each digit, waiting for the controller to consume it.
    fn press(&self, digits: &str) {
        for c in digits.chars() {
            let before = self.field.len();
            self.bridges.keys.publish(KeyPress::Digit(c));
            let deadline = Instant::now() + TIMEOUT;
            while self.field.len() == before {
                assert!(Instant::now() < deadline, "digit {:?} was never consumed", c);
                thread::sleep(Duration::from_millis(1));
            }
        }
    }

    fn finish(self) -> Finished {
        self.handle.join().unwrap()
    }
}

//=========================================================================
// Memorize Mode
//=========================================================================

#[test]
fn wrong_digit_ends_memorize_run_and_raises_best() {
    let session = Session::start("141592", 2);

    session.answer(Question::Explore, false);
    session.expect(HostEvent::Told(Notice::StartListing));
    session.press("14150");
    session.expect(HostEvent::Told(Notice::Mistake {
        position: 5,
        expected: '9',
    }));
    session.expect(HostEvent::Told(Notice::Memorized { count: 4 }));
    session.expect(HostEvent::Told(Notice::NewBest { previous: 2, best: 4 }));
    session.answer(Question::TryAgain, false);

    let finished = session.finish();
    assert_eq!(finished.cursor, 4);
    assert_eq!(finished.result.unwrap(), 4);
}

#[test]
fn cursor_counts_consecutive_correct_digits() {
    let session = Session::start("3141592653", 50);

    session.answer(Question::Explore, false);
    session.expect(HostEvent::Told(Notice::StartListing));
    session.press("3148");
    session.expect(HostEvent::Told(Notice::Mistake {
        position: 4,
        expected: '1',
    }));
    session.expect(HostEvent::Told(Notice::Memorized { count: 3 }));
    session.answer(Question::TryAgain, false);

    let finished = session.finish();
    assert_eq!(finished.cursor, 3);
    assert_eq!(finished.result.unwrap(), 50);
}

#[test]
fn key_pressed_before_run_starts_is_ignored() {
    let session = Session::start("141592", 0);

    session.expect(HostEvent::Asked(Question::Explore));
    session.bridges.keys.publish(KeyPress::Digit('9'));
    session.bridges.prompts.publish(false);
    session.expect(HostEvent::Told(Notice::StartListing));

    session.press("1");
    session.bridges.keys.publish(KeyPress::Pause);
    session.expect(HostEvent::Told(Notice::Stopped));
    session.expect(HostEvent::Told(Notice::Memorized { count: 1 }));
    session.expect(HostEvent::Told(Notice::NewBest { previous: 0, best: 1 }));
    session.answer(Question::TryAgain, false);

    assert_eq!(session.finish().result.unwrap(), 1);
}

//=========================================================================
// Explore Mode
//=========================================================================

#[test]
fn explore_from_third_digit_needs_every_remaining_digit() {
    let session = Session::start("141592", 0);

    session.answer(Question::Explore, true);
    session.expect(HostEvent::IndexRequested);
    session.bridges.lines.publish("3".into());
    session.expect(HostEvent::Told(Notice::StartListing));

    // Cursor 2 → 5; the sixth digit is still outstanding.
    session.press("159");
    session.press("2");
    session.expect(HostEvent::Told(Notice::Explored { count: 6 }));
    session.answer(Question::TryAgain, false);

    let finished = session.finish();
    assert_eq!(finished.cursor, 6);
    assert_eq!(finished.result.unwrap(), 0, "explore runs leave the best alone");
}

#[test]
fn invalid_start_index_is_reported_and_asked_again() {
    let session = Session::start("141592", 0);

    session.answer(Question::Explore, true);
    session.expect(HostEvent::IndexRequested);
    session.bridges.lines.publish("70".into());
    session.expect(HostEvent::Told(Notice::InvalidIndex {
        input: "70".into(),
        len: 6,
    }));
    session.expect(HostEvent::IndexRequested);
    session.bridges.lines.publish("6".into());
    session.expect(HostEvent::Told(Notice::StartListing));

    session.press("2");
    session.expect(HostEvent::Told(Notice::Explored { count: 6 }));
    session.answer(Question::TryAgain, false);

    assert_eq!(session.finish().cursor, 6);
}

//=========================================================================
// Quitting
//=========================================================================

#[test]
fn escape_mid_run_commits_best_before_quit() {
    let session = Session::start("31415926535", 3);

    session.answer(Question::Explore, false);
    session.expect(HostEvent::Told(Notice::StartListing));
    session.press("3141592");
    session.bridges.keys.publish(KeyPress::Escape);
    session.expect(HostEvent::Told(Notice::NewBest { previous: 3, best: 7 }));

    let finished = session.finish();
    assert_eq!(finished.cursor, 7);
    assert_eq!(finished.result.unwrap(), 7);
}

#[test]
fn closing_bridges_ends_session_without_committing() {
    let session = Session::start("31415926535", 1);

    session.answer(Question::Explore, false);
    session.expect(HostEvent::Told(Notice::StartListing));
    session.press("31415");
    session.bridges.close_all();

    let finished = session.finish();
    assert_eq!(finished.cursor, 5);
    assert_eq!(finished.result.unwrap(), 1);
}

//=========================================================================
// Rendering
//=========================================================================

/// Checks every draw call it receives.
#[derive(Default)]
struct CheckingSurface {
    frames: usize,
    dead_draws: usize,
}

impl RenderSurface for CheckingSurface {
    fn clear(&mut self) {
        self.frames += 1;
    }

    fn draw_glyph(&mut self, _symbol: char, _center: (f32, f32), alpha: f32) {
        if alpha <= 0.0 {
            self.dead_draws += 1;
        }
    }
}

#[test]
fn render_loop_animates_while_controller_waits() {
    let surface = Arc::new(Mutex::new(CheckingSurface::default()));
    let field_slot: Arc<Mutex<Option<Arc<ParticleField>>>> = Arc::new(Mutex::new(None));

    let hook: RedrawHook = {
        let surface = surface.clone();
        let field_slot = field_slot.clone();
        Arc::new(move || {
            if let Some(field) = field_slot.lock().as_ref() {
                field.render(&mut *surface.lock());
            }
        })
    };
    let session = Session::start_with("141592", 0, Some((Duration::from_millis(1), hook)));
    *field_slot.lock() = Some(session.field.clone());

    session.answer(Question::Explore, false);
    session.expect(HostEvent::Told(Notice::StartListing));
    session.press("1");

    // The glyph fades away while the controller sits blocked on the key
    // bridge; 1 / 0.008 = 125 ticks.
    let deadline = Instant::now() + TIMEOUT;
    while !session.field.is_empty() {
        assert!(Instant::now() < deadline, "glyph never faded");
        thread::sleep(Duration::from_millis(5));
    }

    session.bridges.close_all();
    session.finish().result.unwrap();

    let surface = surface.lock();
    assert!(surface.frames >= 125);
    assert_eq!(surface.dead_draws, 0);
}

#[test]
fn glyph_opacity_decays_linearly() {
    let field = ParticleField::new((0.0, 0.0), 0.008, 2.0, StdRng::seed_from_u64(5)).unwrap();
    field.spawn_centered('3');

    for k in 1..=130u32 {
        field.tick();
        let expected = (1.0 - k as f32 * 0.008).max(0.0);
        match field.snapshot().first() {
            Some(glyph) => assert!((glyph.opacity() - expected).abs() < 1e-5),
            None => {
                assert!(expected <= 0.0, "glyph removed at tick {} while still visible", k);
                break;
            }
        }
    }
    assert!(field.is_empty());
}
