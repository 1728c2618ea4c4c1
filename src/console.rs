//=========================================================================
// Console Frontend
//=========================================================================
//
// Classic line-oriented mode: questions and messages go to stdout, each
// line typed on stdin is routed to the bridges.
//
// Line routing:
//   "y" / "n"      → prompt bridge
//   single digit   → key bridge
//   "EXIT"         → key bridge (Escape)
//   "STOP"         → key bridge (Pause)
//   anything else  → key bridge (Other, a mistake during a run)
//   any line       → line bridge (start index)
//   EOF            → every bridge closed
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::game::{Notice, Question, SessionHost};
use crate::core::platform_bridge::{BridgeSet, InputBridge, KeyPress};
use crate::core::{GameError, GameResult};
use crate::engine::FrontendSignal;

//=== Line Routing ========================================================

enum Command {
    Answer(bool),
    Key(KeyPress),
}

fn command(line: &str) -> Option<Command> {
    let command = if line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes") {
        Command::Answer(true)
    } else if line.eq_ignore_ascii_case("n") || line.eq_ignore_ascii_case("no") {
        Command::Answer(false)
    } else if line.eq_ignore_ascii_case("exit") {
        Command::Key(KeyPress::Escape)
    } else if line.eq_ignore_ascii_case("stop") {
        Command::Key(KeyPress::Pause)
    } else {
        return None;
    };
    Some(command)
}

/// What a line means to a run in progress: a single digit is that digit,
/// any other line is a press that cannot match.
fn line_key(line: &str) -> KeyPress {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => KeyPress::digit(c).unwrap_or(KeyPress::Other),
        _ => KeyPress::Other,
    }
}

/// Publishes one typed line to the bridges it addresses.
pub(crate) fn dispatch_line(bridges: &BridgeSet, line: &str) {
    let line = line.trim();
    debug!(target: "console", "Line {:?}", line);

    // The controller discards stale events on the bridge it is about to
    // wait on, so that bridge must be written last: keys before the line,
    // the line before prompt answers. Escape and Pause replace the key.
    let command = command(line);
    if !matches!(command, Some(Command::Key(_))) {
        bridges.keys.publish(line_key(line));
    }
    if line.is_empty() {
        return;
    }
    bridges.lines.publish(line.to_string());
    match command {
        Some(Command::Answer(answer)) => bridges.prompts.publish(answer),
        Some(Command::Key(key)) => bridges.keys.publish(key),
        None => {}
    }
}

/// Routes every line of `reader` until EOF, then closes the bridges.
pub(crate) fn pump_lines<R: BufRead>(reader: R, bridges: &BridgeSet) {
    for line in reader.lines() {
        match line {
            Ok(line) => dispatch_line(bridges, &line),
            Err(e) => {
                warn!(target: "console", "stdin read failed: {}", e);
                break;
            }
        }
    }
    info!(target: "console", "Input ended");
    bridges.close_all();
}

//=== ConsoleHost =========================================================

/// `SessionHost` that prints to a writer and reads start indices from the
/// line bridge.
pub(crate) struct ConsoleHost<W: Write> {
    out: W,
    lines: Arc<InputBridge<String>>,
}

impl<W: Write> ConsoleHost<W> {
    pub(crate) fn new(out: W, lines: Arc<InputBridge<String>>) -> Self {
        Self { out, lines }
    }

    fn say(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|()| self.out.flush()) {
            warn!(target: "console", "Could not write to console: {}", e);
        }
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> SessionHost for ConsoleHost<W> {
    fn show_question(&mut self, question: Question) {
        self.say(&format!("{} (Y/N)", question));
    }

    fn read_start_index(&mut self, len: usize) -> GameResult<String> {
        let _ = self.lines.take_pending();
        self.say(&format!(
            "From which digit of pi do you want to start exploring? (1-{})",
            len
        ));
        self.lines.await_next()
    }

    fn notify(&mut self, notice: &Notice) {
        self.say(&notice.to_string());
    }
}

//=== ConsoleSignal =======================================================

/// [`FrontendSignal`] for the console; there is nothing to repaint.
pub(crate) struct ConsoleSignal {
    ended: Sender<()>,
}

impl FrontendSignal for ConsoleSignal {
    fn request_redraw(&self) {}

    fn session_ended(&self) {
        let _ = self.ended.try_send(());
    }
}

//=== Console =============================================================

/// Terminal frontend, ready to run.
pub(crate) struct Console {
    bridges: BridgeSet,
    ended_tx: Sender<()>,
    ended_rx: Receiver<()>,
}

impl Console {
    pub(crate) fn new(bridges: BridgeSet) -> Self {
        let (ended_tx, ended_rx) = bounded(1);
        Self {
            bridges,
            ended_tx,
            ended_rx,
        }
    }

    pub(crate) fn signal(&self) -> ConsoleSignal {
        ConsoleSignal {
            ended: self.ended_tx.clone(),
        }
    }

    pub(crate) fn session_host(&self) -> ConsoleHost<io::Stdout> {
        ConsoleHost::new(io::stdout(), self.bridges.lines.clone())
    }

    /// Reads stdin until the session ends.
    ///
    /// The reader thread is detached: a blocked stdin read cannot be
    /// interrupted, and the process exits right after the session.
    pub(crate) fn run(self) -> GameResult<()> {
        let Console {
            bridges,
            ended_tx,
            ended_rx,
        } = self;
        drop(ended_tx);

        thread::Builder::new()
            .name("console-reader".into())
            .spawn(move || pump_lines(io::stdin().lock(), &bridges))
            .map_err(|e| GameError::Platform(format!("console reader thread: {}", e)))?;

        // Disconnect means the logic thread is gone without signalling.
        let _ = ended_rx.recv();
        info!(target: "console", "Console frontend finished");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    //=====================================================================
    // Routing Tests
    //=====================================================================

    #[test]
    fn answers_are_case_insensitive() {
        let bridges = BridgeSet::new();
        dispatch_line(&bridges, "Y");
        assert_eq!(bridges.prompts.take_pending(), Some(true));
        dispatch_line(&bridges, " no ");
        assert_eq!(bridges.prompts.take_pending(), Some(false));
    }

    #[test]
    fn single_digit_is_a_key_and_a_line() {
        let bridges = BridgeSet::new();
        dispatch_line(&bridges, "7");
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Digit('7')));
        assert_eq!(bridges.lines.take_pending().as_deref(), Some("7"));
        assert_eq!(bridges.prompts.take_pending(), None);
    }

    #[test]
    fn longer_lines_are_non_matching_keys() {
        let bridges = BridgeSet::new();
        dispatch_line(&bridges, "42");
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Other));
        assert_eq!(bridges.lines.take_pending().as_deref(), Some("42"));

        dispatch_line(&bridges, "a");
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Other));
    }

    #[test]
    fn answers_also_count_as_non_matching_keys() {
        let bridges = BridgeSet::new();
        dispatch_line(&bridges, "y");
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Other));
        assert_eq!(bridges.prompts.take_pending(), Some(true));
    }

    #[test]
    fn exit_and_stop_are_keys() {
        let bridges = BridgeSet::new();
        dispatch_line(&bridges, "EXIT");
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Escape));
        dispatch_line(&bridges, "stop");
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Pause));
    }

    #[test]
    fn blank_line_is_only_a_key() {
        let bridges = BridgeSet::new();
        dispatch_line(&bridges, "   ");
        assert_eq!(bridges.keys.take_pending(), Some(KeyPress::Other));
        assert_eq!(bridges.lines.take_pending(), None);
        assert_eq!(bridges.prompts.take_pending(), None);
    }

    #[test]
    fn eof_closes_bridges() {
        let bridges = BridgeSet::new();
        pump_lines(Cursor::new("y\n3\n"), &bridges);

        assert!(bridges.is_closed());
        // The last unread events survive the close.
        assert_eq!(bridges.keys.await_next().unwrap(), KeyPress::Digit('3'));
        assert!(bridges.prompts.await_next().unwrap());
        assert!(matches!(bridges.keys.await_next(), Err(GameError::BridgeClosed)));
    }

    //=====================================================================
    // ConsoleHost Tests
    //=====================================================================

    #[test]
    fn host_prints_questions_and_notices() {
        let mut host = ConsoleHost::new(Vec::new(), Arc::new(InputBridge::new()));
        host.show_question(Question::TryAgain);
        host.notify(&Notice::Stopped);

        let text = String::from_utf8(host.output().clone()).unwrap();
        assert_eq!(text, "Do you want to try again? (Y/N)\nStopping...\n");
    }

    #[test]
    fn start_index_skips_stale_line() {
        let lines = Arc::new(InputBridge::new());
        let mut host = ConsoleHost::new(Vec::new(), lines.clone());
        lines.publish("y".to_string());

        let typist = {
            let lines = lines.clone();
            thread::spawn(move || {
                thread::sleep(std::time::Duration::from_millis(20));
                lines.publish("12".to_string());
            })
        };

        assert_eq!(host.read_start_index(100).unwrap(), "12");
        typist.join().unwrap();
    }

    #[test]
    fn signal_reports_session_end_once() {
        let console = Console::new(BridgeSet::new());
        let signal = console.signal();
        signal.request_redraw();
        signal.session_ended();
        signal.session_ended();

        assert!(console.ended_rx.try_recv().is_ok());
        assert!(console.ended_rx.try_recv().is_err());
    }
}
