use std::sync::mpsc::Sender;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::countdown::Countdown;
use crate::passage::Passage;
use crate::runtime::AppEvent;
use crate::scoring::{self, WordClass};
use crate::session::{Phase, Results, Session};
use crate::words::{self, WordList};

/// Everything needed to build an [`App`] besides the word list
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub config: Config,
    /// Fixed passage text used instead of random words
    pub prompt: Option<String>,
    pub seed: Option<u64>,
}

/// The typing test: word list, passage, session and the countdown timer.
#[derive(Debug)]
pub struct App {
    settings: Settings,
    words: Option<WordList>,
    load_error: Option<String>,
    passage: Passage,
    session: Session,
    countdown: Option<Countdown>,
    tick_tx: Sender<AppEvent>,
    rng: StdRng,
    results: Option<Results>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        settings: Settings,
        words: words::Result<WordList>,
        tick_tx: Sender<AppEvent>,
    ) -> Self {
        let (words, load_error) = match words {
            Ok(list) => {
                tracing::info!(
                    name = list.name.as_deref().unwrap_or("custom"),
                    words = list.len(),
                    "word list loaded"
                );
                (Some(list), None)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load word list");
                (None, Some(e.to_string()))
            }
        };

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut app = Self {
            session: Session::new(settings.config.duration()),
            settings,
            words,
            load_error,
            passage: Passage::default(),
            countdown: None,
            tick_tx,
            rng,
            results: None,
            should_quit: false,
        };
        app.passage = app.next_passage();
        app
    }

    fn next_passage(&mut self) -> Passage {
        if let Some(prompt) = &self.settings.prompt {
            return Passage::from_text(prompt);
        }

        match &self.words {
            Some(list) => Passage::generate(list, self.settings.config.number_of_words, &mut self.rng),
            None => Passage::default(),
        }
    }

    /// A session can only run against a non-empty passage.
    pub fn is_ready(&self) -> bool {
        !self.passage.is_empty()
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Tick => self.on_tick(now),
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Paste(text) => {
                tracing::debug!(chars = text.chars().count(), "paste suppressed");
            }
            AppEvent::Resize => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if is_quit_key(&key) {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Tab {
            self.reset();
            return;
        }

        if is_clipboard_key(&key) {
            tracing::debug!(code = ?key.code, "clipboard shortcut suppressed");
            return;
        }

        if !self.is_ready() {
            return;
        }

        // catch up on the clock before accepting more input
        self.on_tick(now);

        match self.session.phase() {
            Phase::Finished => match key.code {
                KeyCode::Char('n') | KeyCode::Right => self.reset(),
                KeyCode::Char('r') | KeyCode::Left => self.restart(),
                _ => {}
            },
            Phase::Idle | Phase::Running => {
                if self.session.press_key(now) {
                    self.on_started();
                }

                match key.code {
                    KeyCode::Char(c) if !has_command_modifier(&key) => {
                        self.session.type_char(c, &self.passage, now);
                    }
                    KeyCode::Backspace => {
                        self.session.backspace(&self.passage, now);
                    }
                    _ => {}
                }
            }
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.session.tick(now) {
            self.on_finished();
        }
    }

    fn on_started(&mut self) {
        tracing::info!(
            duration_secs = self.session.duration().as_secs(),
            words = self.passage.len(),
            "session started"
        );
        self.stop_countdown();
        self.countdown = Some(Countdown::spawn(
            self.tick_tx.clone(),
            self.settings.config.tick_interval(),
        ));
    }

    fn on_finished(&mut self) {
        self.stop_countdown();
        self.results = self.session.results();

        if let Some(r) = &self.results {
            tracing::info!(
                wpm = r.wpm,
                accuracy = r.accuracy,
                correct_words = r.correct_words,
                mistakes = r.mistakes,
                total_typed = r.total_typed,
                "session finished"
            );
        }
    }

    fn stop_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel();
        }
    }

    /// Back to idle with a freshly generated passage.
    pub fn reset(&mut self) {
        self.stop_countdown();
        self.passage = self.next_passage();
        self.session.reset();
        self.results = None;
        tracing::debug!("session reset");
    }

    /// Back to idle, typing the same passage again.
    pub fn restart(&mut self) {
        self.stop_countdown();
        self.session.reset();
        self.results = None;
        tracing::debug!("session restarted");
    }

    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn countdown_active(&self) -> bool {
        self.countdown.as_ref().is_some_and(Countdown::is_active)
    }

    pub fn word_classes(&self) -> Vec<Option<WordClass>> {
        scoring::word_classes(self.passage.words(), self.session.input())
    }

    pub fn current_word(&self) -> &str {
        self.passage
            .word(self.session.score().current_word_index)
            .unwrap_or("")
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL)
}

fn has_command_modifier(key: &KeyEvent) -> bool {
    // Windows reports AltGr-composed chars as Ctrl+Alt
    let altgr = key.modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT)
        && !key.modifiers.contains(KeyModifiers::SUPER)
        && matches!(key.code, KeyCode::Char(c) if !c.is_control());

    !altgr
        && key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

/// Copy, cut and paste shortcuts. None of them may reach the input.
pub fn is_clipboard_key(key: &KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char(c) if ctrl => matches!(c.to_ascii_lowercase(), 'c' | 'v' | 'x'),
        KeyCode::Insert => ctrl || shift,
        KeyCode::Delete => shift,
        _ => false,
    }
}
