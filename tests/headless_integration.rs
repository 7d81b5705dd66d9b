use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use typesprint::app::{App, Settings};
use typesprint::config::Config;
use typesprint::runtime::{AppEvent, EventSource, FixedTicker, Runner, TestEventSource};
use typesprint::session::Phase;
use typesprint::words::WordList;

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn settings(prompt: &str, duration: Option<Duration>) -> Settings {
    let mut config = Config {
        tick_rate_ms: 5,
        ..Config::default()
    };
    if let Some(d) = duration {
        config.number_of_secs = d.as_secs();
    }
    Settings {
        config,
        prompt: Some(prompt.to_string()),
        seed: None,
    }
}

// Headless integration using the runtime + App without a TTY.
// Keystrokes and countdown ticks share one queue, like in the binary.
#[test]
fn headless_typing_flow_scores_input() {
    let es = TestEventSource::new();
    let tx = es.sender();
    let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(5)));
    let mut app = App::new(
        settings("a bb", None),
        WordList::embedded("english"),
        runner.sender(),
    );

    for c in "a cc".chars() {
        tx.send(key(c)).unwrap();
    }

    let mut keys_seen = 0;
    for _ in 0..200u32 {
        if let Some(ev) = runner.step() {
            if matches!(ev, AppEvent::Key(_)) {
                keys_seen += 1;
            }
            app.handle_event(ev, Instant::now());
        }
        if keys_seen == 4 {
            break;
        }
    }

    assert_eq!(app.session().phase(), Phase::Running);
    assert_eq!(app.session().input(), "a cc");
    assert_eq!(app.session().mistakes(), 2);
    assert_eq!(app.session().accuracy(), 50);
    assert!(app.countdown_active());
}

#[test]
fn headless_timed_session_finishes_by_countdown() {
    // one second session driven only by real countdown ticks
    let runner = Runner::new(
        TestEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut app = App::new(
        settings("hello world", Some(Duration::from_secs(1))),
        WordList::embedded("english"),
        runner.sender(),
    );

    app.handle_event(key('h'), Instant::now());
    assert_eq!(app.session().remaining_secs(), 1);

    let deadline = Instant::now() + Duration::from_secs(10);
    let mut ticks = 0;
    while Instant::now() < deadline && !app.session().has_finished() {
        if let Some(ev) = runner.step() {
            if ev == AppEvent::Tick {
                ticks += 1;
            }
            app.handle_event(ev, Instant::now());
        }
    }

    assert!(app.session().has_finished(), "timed session should finish by timeout");
    assert!(ticks > 0);
    assert_eq!(app.session().remaining_secs(), 0);
    assert!(!app.countdown_active());

    let results = app.results().expect("results after finish");
    assert!(results.elapsed >= Duration::from_secs(1));
    assert_eq!(results.total_typed, 1);
}

#[test]
fn headless_reset_cancels_countdown() {
    let runner = Runner::new(
        TestEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut app = App::new(
        settings("a bb", None),
        WordList::embedded("english"),
        runner.sender(),
    );

    app.handle_event(key('a'), Instant::now());
    assert!(app.countdown_active());

    app.handle_event(
        AppEvent::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
        Instant::now(),
    );
    assert!(!app.countdown_active());

    // drain ticks queued before the reset; they leave the idle session alone
    while let Some(ev) = runner.step() {
        app.handle_event(ev, Instant::now());
    }
    assert_eq!(app.session().phase(), Phase::Idle);
    assert_eq!(app.session().remaining_secs(), 60);
    assert_eq!(app.session().total_typed(), 0);
}

#[test]
fn headless_paste_is_ignored() {
    let runner = Runner::new(
        TestEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    let mut app = App::new(
        settings("a bb", None),
        WordList::embedded("english"),
        runner.sender(),
    );

    app.handle_event(AppEvent::Paste("a bb".to_string()), Instant::now());

    assert_eq!(app.session().phase(), Phase::Idle);
    assert_eq!(app.session().input(), "");
}
