mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};

use typesprint::{
    app::{App, Settings},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    words::WordList,
};

/// sixty second typing test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed typing test: type the random passage as far as you can before the clock runs out, then see your words per minute and accuracy."
)]
pub struct Cli {
    /// number of seconds to run test
    #[clap(short = 's', long)]
    number_of_secs: Option<u64>,

    /// number of words in the generated passage
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// custom prompt to use instead of random words
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// JSON word list of the form {"words": [...]} to draw from
    #[clap(long)]
    words: Option<PathBuf>,

    /// seed the passage generator for a reproducible passage
    #[clap(long)]
    seed: Option<u64>,

    /// write the effective settings to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Flags win over the config file
    fn apply(&self, mut config: Config) -> Config {
        if let Some(secs) = self.number_of_secs {
            config.number_of_secs = secs;
        }
        if let Some(words) = self.number_of_words {
            config.number_of_words = words;
        }
        if let Some(path) = &self.words {
            config.words_file = Some(path.clone());
        }
        config
    }

    fn to_settings(&self, config: Config) -> Settings {
        Settings {
            config,
            prompt: self.prompt.clone(),
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = match logging::init_file_logging(&AppDirs::log_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("logging disabled: {e}");
            None
        }
    };

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        tracing::info!(path = %store.path().display(), "config saved");
    }

    let words = WordList::load(config.words_file.as_deref());
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(config.tick_interval()),
    );
    let mut app = App::new(cli.to_settings(config), words, runner.sender());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal loop failed");
    }
    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(app, f))?;

    while !app.should_quit {
        if let Some(event) = runner.step() {
            app.handle_event(event, Instant::now());
        }
        terminal.draw(|f| ui::draw(app, f))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::time::Duration;
    use typesprint::runtime::{AppEvent, TestEventSource};

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["typesprint"]);

        assert_eq!(cli.number_of_secs, None);
        assert_eq!(cli.number_of_words, None);
        assert_eq!(cli.prompt, None);
        assert_eq!(cli.words, None);
        assert_eq!(cli.seed, None);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "typesprint",
            "-s",
            "30",
            "-w",
            "25",
            "-p",
            "hello world",
            "--words",
            "/tmp/w.json",
            "--seed",
            "7",
            "--save-config",
        ]);

        assert_eq!(cli.number_of_secs, Some(30));
        assert_eq!(cli.number_of_words, Some(25));
        assert_eq!(cli.prompt.as_deref(), Some("hello world"));
        assert_eq!(cli.words, Some(PathBuf::from("/tmp/w.json")));
        assert_eq!(cli.seed, Some(7));
        assert!(cli.save_config);
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from(["typesprint", "--number-of-secs", "120", "--number-of-words", "50"]);
        assert_eq!(cli.number_of_secs, Some(120));
        assert_eq!(cli.number_of_words, Some(50));
    }

    #[test]
    fn test_cli_apply_overrides_config() {
        let file = Config {
            number_of_secs: 45,
            number_of_words: 80,
            tick_rate_ms: 50,
            words_file: None,
        };

        let cli = Cli::parse_from(["typesprint", "-s", "15", "--words", "w.json"]);
        let config = cli.apply(file.clone());

        assert_eq!(config.number_of_secs, 15);
        assert_eq!(config.number_of_words, 80);
        assert_eq!(config.tick_rate_ms, 50);
        assert_eq!(config.words_file, Some(PathBuf::from("w.json")));

        let untouched = Cli::parse_from(["typesprint"]).apply(file.clone());
        assert_eq!(untouched, file);
    }

    #[test]
    fn test_cli_rejects_bad_numbers() {
        assert!(Cli::try_parse_from(["typesprint", "-s", "-3"]).is_err());
        assert!(Cli::try_parse_from(["typesprint", "-w", "lots"]).is_err());
    }

    #[test]
    fn test_start_tui_runs_until_quit() {
        let runner = Runner::new(
            TestEventSource::new(),
            FixedTicker::new(Duration::from_millis(5)),
        );
        let tx = runner.sender();
        let cli = Cli::parse_from(["typesprint", "-p", "hi there"]);
        let mut app = App::new(
            cli.to_settings(cli.apply(Config::default())),
            WordList::embedded("english"),
            runner.sender(),
        );

        for c in "hi".chars() {
            tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
                .unwrap();
        }
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        start_tui(&mut terminal, &mut app, &runner).unwrap();

        assert!(app.should_quit);
        assert_eq!(app.session().input(), "hi");
    }
}
