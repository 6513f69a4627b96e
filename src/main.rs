mod ui;

use brainrule::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    explain::{request_explanation, ExplainError, Explainer, GeminiExplainer},
    hint::HintLevel,
    keymap::action_for,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::{Effect, Session, SessionSettings},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use env_logger::Env;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    sync::{mpsc::Sender, Arc},
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// memorize any rule by typing it from memory with graduated hints
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal memorization trainer: enter a rule, read a kid-friendly AI explanation, then retype the rule from memory with five hint levels and live character-level feedback."
)]
pub struct Cli {
    /// rule to start practicing right away
    #[clap(short = 'r', long)]
    rule: Option<String>,

    /// initial hint level
    #[clap(long, value_enum)]
    hint: Option<HintLevel>,

    /// start with error highlighting switched off
    #[clap(long)]
    no_highlight: bool,

    /// skip AI explanations and go straight to practice
    #[clap(long)]
    offline: bool,

    /// model used for explanations
    #[clap(long)]
    model: Option<String>,

    /// write the effective settings to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command line overrides on top of the stored config
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(level) = self.hint {
            config.hint_level = level;
        }
        if self.no_highlight {
            config.highlight_errors = false;
        }
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        config
    }
}

pub struct App {
    pub session: Session,
    explainer: Option<Arc<dyn Explainer>>,
    /// Tick counter driving the waiting animation
    pub ticks: usize,
}

impl App {
    pub fn new(config: &Config, explainer: Option<Arc<dyn Explainer>>) -> Self {
        let settings = SessionSettings {
            hint_level: config.hint_level,
            highlight_errors: config.highlight_errors,
            explanations: explainer.is_some(),
        };

        Self {
            session: Session::new(settings),
            explainer,
            ticks: 0,
        }
    }

    /// Carry out a session effect. Returns false when the app should exit.
    fn perform(&mut self, effect: Effect, tx: &Sender<AppEvent>) -> bool {
        match effect {
            Effect::None => true,
            Effect::Quit => false,
            Effect::RequestExplanation { request, rule } => {
                match self.explainer {
                    Some(ref explainer) => {
                        request_explanation(Arc::clone(explainer), request, rule, tx.clone())
                    }
                    None => {
                        self.session
                            .receive_explanation(request, Err(ExplainError::NotConfigured));
                    }
                }
                true
            }
        }
    }

    /// Feed one runtime event into the session. Returns false on quit.
    fn handle_event(&mut self, event: AppEvent, tx: &Sender<AppEvent>) -> bool {
        match event {
            AppEvent::Tick => {
                self.ticks = self.ticks.wrapping_add(1);
                true
            }
            AppEvent::Resize => true,
            AppEvent::Key(key) => match action_for(self.session.step(), key) {
                Some(action) => {
                    let effect = self.session.apply(action);
                    self.perform(effect, tx)
                }
                None => true,
            },
            AppEvent::Explained { request, outcome } => {
                self.session.receive_explanation(request, outcome);
                true
            }
        }
    }
}

fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    // The terminal belongs to the TUI, so logs only ever go to the file
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn build_explainer(cli: &Cli, config: &Config) -> Option<Arc<dyn Explainer>> {
    if cli.offline {
        log::info!("offline mode, explanations disabled");
        return None;
    }
    match GeminiExplainer::from_env(config) {
        Ok(explainer) => Some(Arc::new(explainer)),
        Err(e) => {
            log::warn!("explanations disabled: {e}");
            None
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        store.save(&config)?;
        log::info!("settings saved to {}", store.path().display());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let explainer = build_explainer(&cli, &config);
    let mut app = App::new(&config, explainer);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app, cli.rule.as_deref());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    initial_rule: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let tx = runner.sender();

    if let Some(rule) = initial_rule {
        let effect = app.session.start_with_rule(rule);
        app.perform(effect, &tx);
    }

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        if !app.handle_event(runner.step(), &tx) {
            break;
        }
    }

    Ok(())
}
