use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use clap::Parser;
use listing_core::{update, AppState, ListingViewModel, Msg, PageToken};
use listing_logging::{listing_info, listing_warn};

use super::config::{self, AppConfig, DEFAULT_CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::history::History;
use super::input::{self, Command, CommandError, HELP};
use super::logging;
use super::ui;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let options = LaunchOptions::parse();

    let (config, config_problem) = match config::load_config(&options.config_path) {
        Ok(Some(config)) => (config, None),
        Ok(None) => (AppConfig::default(), None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::initialize(&config.log);
    if let Some(err) = config_problem {
        listing_warn!("{}; using defaults", err);
    }

    let location = options
        .location
        .unwrap_or_else(|| config.start_location.clone());
    listing_info!("Starting at {} against {}", location, config.api_base_url);

    let runner = EffectRunner::new(config.fetch_settings(), History::new(location.clone()));
    let mut app = App::new(runner, config.viewport_rows, io::stdout());
    let input_rx = spawn_stdin_reader();

    writeln!(app.out, "{HELP}")?;
    app.dispatch(Msg::Init { location })?;

    loop {
        app.pump_engine()?;
        match input_rx.recv_timeout(TICK_INTERVAL) {
            Ok(line) => {
                if app.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => app.dispatch(Msg::Tick)?,
            Err(RecvTimeoutError::Disconnected) => {
                // Input closed; let the outstanding request land before exiting.
                if !app.is_loading() {
                    break;
                }
                thread::sleep(TICK_INTERVAL);
            }
        }
    }

    listing_info!("Exiting");
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Command-line flags for the terminal front end.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(about = "Browse the ideas listing from the terminal")]
struct LaunchOptions {
    /// RON configuration file; defaults apply when it does not exist.
    #[arg(long = "config", default_value = DEFAULT_CONFIG_FILENAME)]
    config_path: PathBuf,
    /// Location to open first, such as `/ideas?page=2&size=20`.
    #[arg(long)]
    location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Owns the controller instance and wires it to the terminal.
struct App<W: Write> {
    state: AppState,
    runner: EffectRunner,
    viewport_rows: u32,
    out: W,
}

impl<W: Write> App<W> {
    fn new(runner: EffectRunner, viewport_rows: u32, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            viewport_rows,
            out,
        }
    }

    fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let mut queue = VecDeque::from([msg]);
        let mut needs_draw = false;

        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            queue.extend(self.runner.run(effects));

            if self.state.consume_dirty() {
                needs_draw = true;
                let visible = ui::layout::visible_items(&self.state.view(), self.viewport_rows);
                if !visible.is_empty() {
                    queue.push_back(Msg::ItemsVisible(visible));
                }
            }
        }

        if needs_draw {
            let view = self.state.view();
            self.draw(&view)?;
        }
        Ok(())
    }

    fn pump_engine(&mut self) -> io::Result<()> {
        for msg in self.runner.poll() {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        match input::parse_command(line) {
            Ok(Command::Quit) => return Ok(Flow::Quit),
            Ok(command) => self.handle_command(command)?,
            Err(CommandError::Empty) => {}
            Err(err) => writeln!(self.out, "{err}. {HELP}")?,
        }
        Ok(Flow::Continue)
    }

    fn handle_command(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::NextPage => self.click_arrow(|token| matches!(token, PageToken::Next { .. })),
            Command::PreviousPage => {
                self.click_arrow(|token| matches!(token, PageToken::Previous { .. }))
            }
            Command::GoToPage(page) => self.dispatch(Msg::PageClicked(page)),
            Command::PageSize(size) => self.dispatch(Msg::PageSizeSelected(size)),
            Command::Sort(key) => self.dispatch(Msg::SortSelected(key)),
            Command::Back => self.navigate_history(true),
            Command::Forward => self.navigate_history(false),
            Command::Scroll(y) => self.dispatch(Msg::Scrolled { y }),
            Command::Nav(index) => self.dispatch(Msg::NavSelected(index)),
            Command::Quit => Ok(()),
        }
    }

    fn click_arrow(&mut self, is_arrow: impl Fn(&PageToken) -> bool) -> io::Result<()> {
        let target = self
            .state
            .view()
            .pagination
            .iter()
            .find(|token| is_arrow(token))
            .and_then(PageToken::target);
        match target {
            Some(page) => self.dispatch(Msg::PageClicked(page)),
            None => Ok(()),
        }
    }

    fn navigate_history(&mut self, back: bool) -> io::Result<()> {
        if self.is_loading() {
            return writeln!(self.out, "Still loading; try again in a moment.");
        }
        let history = self.runner.history_mut();
        let location = if back { history.back() } else { history.forward() };
        match location.map(str::to_string) {
            Some(location) => self.dispatch(Msg::HistoryNavigated { location }),
            None => {
                let direction = if back { "back to" } else { "forward to" };
                writeln!(self.out, "No page to go {direction}.")
            }
        }
    }

    fn draw(&mut self, view: &ListingViewModel) -> io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(60))?;
        for line in ui::render::render(view) {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "history: {} entries", self.runner.history().len())?;
        self.out.flush()
    }
}
