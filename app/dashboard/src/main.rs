use std::io;
use std::io::Stdout;
use std::path::Path;
use std::time::Duration;

use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyEventKind;
use crossterm::event::poll;
use crossterm::event::read;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use framework::asset::asset_path;
use framework::exception::DevPulseResult;
use framework::json;
use framework::log;
use framework::task;
use framework::validation_error;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use serde::Deserialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use crate::api::EventApi;
use crate::app::App;
use crate::fetch::FetchResult;
use crate::fetch::Fetcher;

mod aggregate;
mod api;
mod app;
mod event;
mod fetch;
mod ui;

#[derive(Debug, Deserialize, Clone)]
struct AppConfig {
    api_base_url: String,
    log_path: String,
}

impl AppConfig {
    fn validate(&self) -> DevPulseResult<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(validation_error!(message = "api_base_url must be an http(s) url"));
        }
        Ok(())
    }
}

fn main() -> DevPulseResult<()> {
    let config: AppConfig = json::load_file(&asset_path("assets/conf.json")?)?;
    config.validate()?;
    log::init_with_file(Path::new(&config.log_path))?;
    info!("dashboard started, api={}", config.api_base_url);

    // fetch tasks run on this runtime while the terminal loop stays synchronous
    let runtime = tokio::runtime::Runtime::new()?;
    let result = {
        let _guard = runtime.enter();
        let (fetcher, results) = Fetcher::new(EventApi::new(config.api_base_url));
        let mut app = App::new(fetcher);

        let mut terminal = setup_terminal()?;
        let result = run(&mut terminal, &mut app, results);
        restore_terminal(&mut terminal)?;
        result
    };
    let drained = runtime.block_on(tokio::time::timeout(Duration::from_secs(3), task::shutdown()));
    if drained.is_err() {
        info!("fetch task(s) still in flight, aborting");
    }
    runtime.shutdown_timeout(Duration::from_secs(1));
    info!("dashboard stopped");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    mut results: UnboundedReceiver<FetchResult>,
) -> DevPulseResult<()> {
    app.activate();
    let tick = Duration::from_millis(250);
    loop {
        while let Ok(result) = results.try_recv() {
            app.on_fetch_result(result);
        }
        terminal.draw(|frame| ui::draw(frame, app))?;
        if poll(tick)? {
            match read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    app.on_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

fn setup_terminal() -> DevPulseResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> DevPulseResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
