//! App lifecycle and main loop: start samplers, own the terminal, fan events into the
//! dashboard state and draw on the redraw timer.

use std::future::Future;
use std::io;

use anyhow::{Context, Result};
use basicmon_sampler::{spawn_all, Lifecycle, SHUTDOWN_GRACE};
use crossterm::{
    event::{Event as TermEvent, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::{future, Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::dispatch::{apply, key_command, Action, Command, Dispatcher};
use crate::state::DashboardState;
use crate::ui::{self, ViewOptions};

/// The header timestamp only has second resolution.
pub const REDRAW_EVERY: Duration = Duration::from_secs(1);

pub struct App {
    settings: Settings,
    state: DashboardState,
    view: ViewOptions,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let view = ViewOptions {
            disk_path: settings.disk_path.display().to_string(),
            interface: settings.interface.clone(),
            show_processes: settings.show_processes,
        };
        Self {
            settings,
            state: DashboardState::default(),
            view,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut lifecycle = Lifecycle::new();
        let feeds = spawn_all(&self.settings.sampler_config(), &mut lifecycle);
        let mut dispatcher = Dispatcher::new(
            feeds,
            REDRAW_EVERY,
            terminal_commands(EventStream::new()),
            lifecycle.token(),
        );

        with_samplers(lifecycle, self.run_terminal(&mut dispatcher)).await
    }

    async fn run_terminal<I>(&mut self, dispatcher: &mut Dispatcher<I>) -> Result<()>
    where
        I: Stream<Item = Command> + Unpin,
    {
        // Terminal setup
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("enter alternate screen");
        }
        let backend = CrosstermBackend::new(stdout);
        let res = match Terminal::new(backend) {
            Ok(mut terminal) => {
                let res = self.event_loop(&mut terminal, dispatcher).await;
                let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
                let _ = terminal.show_cursor();
                res
            }
            Err(e) => {
                let mut stdout = io::stdout();
                let _ = execute!(stdout, LeaveAlternateScreen);
                Err(e).context("create terminal")
            }
        };

        // Teardown; a loop error takes precedence
        let restored = disable_raw_mode().context("disable raw mode");
        res.and(restored)
    }

    /// Apply events until quit or cancellation, drawing when asked to.
    pub async fn event_loop<B, I>(
        &mut self,
        terminal: &mut Terminal<B>,
        dispatcher: &mut Dispatcher<I>,
    ) -> Result<()>
    where
        B: ratatui::backend::Backend,
        I: Stream<Item = Command> + Unpin,
    {
        info!("dashboard started");
        while let Some(event) = dispatcher.next().await {
            match apply(&mut self.state, event) {
                Action::Continue => {}
                Action::Draw => {
                    terminal.draw(|f| ui::draw(f, &self.state, &self.view))?;
                }
                Action::Quit => {
                    debug!("quit requested");
                    break;
                }
            }
        }
        info!("dashboard stopped");
        Ok(())
    }
}

/// Run `body`, then stop the samplers whatever it returned.
pub async fn with_samplers<F>(lifecycle: Lifecycle, body: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let res = body.await;
    if !lifecycle.shutdown(SHUTDOWN_GRACE).await {
        warn!("exiting with samplers still running");
    }
    res
}

/// Keyboard input mapped to commands. A read error becomes `Quit`; in raw mode Ctrl-C
/// only ever arrives as input.
pub fn terminal_commands<S>(events: S) -> impl Stream<Item = Command> + Unpin
where
    S: Stream<Item = io::Result<TermEvent>> + Unpin,
{
    events.filter_map(|ev| {
        future::ready(match ev {
            Ok(TermEvent::Key(k)) => key_command(k),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "terminal input failed, quitting");
                Some(Command::Quit)
            }
        })
    })
}
