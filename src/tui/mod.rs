pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::app::{AppContext, Result};
use crate::store::Store;
use crate::sync::{SyncOutcome, SyncPhase};

use self::app::{Mode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Messages from background sync tasks, drained by the UI loop. Sync work
/// never touches UI state directly.
enum SyncMessage {
    Phase(SyncPhase),
    Done {
        manual: bool,
        result: std::result::Result<SyncOutcome, String>,
    },
}

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::unbounded_channel();

    let sync_interval = Duration::from_secs(ctx.config.sync.interval_secs);
    let progress_hold = Duration::from_secs(ctx.config.sync.progress_hold_secs);
    let mut last_periodic = Instant::now();

    load_posts(&mut tui_app, &ctx)?;

    loop {
        terminal.draw(|frame| layout::render(frame, &tui_app))?;

        while let Ok(message) = rx.try_recv() {
            handle_sync_message(&mut tui_app, &ctx, message, progress_hold)?;
        }

        match event_handler.next()? {
            AppEvent::Key(key) => match tui_app.mode {
                Mode::Normal => handle_normal_key(&mut tui_app, &ctx, key.into(), &tx)?,
                Mode::Search => handle_search_key(&mut tui_app, key.code),
                Mode::Add => handle_add_key(&mut tui_app, &ctx, key.code)?,
            },
            AppEvent::Tick => {}
        }

        // Periodic background sync, same engine as the manual download.
        if last_periodic.elapsed() >= sync_interval {
            last_periodic = Instant::now();
            spawn_sync(ctx.clone(), tx.clone(), false);
        }

        tui_app.maybe_reset_progress(Instant::now());

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_sync_message(
    tui_app: &mut TuiApp,
    ctx: &Arc<AppContext>,
    message: SyncMessage,
    progress_hold: Duration,
) -> Result<()> {
    match message {
        SyncMessage::Phase(phase) => {
            tui_app.progress = Some(phase.percent());
        }
        SyncMessage::Done { manual, result } => {
            if manual {
                tui_app.is_downloading = false;
            }
            match result {
                Ok(SyncOutcome::Updated { rows }) => {
                    load_posts(tui_app, ctx)?;
                    tui_app.last_synced_at = Some(chrono::Utc::now());
                    tui_app.set_status(format!("Synced {} posts", rows));
                    if manual {
                        hold_gauge(tui_app, progress_hold);
                    }
                }
                Ok(SyncOutcome::Unchanged) => {
                    tui_app.last_synced_at = Some(chrono::Utc::now());
                    if manual {
                        tui_app.set_status("Already up to date".to_string());
                        hold_gauge(tui_app, progress_hold);
                    }
                }
                Ok(SyncOutcome::AlreadyRunning) => {
                    if manual {
                        tui_app.set_status("A sync is already in progress".to_string());
                        tui_app.progress = None;
                    }
                }
                Err(e) => {
                    // Gauge intentionally left at its last checkpoint.
                    tracing::error!("sync failed: {}", e);
                    if manual {
                        tui_app.set_status(format!("Sync failed: {}", e));
                    }
                }
            }
        }
    }
    Ok(())
}

fn hold_gauge(tui_app: &mut TuiApp, progress_hold: Duration) {
    tui_app.progress = Some(100);
    tui_app.progress_reset_at = Some(Instant::now() + progress_hold);
}

fn handle_normal_key(
    tui_app: &mut TuiApp,
    ctx: &Arc<AppContext>,
    action: Action,
    tx: &UnboundedSender<SyncMessage>,
) -> Result<()> {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => {
            tui_app.move_up();
        }
        Action::MoveDown => {
            tui_app.move_down();
        }
        Action::Refresh => {
            load_posts(tui_app, ctx)?;
            tui_app.set_status(format!("Reloaded {} posts", tui_app.posts.len()));
        }
        Action::Download => {
            if !tui_app.is_downloading {
                tui_app.is_downloading = true;
                tui_app.progress = Some(0);
                tui_app.progress_reset_at = None;
                tui_app.clear_status();
                spawn_sync(ctx.clone(), tx.clone(), true);
            }
        }
        Action::Add => {
            tui_app.open_add_dialog();
        }
        Action::Delete => {
            if let Some(post) = tui_app.selected_post() {
                let id = post.id;
                ctx.store.delete_post(id)?;
                load_posts(tui_app, ctx)?;
                tui_app.set_status(format!("Removed post {}", id));
            }
        }
        Action::Search => {
            tui_app.mode = Mode::Search;
        }
        Action::None => {}
    }
    Ok(())
}

fn handle_search_key(tui_app: &mut TuiApp, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Enter => {
            tui_app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            tui_app.filter.pop();
            tui_app.clamp_selection();
        }
        KeyCode::Char(c) => {
            tui_app.filter.push(c);
            tui_app.selected = 0;
        }
        _ => {}
    }
}

fn handle_add_key(tui_app: &mut TuiApp, ctx: &Arc<AppContext>, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Esc => {
            tui_app.mode = Mode::Normal;
        }
        KeyCode::Tab | KeyCode::Down => {
            tui_app.dialog.field = tui_app.dialog.field.next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            tui_app.dialog.field = tui_app.dialog.field.prev();
        }
        KeyCode::Enter => match tui_app.dialog.to_new_post() {
            Ok(post) => {
                let id = ctx.store.insert_post(&post)?;
                load_posts(tui_app, ctx)?;
                tui_app.mode = Mode::Normal;
                tui_app.set_status(format!("Added post {}", id));
            }
            Err(message) => {
                tui_app.set_status(message);
            }
        },
        KeyCode::Backspace => {
            tui_app.dialog.active_value_mut().pop();
        }
        KeyCode::Char(c) => {
            tui_app.dialog.active_value_mut().push(c);
        }
        _ => {}
    }
    Ok(())
}

fn spawn_sync(ctx: Arc<AppContext>, tx: UnboundedSender<SyncMessage>, manual: bool) {
    tokio::spawn(async move {
        let result = if manual {
            let phase_tx = tx.clone();
            ctx.sync
                .run_with(move |phase| {
                    let _ = phase_tx.send(SyncMessage::Phase(phase));
                })
                .await
        } else {
            ctx.sync.run().await
        };

        let _ = tx.send(SyncMessage::Done {
            manual,
            result: result.map_err(|e| e.to_string()),
        });
    });
}

fn load_posts(tui_app: &mut TuiApp, ctx: &AppContext) -> Result<()> {
    tui_app.set_posts(ctx.store.all_posts()?);
    Ok(())
}
