//! pokepager - browse PokeAPI one page of cards at a time

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokepager::action::Action;
use pokepager::api;
use pokepager::components::{Component, PageView, PageViewProps};
use pokepager::config::{ListingConfig, DEFAULT_LISTING_URL};
use pokepager::effect::Effect;
use pokepager::reducer::reducer;
use pokepager::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "pokepager")]
#[command(about = "Browse PokeAPI as pages of cards")]
struct Args {
    /// Listing endpoint of the first page
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    url: String,

    /// Items per page (sent as `limit`)
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    limit: Option<u32>,

    /// Index of the first item (sent as `offset`)
    #[arg(long, short)]
    offset: Option<u32>,

    /// Append logs to this file; filter with RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PagerComponentId {
    Page,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PagerContext {
    Main,
}

impl EventRoutingState<PagerComponentId, PagerContext> for AppState {
    fn focused(&self) -> Option<PagerComponentId> {
        Some(PagerComponentId::Page)
    }

    fn modal(&self) -> Option<PagerComponentId> {
        None
    }

    fn binding_context(&self, _id: PagerComponentId) -> PagerContext {
        PagerContext::Main
    }

    fn default_context(&self) -> PagerContext {
        PagerContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        url,
        limit,
        offset,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = log_file.as_deref() {
        init_logging(path)?;
    }

    let config = ListingConfig {
        base_url: url,
        limit,
        offset,
    };
    let root_url = match config.root_url() {
        Ok(url) => url,
        Err(error) => {
            eprintln!("Error: {error}");
            eprintln!("Example: --url {DEFAULT_LISTING_URL}");
            std::process::exit(2);
        }
    };
    tracing::info!(%root_url, "starting");

    let debug = DebugSession::new(debug_args);
    let mut state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(root_url))
        })
        .await
        .map_err(debug_error)?;
    if let Ok(size) = crossterm::terminal::size() {
        state.terminal_size = size;
    }

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("exiting");
    Ok(())
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pokepager=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(io::Error::other)
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let view = Rc::new(RefCell::new(PageView::new()));
    let mut bus: EventBus<AppState, Action, PagerComponentId, PagerContext> = EventBus::new();
    let keybindings: Keybindings<PagerContext> = Keybindings::new();

    let view_events = Rc::clone(&view);
    bus.register(PagerComponentId::Page, move |event, state| {
        let props = PageViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = view_events
            .borrow_mut()
            .handle_event(&event.kind, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                event_ctx.set_component_area(PagerComponentId::Page, area);
                let props = PageViewProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                view.borrow_mut().render(frame, area, props);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Run fetches as keyed tasks; a new task under the same key replaces the old one
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchListing { generation, url } => {
            ctx.tasks().spawn(TaskKey::new("listing"), async move {
                match api::fetch_listing(&url).await {
                    Ok(listing) => Action::ListingDidLoad {
                        generation,
                        listing,
                    },
                    Err(error) => Action::ListingDidError {
                        generation,
                        error: error.into(),
                    },
                }
            });
        }
        Effect::FetchDetail {
            generation,
            index,
            url,
        } => {
            let key = format!("detail_{index}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_detail(&url).await {
                    Ok(detail) => Action::DetailDidLoad {
                        generation,
                        index,
                        detail,
                    },
                    Err(error) => Action::DetailDidError {
                        generation,
                        index,
                        error: error.into(),
                    },
                }
            });
        }
    }
}
