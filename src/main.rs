use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use plotpick::error_display::{user_message_from_report, user_message_from_session, Operation};
use plotpick::image_export::save_images;
use plotpick::request::DatasetHandle;
use plotpick::telemetry::{init_tracing, LogTarget};
use plotpick::{
    App, AppConfig, AppEvent, Args, CacheManager, ChartBackend, ConfigManager, HttpBackend,
    SessionState, Theme, APP_NAME,
};
use ratatui::DefaultTerminal;
use std::path::Path;
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

fn render(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    terminal.draw(|frame| frame.render_widget(app, frame.area()))?;
    Ok(())
}

fn run(
    mut terminal: DefaultTerminal,
    args: &Args,
    config: AppConfig,
    backend: Arc<dyn ChartBackend>,
) -> Result<()> {
    let theme = Theme::from_config(&config.theme)?;
    let (tx, rx) = channel::<AppEvent>();
    let mut app = App::new_with_config(tx.clone(), backend, theme, config);
    if args.debug {
        app.enable_debug();
    }
    app.prefill_selections(&args.graphs);
    render(&mut terminal, &mut app)?;
    if let Some(path) = &args.path {
        tx.send(AppEvent::OpenDataset(path.clone()))?;
        tx.send(AppEvent::FetchCatalog)?;
    }

    let mut last_tick = Instant::now();
    loop {
        if crossterm::event::poll(Duration::from_millis(25))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => tx.send(AppEvent::Key(key))?,
                crossterm::event::Event::Resize(cols, rows) => {
                    tx.send(AppEvent::Resize(cols, rows))?
                }
                _ => {}
            }
        }

        let mut updated = match rx.recv_timeout(Duration::from_millis(0)) {
            Ok(event) => {
                match event {
                    AppEvent::Exit => break,
                    AppEvent::Crash(msg) => {
                        return Err(eyre!(msg));
                    }
                    event => {
                        if let Some(event) = app.event(event) {
                            tx.send(event)?;
                        }
                    }
                }
                true
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => false,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        };

        // Animate the throbber only while a request is in flight
        if app.is_busy() && last_tick.elapsed() >= TICK_INTERVAL {
            app.event(AppEvent::Tick);
            last_tick = Instant::now();
            updated = true;
        }

        if updated {
            render(&mut terminal, &mut app)?;
        }
    }
    Ok(())
}

/// `--list`: print every catalog label for the dataset.
fn list_catalog(path: &Path, backend: &dyn ChartBackend) -> Result<()> {
    let mut session = SessionState::new();
    session.set_dataset(DatasetHandle::open(path)?)?;
    session
        .fetch_catalog(backend)
        .map_err(|e| eyre!(user_message_from_session(&e, Operation::FetchCatalog)))?;
    for entry in session.catalog() {
        println!("{}", entry.label());
    }
    Ok(())
}

/// `--batch`: fetch, compose the `--graph` labels, generate and print every result.
fn run_batch(
    path: &Path,
    args: &Args,
    config: &AppConfig,
    backend: &dyn ChartBackend,
) -> Result<()> {
    let mut session = SessionState::new();
    session.set_dataset(DatasetHandle::open(path)?)?;
    let entries = session
        .fetch_catalog(backend)
        .map_err(|e| eyre!(user_message_from_session(&e, Operation::FetchCatalog)))?;
    info!(entries, "catalog fetched");

    for label in &args.graphs {
        let index = session.add_selection();
        session.update_selection(index, label)?;
    }
    session
        .generate(backend)
        .map_err(|e| eyre!(user_message_from_session(&e, Operation::Generate)))?;

    for unit in session.display_units() {
        for line in unit.lines() {
            println!("{}", line);
        }
        println!();
    }

    let image_dir = args.save_images.as_ref().or(config.export.image_dir.as_ref());
    if let Some(dir) = image_dir {
        if let Some(results) = session.results() {
            let summary = save_images(results, dir)
                .map_err(|e| eyre!(user_message_from_report(&e, Some(dir.as_path()))))?;
            eprintln!("{}", summary);
        }
    }
    Ok(())
}

fn handle_early_exit_flags(args: &Args) -> Result<Option<()>> {
    if args.generate_config {
        let manager = ConfigManager::new(APP_NAME)?;
        match manager.write_default_config(args.force) {
            Ok(path) => {
                println!("Configuration written to {}", path.display());
                return Ok(Some(()));
            }
            Err(e) => {
                eprintln!("Error generating config: {}", e);
                std::process::exit(1);
            }
        }
    }

    if args.clear_cache {
        match CacheManager::new(APP_NAME) {
            Ok(cache) => {
                match cache.clear_all() {
                    Ok(count) => println!("Cache cleared successfully ({} file(s))", count),
                    Err(e) => {
                        eprintln!("Error clearing cache: {}", e);
                        std::process::exit(1);
                    }
                }
                return Ok(Some(()));
            }
            Err(_e) => {
                println!("No cache to clear");
                return Ok(Some(()));
            }
        }
    }

    Ok(None)
}

/// Config file, then command-line overrides.
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = AppConfig::load(APP_NAME)?;
    if let Some(server) = &args.server {
        config.server.base_url = server.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        config.server.timeout_secs = Some(timeout);
    }
    if let Some(dir) = &args.save_images {
        config.export.image_dir = Some(dir.clone());
    }
    if args.debug {
        config.debug.enabled = true;
    }
    config.validate()?;
    Ok(config)
}

fn log_target(args: &Args, config: &AppConfig) -> LogTarget {
    if args.list || args.batch {
        return LogTarget::Stderr;
    }
    let path = config.logging.file.clone().unwrap_or_else(|| {
        CacheManager::new(APP_NAME)
            .map(|cache| cache.cache_file(plotpick::cache::LOG_FILE))
            .unwrap_or_else(|_| std::env::temp_dir().join(plotpick::cache::LOG_FILE))
    });
    LogTarget::File(path)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(()) = handle_early_exit_flags(&args)? {
        return Ok(());
    }

    color_eyre::install()?;
    let config = load_config(&args)?;
    init_tracing(
        &log_target(&args, &config),
        args.log_level.as_deref(),
        &config.logging,
    )?;

    let backend = HttpBackend::new(&config.server)?;
    info!(
        catalog = backend.catalog_url(),
        generate = backend.generate_url(),
        "chart server endpoints"
    );

    if args.list || args.batch {
        let Some(path) = &args.path else {
            return Err(eyre!("A dataset path is required with --list and --batch"));
        };
        let result = if args.list {
            list_catalog(path, &backend)
        } else {
            run_batch(path, &args, &config, &backend)
        };
        if let Err(e) = result {
            error!(error = %e, "run failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = run(terminal, &args, config, Arc::new(backend));
    ratatui::restore();
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
