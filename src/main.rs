mod app;
mod cli;
mod input;
mod jokes;
mod log;
mod storage;
mod tui;
mod ui;

use std::{io, panic, sync::Arc, sync::Mutex};

use lazy_static::lazy_static;

use crate::{
    app::App,
    jokes::{
        source::{DemoJokeSource, HttpJokeSource},
        JokeSource, JokeStore,
    },
    log::LogLevel,
    storage::{BlackholeStorage, FileStorage, InMemoryStorage, Storage},
    tui::events::TuiEvents,
    ui::backtrace::PanicData,
};

lazy_static! {
    static ref PANIC: Mutex<Option<PanicData>> = Mutex::new(None);
}

fn prepare_panic_capture() {
    panic::set_hook(Box::new(|info| {
        if let Ok(mut panic) = PANIC.lock() {
            panic.replace(PanicData::capture(info));
        }
    }));
}

fn create_storage(args: &cli::Args) -> Box<dyn Storage> {
    if !args.persist {
        return BlackholeStorage::new();
    }

    match args.data_dir.clone().or_else(FileStorage::default_dir) {
        Some(dir) => {
            crate::info!("Saving jokes to {}", dir.display());
            Box::new(FileStorage::new(dir))
        }
        None => {
            crate::warn!("No data directory available; jokes will not be saved");
            Box::new(InMemoryStorage::new())
        }
    }
}

fn create_source(args: &cli::Args) -> io::Result<Arc<dyn JokeSource>> {
    if args.demo {
        if args.count > DemoJokeSource::capacity() {
            crate::warn!(
                "Only {} demo jokes exist; can't show {}",
                DemoJokeSource::capacity(),
                args.count
            );
        }
        return Ok(Arc::new(DemoJokeSource));
    }

    Ok(Arc::new(HttpJokeSource::new(args.endpoint.clone())?))
}

fn run(args: cli::Args) -> io::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let store = JokeStore::new(create_storage(&args), args.count, args.max_fetches);
    let state = app::State::new(store, create_source(&args)?);

    let ui = tui::create_ui()?;
    let mut app = App::new(state, ui);
    let mut events = TuiEvents::default();
    let result = app::looper::app_loop(&mut app, &mut events);

    // Restore the terminal before anything gets printed
    drop(app);

    result
}

fn main() {
    let args = cli::args();
    prepare_panic_capture();

    let result = panic::catch_unwind(|| run(args));

    if let Ok(mut captured) = PANIC.lock() {
        if let Some(panic) = captured.take() {
            tui::restore_terminal().ok();
            eprintln!("{}", panic);
            std::process::exit(101);
        }
    }

    for entry in log::recent(10) {
        if entry.0 != LogLevel::Info {
            eprintln!("{}", entry);
        }
    }

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("ERR: {}", e);
            std::process::exit(1);
        }
        Err(_) => std::process::exit(101),
    }
}
