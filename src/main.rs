use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use hotswap::timer::Timer;
use hotswap::{Hotswap, TracingDiagnostics, UpdateOutcome};
use tracing_subscriber::EnvFilter;

type Entry = extern "C" fn() -> i32;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let lib = args
        .next()
        .context("usage: hotswap <library> [symbol] [interval-ms]")?;
    let symbol = args.next().unwrap_or_else(|| "answer".to_owned());
    let interval = match args.next() {
        Some(ms) => ms
            .parse()
            .with_context(|| format!("invalid interval {ms:?}"))?,
        None => 100,
    };

    let term = Arc::new(AtomicBool::new(false));
    let sigint = signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&term))
        .context("cannot register SIGINT handler")?;

    // SAFETY: the user points us at a library whose `symbol` is an
    // `extern "C" fn() -> i32`, in every build of it.
    let mut entry = unsafe { Hotswap::<Entry>::new(&lib, symbol.as_str()) }
        .with_diagnostics(TracingDiagnostics);
    let mut timer = Timer::new(Duration::from_millis(interval));

    println!("[HOT] Watching {lib:?} for `{symbol}`");

    while !term.load(Ordering::Relaxed) {
        if timer.poll_interval() {
            match entry.update() {
                UpdateOutcome::Reloaded => match entry.call(()) {
                    Ok(value) => println!("[HOT] {symbol}() = {value}"),
                    Err(err) => eprintln!("[HOT] {err}"),
                },
                UpdateOutcome::Failed => eprintln!("[HOT] Reload failed, waiting for a new build"),
                _ => {}
            }
        }

        thread::sleep(timer.remaining().min(Duration::from_millis(50)));
    }

    signal_hook::low_level::unregister(sigint);
    drop(entry);
    println!("[HOT] Stopped");

    Ok(())
}
