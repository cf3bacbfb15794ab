//! slotgrid headless demo.
//!
//! Builds a bounded-pool panel and a windowed panel from a config file
//! (first CLI argument, TOML or JSON) or the defaults, then replays a
//! scripted input sequence against each and logs the resulting focus
//! signals. Run with `RUST_LOG=trace` to see every slot bind.

mod console;
mod script;

use std::rc::Rc;

use anyhow::{Context, Result};

use console::{ConsoleTemplate, FadeHooks, Tile, tiles};
use script::{Step, replay};
use slotgrid_types::config::GridConfig;
use slotgrid_types::input::{Direction, Interrupt};
use slotgrid_ui::controller::GridController;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GridConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => GridConfig::default(),
    };
    log::info!(
        "Starting slotgrid demo ({} columns, {:?} edges)",
        config.pool.columns,
        config.edge_policy,
    );

    run_pooled(&config)?;
    run_windowed(&config)?;
    Ok(())
}

fn run_pooled(config: &GridConfig) -> Result<()> {
    let mut panel = GridController::pooled_with_transitions(
        config,
        ConsoleTemplate::new("apps"),
        FadeHooks::new(120),
    )?;

    let mut first = tiles("App", 12);
    first[3] = Rc::new(Tile::disabled("App 3 (locked)"));
    let second = tiles("Game", 7);

    let mut steps = vec![Step::Refresh {
        items: first,
        reset_selection: true,
        direction: 0,
    }];
    steps.extend(Step::hold(Direction::Right, 700));
    steps.push(Step::press(Direction::Down));
    steps.push(Step::release(Direction::Down));
    steps.push(Step::interrupt(Interrupt::InputLockEngaged));
    steps.push(Step::press(Direction::Left));
    steps.push(Step::interrupt(Interrupt::InputLockReleased));
    steps.push(Step::Refresh {
        items: second,
        reset_selection: false,
        direction: 1,
    });
    steps.push(Step::Wait(200));
    steps.extend(Step::hold(Direction::Down, 500));
    steps.push(Step::press(Direction::Up));
    steps.push(Step::release(Direction::Up));

    let summary = replay("apps", &mut panel, steps);
    log::info!("[apps] done: {summary:?}");
    Ok(())
}

fn run_windowed(config: &GridConfig) -> Result<()> {
    let mut panel = GridController::windowed(config, ConsoleTemplate::new("library"))?;
    if let Some(window) = panel.grid_mut().as_windowed_mut() {
        let extent = window.initialize(tiles("Track", 10_000));
        log::info!("[library] content extent {extent}");
    }

    let row = f64::from(config.window.row_height());
    let mut steps = vec![Step::press(Direction::Down)];
    steps.push(Step::release(Direction::Down));
    steps.extend(Step::hold(Direction::Down, 1_000));
    steps.push(Step::Scroll(row * 400.0));
    steps.push(Step::Scroll(0.0));
    steps.push(Step::Select(9_999));
    steps.push(Step::press(Direction::Down));
    steps.push(Step::release(Direction::Down));

    let summary = replay("library", &mut panel, steps);
    log::info!("[library] done: {summary:?}");
    Ok(())
}
