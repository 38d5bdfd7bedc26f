use anyhow::{Result, bail};
use colored::Colorize;
use folio_motion::LoadingGate;
use folio_motion::loading::{GatePart, LoadingPhase};
use serde::Serialize;
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::diag::log_verbose;

pub const MAX_FPS: u32 = 240;

/// One sampled frame of the loading sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub frame: usize,
    pub time: f64,
    pub phase: String,
    pub percent: u8,
    pub bar_width: f64,
    pub overlay_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Completion {
    pub event: &'static str,
    pub time: f64,
    pub callbacks: u32,
    pub forced: bool,
}

/// Drive a fresh gate at a fixed frame rate until it completes.
pub fn sample(fps: u32) -> Result<(Vec<Sample>, Completion)> {
    if fps == 0 || fps > MAX_FPS {
        bail!("Frame rate must be between 1 and {} (got {})", MAX_FPS, fps);
    }
    let dt = 1.0 / f64::from(fps);

    let fired = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&fired);
    let mut gate = LoadingGate::new(move || counter.set(counter.get() + 1));
    let deadline = gate.watchdog_delay();
    log_verbose(&format!(
        "Gate runs {:.2}s, watchdog at {:.2}s",
        gate.duration(),
        deadline
    ));

    let mut last: HashMap<GatePart, f64> = HashMap::new();
    let mut samples = Vec::new();
    let mut time = 0.0;
    let mut step = 0.0;

    loop {
        let frame = gate.tick(step);
        for (part, visual) in &frame.visuals {
            let value = match part {
                GatePart::Bar => visual.width_percent.unwrap_or(0.0),
                _ => visual.opacity,
            };
            last.insert(*part, value);
        }
        samples.push(Sample {
            frame: samples.len(),
            time,
            phase: frame.state.phase.to_string(),
            percent: frame.state.progress_percent,
            bar_width: last.get(&GatePart::Bar).copied().unwrap_or(0.0),
            overlay_opacity: last.get(&GatePart::Overlay).copied().unwrap_or(1.0),
        });

        if frame.state.phase == LoadingPhase::Done {
            break;
        }
        if time >= deadline {
            break;
        }
        step = dt;
        time += dt;
    }

    let forced = gate.force_complete();
    if forced {
        log_verbose("Watchdog forced completion");
    }

    Ok((
        samples,
        Completion {
            event: "complete",
            time,
            callbacks: fired.get(),
            forced,
        },
    ))
}

pub fn run(fps: u32, json: bool) -> Result<()> {
    let (samples, completion) = sample(fps)?;

    if json {
        for sample in &samples {
            println!("{}", serde_json::to_string(sample)?);
        }
        println!("{}", serde_json::to_string(&completion)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("{:>5}  {:>7}  {:<9} {:>4}  {:>6}  {:>7}", "frame", "time", "phase", "pct", "bar", "overlay")
            .bold()
    );
    for s in &samples {
        println!(
            "{:>5}  {:>6.3}s  {:<9} {:>3}%  {:>5.1}%  {:>7.3}",
            s.frame, s.time, s.phase, s.percent, s.bar_width, s.overlay_opacity
        );
    }

    let summary = format!(
        "Loading complete at {:.2}s; completion fired {} time(s){}",
        completion.time,
        completion.callbacks,
        if completion.forced { " (forced by watchdog)" } else { "" }
    );
    println!("{}", summary.green());
    Ok(())
}
