// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

use earlab::config::PracticeConfig;
use earlab::generators::{Melody, MelodyComposer};
use earlab::music::note_frequency;
use earlab::pitch::ScriptedPitch;
use earlab::practice::{PracticeSession, SessionSettings};
use earlab::timing::ManualClock;

const DEFAULT_CONFIG: &str = "config.yml";

fn print_usage() {
    println!("earlab - Ear-training melody generator");
    println!();
    println!("Usage: earlab <MODE> [OPTIONS]");
    println!();
    println!("Modes:");
    println!("  --piece                 Generate phrases over the selected song's progression");
    println!("  --intervals             Generate an interval drill");
    println!();
    println!("Options:");
    println!("  --config <PATH>         Configuration file (default {})", DEFAULT_CONFIG);
    println!("  --seed <N>              Seed the generator for a reproducible melody");
    println!("  --simulate              Run a practice session that sings every note");
    println!("  --help                  Show this help message");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=debug) to control log output.");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Piece,
    Intervals,
}

struct Options {
    mode: Mode,
    config_path: PathBuf,
    seed: Option<u64>,
    simulate: bool,
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut mode = None;
    let mut config_path = PathBuf::from(DEFAULT_CONFIG);
    let mut seed = None;
    let mut simulate = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--piece" => mode = Some(Mode::Piece),
            "--intervals" => mode = Some(Mode::Intervals),
            "--simulate" => simulate = true,
            "--config" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                config_path = PathBuf::from(path);
            }
            "--seed" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| anyhow!("--seed requires a number"))?;
                seed = Some(
                    value
                        .parse()
                        .map_err(|_| anyhow!("Invalid seed: {}", value))?,
                );
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(anyhow!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let mode = mode.ok_or_else(|| anyhow!("Choose a mode: --piece or --intervals"))?;
    Ok(Some(Options {
        mode,
        config_path,
        seed,
        simulate,
    }))
}

fn compose(options: &Options, config: &PracticeConfig) -> Result<Melody> {
    let mut composer = match options.seed {
        Some(seed) => MelodyComposer::with_seed(seed),
        None => MelodyComposer::new(),
    };

    let melody = match options.mode {
        Mode::Piece => {
            let progression = config
                .selected_progression()
                .context("Failed to resolve chord progression")?;
            println!("Song: {}", config.piece_practice.selected_song);
            composer.generate_phrases(&progression)?
        }
        Mode::Intervals => {
            let interval = &config.interval_practice;
            println!("Interval: {} {:?}", interval.interval, interval.direction);
            composer.generate_interval_practice(interval.num_problems, config.interval_semitones())?
        }
    };
    Ok(melody)
}

/// Drive a session on a manual clock with a detector that sings each
/// target note exactly, printing every step.
fn simulate(melody: Melody, settings: SessionSettings, config: &PracticeConfig) -> Result<()> {
    let clock = ManualClock::new();
    let step = settings
        .auto_advance
        .map_or(settings.note_hold_duration, |auto| {
            auto.max(settings.note_hold_duration)
        });
    let notes = melody.note_count();
    let frame = vec![0.0f32; config.audio.buffer_len()];
    let mut detector = ScriptedPitch::default();
    let mut session = PracticeSession::start_with_clock(melody, settings, clock.clone())?;

    for _ in 0..notes {
        let target = session.current_note();
        let hz = note_frequency(target, 4);
        detector.push(hz);
        detector.push(hz);

        if let Some(onset) = session.process_audio(&mut detector, &frame) {
            trace!(note = %target, remaining = onset.result.remaining_time, "note onset");
        }
        clock.advance(step);
        let feedback = session
            .process_audio(&mut detector, &frame)
            .ok_or_else(|| anyhow!("session stopped unexpectedly"))?;

        debug!(note = %target, correct = feedback.result.is_correct, "simulated note");
        if let Some(advance) = feedback.advance {
            println!(
                "  phrase {:>2} note {:>2}: sang {:<2} ok",
                advance.from.phrase_index + 1,
                advance.from.note_index + 1,
                target
            );
            if let Some(row) = advance.scored {
                println!("  {}", row);
            }
        }
    }

    session.stop();
    let results = session.results();
    if let Some(accuracy) = results.accuracy() {
        println!(
            "Scored {} notes: {} pass, {} fail ({:.0}%)",
            results.len(),
            results.pass_count(),
            results.fail_count(),
            accuracy * 100.0
        );
    }
    info!(notes, "simulation complete");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("earlab - Ear-training melody generator");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let config = PracticeConfig::load_or_default(&options.config_path)?;
    let melody = compose(&options, &config)?;
    print!("{}", melody);

    if options.simulate {
        let settings = match options.mode {
            Mode::Piece => config.piece_session_settings()?,
            Mode::Intervals => config.interval_session_settings()?,
        };
        println!();
        println!("Simulating practice session...");
        simulate(melody, settings, &config)?;
    }

    Ok(())
}
