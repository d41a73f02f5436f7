// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use anyhow::{anyhow, Context, Result};
use chordsmith::config::{Settings, SongFile};
use chordsmith::music::{Chord, ChordType, Note, Scale};
use chordsmith::progression::ProgressionSuggester;
use std::env;

fn print_usage() {
    println!("Chordsmith - Chord Progression Workbench");
    println!();
    println!("Usage: chordsmith [--settings <FILE>] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --scale <ROOT> <SCALE> [MODE]      Show the notes of a scale");
    println!("  --chord <ROOT> <TYPE> [INV|/BASS]  Build a chord (inversion 0-3 or slash bass)");
    println!("  --harmonize <ROOT> <SCALE> [MODE]  List the chords that fit each degree");
    println!("  --suggest <ROOT> <SCALE> [MODE]    Suggest a progression in a key");
    println!("  --song <FILE>                      Load a YAML song file and show it");
    println!("  --help                             Show this help message");
    println!();
    println!("Examples:");
    println!("  chordsmith --scale D major dorian");
    println!("  chordsmith --chord C maj7 1");
    println!("  chordsmith --chord C major /G");
}

/// Pull `--settings <FILE>` out of the argument list
fn take_settings(args: &mut Vec<String>) -> Result<Settings> {
    let Some(pos) = args.iter().position(|a| a == "--settings") else {
        return Ok(Settings::default());
    };
    if pos + 1 >= args.len() {
        return Err(anyhow!("--settings requires a file path"));
    }
    let path = args.remove(pos + 1);
    args.remove(pos);
    Settings::load(&path)
}

fn scale_from_args(args: &[String], command: &str) -> Result<Scale> {
    if args.len() < 2 {
        return Err(anyhow!("{} requires a root and a scale", command));
    }
    let mode = args.get(2).map(String::as_str);
    Scale::from_names(&args[0], &args[1], mode)
        .with_context(|| format!("Invalid scale: {}", args.join(" ")))
}

fn note_names(notes: &[Note]) -> String {
    notes.iter().map(Note::to_string).collect::<Vec<_>>().join(" ")
}

fn show_scale(scale: &Scale) {
    println!("{}", scale);
    println!("  {}", note_names(scale.notes()));
    if let Some(relative) = scale.relative() {
        println!("  relative: {}", relative);
    }
    if let Some(parallel) = scale.parallel() {
        println!("  parallel: {}", parallel);
    }
}

fn show_chord(args: &[String], settings: &Settings) -> Result<()> {
    if args.len() < 2 {
        return Err(anyhow!("--chord requires a root and a chord type"));
    }
    let root = Note::parse(&args[0]).with_context(|| format!("Invalid root: {}", args[0]))?;
    let chord_type: ChordType = args[1]
        .parse()
        .with_context(|| format!("Invalid chord type: {}", args[1]))?;

    let mut builder = Chord::builder(root, chord_type);
    if let Some(option) = args.get(2) {
        builder = match option.strip_prefix('/') {
            Some(bass) => builder.slash(
                Note::parse(bass).with_context(|| format!("Invalid slash note: {}", bass))?,
            ),
            None => builder.inversion(
                option
                    .parse()
                    .map_err(|_| anyhow!("Invalid inversion: {}", option))?,
            ),
        };
    }
    let chord = builder.build()?;

    println!("{}", chord.to_symbol(settings.alt_symbols));
    println!("  {}", note_names(chord.notes()));
    Ok(())
}

fn harmonize(scale: &Scale, settings: &Settings) -> Result<()> {
    println!("{}", scale);
    for degree in 1..=scale.degree_count() as u8 {
        let symbols: Vec<String> = scale
            .harmonize(degree)?
            .iter()
            .map(|c| c.to_symbol(settings.alt_symbols))
            .collect();
        println!("  {}: {}", degree, symbols.join(", "));
    }
    Ok(())
}

fn suggest(scale: &Scale, settings: &Settings) -> Result<()> {
    let suggester = match settings.seed {
        Some(seed) => ProgressionSuggester::with_seed(settings.suggest_mode, seed),
        None => ProgressionSuggester::new(settings.suggest_mode),
    };
    let progression = suggester
        .sevenths(settings.sevenths)
        .suggest(scale, settings.suggest_length)?;
    println!("{}", progression.name());
    println!("  {}", progression.symbols(settings.alt_symbols).join(" | "));
    Ok(())
}

fn show_song(path: &str, settings: &Settings) -> Result<()> {
    let file = SongFile::load(path)?;
    let session = file.to_session()?;
    let song = session.song();
    let scale = session.scale().ok_or_else(|| anyhow!("Song has no key"))?;

    println!("{} (key: {})", song.name(), scale);
    for progression in song.progressions() {
        let symbols: Vec<String> = progression
            .chords()
            .iter()
            .map(|chord| {
                let symbol = chord.to_symbol(settings.alt_symbols);
                if chord.is_diatonic(scale) {
                    symbol
                } else {
                    format!("{}*", symbol)
                }
            })
            .collect();
        println!("  {}: {}", progression.name(), symbols.join(" | "));
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let settings = take_settings(&mut args)?;

    tracing_subscriber::fmt()
        .with_max_level(settings.level()?)
        .with_writer(std::io::stderr)
        .init();

    if args.is_empty() {
        println!("Chordsmith - Chord Progression Workbench");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let rest = &args[1..];
    match args[0].as_str() {
        "--scale" => {
            show_scale(&scale_from_args(rest, "--scale")?);
        }
        "--chord" => {
            show_chord(rest, &settings)?;
        }
        "--harmonize" => {
            harmonize(&scale_from_args(rest, "--harmonize")?, &settings)?;
        }
        "--suggest" => {
            suggest(&scale_from_args(rest, "--suggest")?, &settings)?;
        }
        "--song" => {
            let Some(path) = rest.first() else {
                eprintln!("Error: --song requires a file path");
                std::process::exit(1);
            };
            show_song(path, &settings)?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[0]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
