// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for chordsmith.
//!
//! This module loads song files (YAML) describing a key and a set of
//! chord progressions, and shell settings (TOML). Files are read only;
//! nothing here writes back to disk.

pub mod settings;

pub use settings::Settings;

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::music::{AlteredNote, ChordType, Note, Scale};
use crate::progression::{ChordRequest, ChordRoot, Progression, Session, Song};

/// Root configuration for a song
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SongFile {
    /// Song metadata and key
    pub song: SongConfig,
    /// Progression definitions
    #[serde(default)]
    pub progressions: Vec<ProgressionConfig>,
}

impl SongFile {
    /// Load a song configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read song file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a song configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML song file")
    }

    /// The song's key as a scale
    pub fn scale(&self) -> Result<Scale> {
        let song = &self.song;
        Scale::from_names(&song.key, &song.scale, song.mode.as_deref()).with_context(|| {
            format!(
                "Invalid key for song {:?}: {} {} {}",
                song.name,
                song.key,
                song.scale,
                song.mode.as_deref().unwrap_or("")
            )
        })
    }

    /// Build every chord. Degree entries are resolved against the song's key.
    pub fn to_song(&self) -> Result<Song> {
        let scale = self.scale()?;
        let mut song = Song::new(&self.song.name);

        for progression in &self.progressions {
            let mut built = Progression::new(&progression.name);
            for (i, entry) in progression.chords.iter().enumerate() {
                let chord = entry
                    .to_request()
                    .and_then(|request| {
                        request.resolve(Some(&scale)).map_err(anyhow::Error::from)
                    })
                    .with_context(|| {
                        format!("Progression {:?}, chord {}", progression.name, i + 1)
                    })?;
                built.append(chord);
            }
            song.add_progression(built);
        }

        info!(
            song = song.name(),
            progressions = song.len(),
            chords = song.chord_count(),
            "loaded song"
        );
        Ok(song)
    }

    /// A session over the loaded song with the song's key selected
    pub fn to_session(&self) -> Result<Session> {
        let mut session = Session::with_song(self.to_song()?);
        session.set_scale(self.scale()?);
        Ok(session)
    }
}

/// Song-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SongConfig {
    /// Song name
    pub name: String,
    /// Key root (e.g., "C", "D", "F#")
    #[serde(default = "default_key")]
    pub key: String,
    /// Scale type or mode name (e.g., "major", "harmonic_minor", "dorian")
    #[serde(default = "default_scale")]
    pub scale: String,
    /// Mode of `scale`, by name or number
    #[serde(default)]
    pub mode: Option<String>,
}

fn default_key() -> String {
    "C".to_string()
}
fn default_scale() -> String {
    "major".to_string()
}

impl Default for SongConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            key: default_key(),
            scale: default_scale(),
            mode: None,
        }
    }
}

/// A named list of chords
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressionConfig {
    pub name: String,
    #[serde(default)]
    pub chords: Vec<ChordEntry>,
}

/// One chord. Exactly one of `root` or `degree` must be given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChordEntry {
    #[serde(default)]
    pub root: Option<String>,
    /// 1-based degree of the song's key
    #[serde(default)]
    pub degree: Option<u8>,
    /// Chord type name or symbol (e.g., "minor", "maj7", "7")
    #[serde(rename = "type", default = "default_chord_type")]
    pub chord_type: String,
    #[serde(default)]
    pub slash: Option<String>,
    #[serde(default)]
    pub inversion: u8,
    #[serde(default)]
    pub extensions: Vec<u8>,
    #[serde(default)]
    pub altered: Vec<AlteredNote>,
}

fn default_chord_type() -> String {
    "major".to_string()
}

impl ChordEntry {
    /// Convert to chord parameters, parsing every name
    pub fn to_request(&self) -> Result<ChordRequest> {
        let root = match (&self.root, self.degree) {
            (Some(name), None) => ChordRoot::Note(parse_note(name)?),
            (None, Some(degree)) => ChordRoot::Degree(degree),
            (Some(_), Some(_)) => bail!("Chord has both a root and a degree"),
            (None, None) => bail!("Chord needs a root or a degree"),
        };
        let chord_type: ChordType = self
            .chord_type
            .parse()
            .with_context(|| format!("Invalid chord type {:?}", self.chord_type))?;
        let slash = self.slash.as_deref().map(parse_note).transpose()?;

        Ok(ChordRequest {
            root,
            chord_type,
            slash,
            inversion: self.inversion,
            extensions: self.extensions.clone(),
            altered: self.altered.clone(),
        })
    }
}

fn parse_note(name: &str) -> Result<Note> {
    Note::parse(name).with_context(|| format!("Invalid note {:?}", name))
}
