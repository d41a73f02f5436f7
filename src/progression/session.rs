// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Per-session editing state.
//!
//! A [`Session`] owns the song being edited, which progression is current,
//! how chords are entered, and the selected scale. Front ends create one per
//! user session and pass it to their handlers; nothing here is global.
//! Every action either succeeds completely or leaves the session untouched.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{check_index, Progression, Song};
use crate::error::ProgressionError;
use crate::music::{AlteredNote, Chord, ChordType, Note, Scale};

/// How chord roots are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    /// Any root note
    #[default]
    Free,
    /// Roots picked by degree of the selected scale
    Generic,
}

/// Where a requested chord's root comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChordRoot {
    Note(Note),
    /// 1-based degree of the session scale
    Degree(u8),
}

/// Plain chord parameters as collected by a front end
#[derive(Debug, Clone, PartialEq)]
pub struct ChordRequest {
    pub root: ChordRoot,
    pub chord_type: ChordType,
    pub slash: Option<Note>,
    pub inversion: u8,
    pub extensions: Vec<u8>,
    pub altered: Vec<AlteredNote>,
}

impl ChordRequest {
    pub fn new(root: Note, chord_type: ChordType) -> Self {
        Self::with_root(ChordRoot::Note(root), chord_type)
    }

    pub fn on_degree(degree: u8, chord_type: ChordType) -> Self {
        Self::with_root(ChordRoot::Degree(degree), chord_type)
    }

    fn with_root(root: ChordRoot, chord_type: ChordType) -> Self {
        Self {
            root,
            chord_type,
            slash: None,
            inversion: 0,
            extensions: Vec::new(),
            altered: Vec::new(),
        }
    }

    /// Build the chord. Degree roots need `scale`.
    pub fn resolve(&self, scale: Option<&Scale>) -> Result<Chord, ProgressionError> {
        let root = match self.root {
            ChordRoot::Note(note) => note,
            ChordRoot::Degree(degree) => {
                let scale = scale.ok_or(ProgressionError::NoScaleSelected)?;
                scale.get_interval(degree)?.without_octave()
            }
        };

        let chord = Chord::builder(root, self.chord_type)
            .slash(self.slash)
            .inversion(self.inversion)
            .extensions(self.extensions.iter().copied())
            .altered_notes(self.altered.iter().copied())
            .build()?;
        Ok(chord)
    }
}

impl From<&Chord> for ChordRequest {
    fn from(chord: &Chord) -> Self {
        Self {
            root: ChordRoot::Note(chord.root()),
            chord_type: chord.chord_type(),
            slash: chord.slash(),
            inversion: chord.inversion(),
            extensions: chord.extensions().to_vec(),
            altered: Vec::new(),
        }
    }
}

/// Editing context for one user
#[derive(Debug, Clone)]
pub struct Session {
    song: Song,
    current: usize,
    input_method: InputMethod,
    scale: Option<Scale>,
}

impl Session {
    /// New session with one empty progression
    pub fn new(song_name: impl Into<String>) -> Self {
        Self::with_song(Song::new(song_name))
    }

    /// Session over an existing song. An empty song gets one progression.
    pub fn with_song(mut song: Song) -> Self {
        if song.is_empty() {
            song.add_progression(Progression::new("Progression 1"));
        }
        Self {
            song,
            current: 0,
            input_method: InputMethod::default(),
            scale: None,
        }
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn into_song(self) -> Song {
        self.song
    }

    pub fn input_method(&self) -> InputMethod {
        self.input_method
    }

    pub fn set_input_method(&mut self, input_method: InputMethod) {
        self.input_method = input_method;
    }

    pub fn scale(&self) -> Option<&Scale> {
        self.scale.as_ref()
    }

    pub fn set_scale(&mut self, scale: Scale) {
        info!(scale = %scale, "scale selected");
        self.scale = Some(scale);
    }

    pub fn clear_scale(&mut self) {
        self.scale = None;
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_progression(&self) -> &Progression {
        &self.song.progressions()[self.current]
    }

    fn current_mut(&mut self) -> &mut Progression {
        &mut self.song.progressions[self.current]
    }

    /// Add an empty progression and make it current
    pub fn new_progression(&mut self, name: impl Into<String>) -> usize {
        self.current = self.song.add_progression(Progression::new(name));
        info!(index = self.current, "progression added");
        self.current
    }

    pub fn select_progression(&mut self, index: usize) -> Result<(), ProgressionError> {
        check_index(index, self.song.len())?;
        self.current = index;
        Ok(())
    }

    /// Remove a progression. Removing the last one leaves an empty one behind.
    pub fn remove_progression(&mut self, index: usize) -> Result<Progression, ProgressionError> {
        let removed = self.song.remove_progression(index)?;
        if self.song.is_empty() {
            self.song.add_progression(Progression::new("Progression 1"));
        }
        if self.current >= self.song.len() || self.current > index {
            self.current = self.current.saturating_sub(1).min(self.song.len() - 1);
        }
        info!(name = removed.name(), "progression removed");
        Ok(removed)
    }

    /// Build a chord and append it to the current progression
    pub fn submit_chord(&mut self, request: &ChordRequest) -> Result<&Chord, ProgressionError> {
        let chord = self.build(request)?;
        info!(chord = %chord, "chord added");
        let progression = self.current_mut();
        progression.append(chord);
        Ok(&progression.chords()[progression.len() - 1])
    }

    /// Rebuild the chord at `index` from new parameters, returning the old one
    pub fn update_chord(
        &mut self,
        index: usize,
        request: &ChordRequest,
    ) -> Result<Chord, ProgressionError> {
        check_index(index, self.current_progression().len())?;
        let chord = self.build(request)?;
        self.current_mut().update(index, chord)
    }

    pub fn remove_chord(&mut self, index: usize) -> Result<Chord, ProgressionError> {
        self.current_mut().remove(index).inspect_err(|e| {
            warn!(error = %e, "remove rejected");
        })
    }

    pub fn move_chord(&mut self, from: usize, to: usize) -> Result<(), ProgressionError> {
        self.current_mut().move_chord(from, to)
    }

    /// Which chords of the current progression fit the selected scale
    pub fn diatonic_flags(&self) -> Option<Vec<bool>> {
        let scale = self.scale.as_ref()?;
        Some(
            self.current_progression()
                .chords()
                .iter()
                .map(|c| c.is_diatonic(scale))
                .collect(),
        )
    }

    fn build(&self, request: &ChordRequest) -> Result<Chord, ProgressionError> {
        request.resolve(self.scale.as_ref()).inspect_err(|e| {
            warn!(error = %e, "chord rejected");
        })
    }
}
