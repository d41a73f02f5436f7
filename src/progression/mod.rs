// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord progressions and songs.
//!
//! A [`Progression`] is an ordered list of built chords; a [`Song`] holds
//! several progressions. Interactive editing goes through a [`Session`].

pub mod session;
pub mod suggest;

pub use session::{ChordRequest, ChordRoot, InputMethod, Session};
pub use suggest::{ProgressionSuggester, SuggestMode};

use std::fmt;

use crate::error::ProgressionError;
use crate::music::{Chord, Scale};

fn check_index(index: usize, len: usize) -> Result<(), ProgressionError> {
    if index < len {
        Ok(())
    } else {
        Err(ProgressionError::IndexOutOfRange { index, len })
    }
}

/// An ordered, named list of chords
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Progression {
    name: String,
    chords: Vec<Chord>,
}

impl Progression {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chords: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn append(&mut self, chord: Chord) {
        self.chords.push(chord);
    }

    /// Insert before `index`; `index == len` appends
    pub fn insert(&mut self, index: usize, chord: Chord) -> Result<(), ProgressionError> {
        check_index(index, self.chords.len() + 1)?;
        self.chords.insert(index, chord);
        Ok(())
    }

    /// Replace the chord at `index`, returning the old one
    pub fn update(&mut self, index: usize, chord: Chord) -> Result<Chord, ProgressionError> {
        check_index(index, self.chords.len())?;
        Ok(std::mem::replace(&mut self.chords[index], chord))
    }

    pub fn remove(&mut self, index: usize) -> Result<Chord, ProgressionError> {
        check_index(index, self.chords.len())?;
        Ok(self.chords.remove(index))
    }

    /// Move a chord so it ends up at position `to`
    pub fn move_chord(&mut self, from: usize, to: usize) -> Result<(), ProgressionError> {
        check_index(from, self.chords.len())?;
        check_index(to, self.chords.len())?;
        let chord = self.chords.remove(from);
        self.chords.insert(to, chord);
        Ok(())
    }

    pub fn symbols(&self, use_alt: bool) -> Vec<String> {
        self.chords.iter().map(|c| c.to_symbol(use_alt)).collect()
    }

    /// True if every chord is diatonic to `scale`
    pub fn is_diatonic(&self, scale: &Scale) -> bool {
        self.chords.iter().all(|c| c.is_diatonic(scale))
    }
}

impl fmt::Display for Progression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.symbols(false).join(" | "))
    }
}

/// A named collection of progressions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Song {
    name: String,
    progressions: Vec<Progression>,
}

impl Song {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            progressions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn progressions(&self) -> &[Progression] {
        &self.progressions
    }

    pub fn progression(&self, index: usize) -> Option<&Progression> {
        self.progressions.get(index)
    }

    pub fn progression_mut(&mut self, index: usize) -> Option<&mut Progression> {
        self.progressions.get_mut(index)
    }

    /// Add a progression, returning its index
    pub fn add_progression(&mut self, progression: Progression) -> usize {
        self.progressions.push(progression);
        self.progressions.len() - 1
    }

    pub fn remove_progression(&mut self, index: usize) -> Result<Progression, ProgressionError> {
        check_index(index, self.progressions.len())?;
        Ok(self.progressions.remove(index))
    }

    pub fn len(&self) -> usize {
        self.progressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.progressions.is_empty()
    }

    /// Total number of chords across all progressions
    pub fn chord_count(&self) -> usize {
        self.progressions.iter().map(Progression::len).sum()
    }
}
