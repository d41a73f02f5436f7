// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named, ordered note collections shared by scales and chords.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Index;
use std::slice;

use super::note::Note;

/// A name plus an ordered list of notes.
///
/// Membership and equality are enharmonic: a sequence holding `Db`
/// contains `C#`.
#[derive(Debug, Clone)]
pub struct NoteSequence {
    name: String,
    notes: Vec<Note>,
}

impl NoteSequence {
    pub fn new(name: impl Into<String>, notes: Vec<Note>) -> Self {
        Self {
            name: name.into(),
            notes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn first(&self) -> Option<&Note> {
        self.notes.first()
    }

    pub fn iter(&self) -> slice::Iter<'_, Note> {
        self.notes.iter()
    }

    /// Check if a note is in this sequence (any octave, any spelling)
    pub fn contains(&self, note: &Note) -> bool {
        self.notes.iter().any(|n| n == note)
    }

    /// Distinct pitch classes, ignoring order and repeats
    pub fn pitch_classes(&self) -> BTreeSet<u8> {
        self.notes.iter().map(Note::pitch_class).collect()
    }

    /// Compare as unordered pitch-class sets
    pub fn same_pitch_classes(&self, other: &NoteSequence) -> bool {
        self.pitch_classes() == other.pitch_classes()
    }
}

/// Sequences are equal when they hold the same notes in the same order.
impl PartialEq for NoteSequence {
    fn eq(&self, other: &Self) -> bool {
        self.notes == other.notes
    }
}

impl Index<usize> for NoteSequence {
    type Output = Note;

    fn index(&self, index: usize) -> &Self::Output {
        &self.notes[index]
    }
}

impl<'a> IntoIterator for &'a NoteSequence {
    type Item = &'a Note;
    type IntoIter = slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

impl fmt::Display for NoteSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.notes.iter().map(Note::to_string).collect();
        write!(f, "{}: {}", self.name, names.join(" "))
    }
}
