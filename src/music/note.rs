// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled notes.
//!
//! A [`Note`] keeps its letter and accidental separately so that F# and Gb
//! stay distinct when displayed, while comparing equal as pitch classes.
//! The octave is optional; notes parsed without one stay octave-less
//! through transposition.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::interval::Interval;
use crate::error::TheoryError;

/// Letter names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters starting from C
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitones above C for the natural note
    pub fn semitone(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position within C..B
    pub fn index(self) -> usize {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Letter at a position, wrapping every seven
    pub fn from_index(index: usize) -> Self {
        Letter::ALL[index % 7]
    }

    /// Parse a letter (case insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    /// The natural letter sounding at a pitch class, if any
    fn natural_at(pitch_class: u8) -> Option<Self> {
        Letter::ALL
            .iter()
            .copied()
            .find(|letter| letter.semitone() == pitch_class)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        };
        write!(f, "{}", c)
    }
}

/// A spelled note with an optional octave.
///
/// Equality and hashing use the pitch class only, so `C#` == `Db` and
/// `C3` == `C5`. Use [`Note::same_octave`] when the octave matters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note {
    letter: Letter,
    accidental: i8,
    octave: Option<i8>,
}

impl Note {
    /// Create a note from a letter and accidental offset (+1 sharp, -1 flat)
    pub fn new(letter: Letter, accidental: i8) -> Self {
        Self {
            letter,
            accidental,
            octave: None,
        }
    }

    /// Create a natural note
    pub fn natural(letter: Letter) -> Self {
        Self::new(letter, 0)
    }

    /// Copy of this note placed in an octave (MIDI convention, C4 = 60)
    pub fn with_octave(self, octave: i8) -> Self {
        Self {
            octave: Some(octave),
            ..self
        }
    }

    /// Copy of this note with the octave dropped
    pub fn without_octave(self) -> Self {
        Self {
            octave: None,
            ..self
        }
    }

    /// Parse a note name such as "C", "f#", "Bb3", "Ebb" or "Gx-1"
    pub fn parse(name: &str) -> Result<Self, TheoryError> {
        let invalid = || TheoryError::InvalidNoteName(name.to_string());
        let trimmed = name.trim();

        let mut chars = trimmed.char_indices().peekable();
        let (_, first) = chars.next().ok_or_else(invalid)?;
        let letter = Letter::from_char(first).ok_or_else(invalid)?;

        let mut accidental: i8 = 0;
        let mut rest_start = trimmed.len();
        while let Some(&(i, c)) = chars.peek() {
            let delta: i8 = match c {
                '#' | '♯' | 's' => 1,
                'x' | '𝄪' => 2,
                'b' | '♭' => -1,
                _ => {
                    rest_start = i;
                    break;
                }
            };
            // Sharps and flats cannot be mixed
            if accidental != 0 && accidental.signum() != delta.signum() {
                return Err(invalid());
            }
            accidental += delta;
            if accidental.abs() > 2 {
                return Err(invalid());
            }
            chars.next();
        }

        let rest = &trimmed[rest_start..];
        let octave = if rest.is_empty() {
            None
        } else {
            Some(rest.parse::<i8>().map_err(|_| invalid())?)
        };

        Ok(Self {
            letter,
            accidental,
            octave,
        })
    }

    /// The commonly used root spellings, in chromatic order
    pub fn common_roots() -> Vec<Note> {
        [
            "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#",
            "Bb", "B",
        ]
        .iter()
        .filter_map(|name| Note::parse(name).ok())
        .collect()
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn accidental(&self) -> i8 {
        self.accidental
    }

    pub fn octave(&self) -> Option<i8> {
        self.octave
    }

    /// Get the pitch class (0-11)
    pub fn pitch_class(&self) -> u8 {
        (self.letter.semitone() as i32 + self.accidental as i32).rem_euclid(12) as u8
    }

    /// MIDI note number when the octave is known (may fall outside 0-127)
    pub fn midi(&self) -> Option<i32> {
        self.octave.map(|octave| {
            (octave as i32 + 1) * 12 + self.letter.semitone() as i32 + self.accidental as i32
        })
    }

    /// Compare including the octave.
    ///
    /// Notes without octaves only match other octave-less notes.
    pub fn same_octave(&self, other: &Note) -> bool {
        match (self.midi(), other.midi()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.pitch_class() == other.pitch_class(),
            _ => false,
        }
    }

    /// Ascending interval in semitones to another note (0-11)
    pub fn semitones_to(&self, other: &Note) -> u8 {
        (other.pitch_class() as i16 - self.pitch_class() as i16).rem_euclid(12) as u8
    }

    /// Transpose by semitones.
    ///
    /// Whole octaves keep the spelling. Otherwise the result is a natural
    /// when one fits, else a sharp (or a flat when this note is flat).
    /// Fails with `PitchOutOfRange` when the octave would leave `i8`.
    pub fn transpose(&self, semitones: i32) -> Result<Note, TheoryError> {
        if semitones % 12 == 0 {
            return Ok(Note {
                octave: self.shift_octave(semitones / 12)?,
                ..*self
            });
        }

        let target = (self.pitch_class() as i32 + semitones).rem_euclid(12) as u8;
        let (letter, accidental) = match Letter::natural_at(target) {
            Some(letter) => (letter, 0),
            None if self.accidental < 0 => (Self::letter_at(target + 1), -1),
            None => (Self::letter_at(target + 11), 1),
        };

        // Whole octaves moved, measured from this note's letter to the new one
        let natural_distance = letter.semitone() as i32 + accidental as i32
            - self.letter.semitone() as i32
            - self.accidental as i32;
        let octaves = (semitones as i64 - natural_distance as i64).div_euclid(12);

        Ok(Note {
            letter,
            accidental,
            octave: self.shift_octave_wide(octaves)?,
        })
    }

    /// Transpose by a named interval, keeping the letter spelling
    pub fn transpose_interval(&self, interval: Interval) -> Result<Note, TheoryError> {
        self.spelled(interval.steps(), interval.semitones())
    }

    /// Move `steps` letters and `semitones` semitones, fixing the accidental
    /// so the letter lands on the requested pitch.
    pub(crate) fn spelled(&self, steps: i32, semitones: i32) -> Result<Note, TheoryError> {
        let index = self.letter.index() as i32 + steps;
        let letter = Letter::from_index(index.rem_euclid(7) as usize);
        let carry = index.div_euclid(7);

        let natural_distance =
            letter.semitone() as i32 + 12 * carry - self.letter.semitone() as i32;
        let accidental = i8::try_from(self.accidental as i32 + semitones - natural_distance)
            .map_err(|_| {
                TheoryError::PitchOutOfRange(format!("{} moved by {} semitones", self, semitones))
            })?;

        Ok(Note {
            letter,
            accidental,
            octave: self.shift_octave(carry)?,
        })
    }

    fn shift_octave(&self, octaves: i32) -> Result<Option<i8>, TheoryError> {
        self.shift_octave_wide(octaves as i64)
    }

    fn shift_octave_wide(&self, octaves: i64) -> Result<Option<i8>, TheoryError> {
        self.octave
            .map(|octave| {
                i8::try_from(octave as i64 + octaves).map_err(|_| {
                    TheoryError::PitchOutOfRange(format!("{} shifted by {} octaves", self, octaves))
                })
            })
            .transpose()
    }

    /// The note name without octave (e.g. "F#", "Bbb")
    pub fn name(&self) -> String {
        let symbol = if self.accidental >= 0 { "#" } else { "b" };
        format!(
            "{}{}",
            self.letter,
            symbol.repeat(self.accidental.unsigned_abs() as usize)
        )
    }

    fn letter_at(pitch_class: u8) -> Letter {
        Letter::natural_at(pitch_class % 12).unwrap_or(Letter::C)
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.pitch_class() == other.pitch_class()
    }
}

impl Eq for Note {}

impl Hash for Note {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pitch_class().hash(state);
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Note::parse(s)
    }
}

impl TryFrom<String> for Note {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Note::parse(&value)
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.octave {
            Some(octave) => write!(f, "{}{}", self.name(), octave),
            None => write!(f, "{}", self.name()),
        }
    }
}
