// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale generation and modal derivation.
//!
//! A [`ScaleMode`] names a base scale type plus a mode degree; its formula
//! is found by rotating the base offsets rather than being stored per mode.
//! Generated scales repeat the root one octave up as their last note, which
//! [`Scale::get_interval`] accounts for when reaching past the octave.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::chord::{diatonic_chords, Chord};
use super::interval::Interval;
use super::note::Note;
use super::sequence::NoteSequence;
use super::tables::{tables, ChordType, Formula, ScaleType};
use crate::error::TheoryError;

/// A base scale type and which of its modes to use (1 = the base scale)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaleMode {
    scale_type: ScaleType,
    mode: u8,
}

impl ScaleMode {
    pub const IONIAN: ScaleMode = ScaleMode::new(ScaleType::Major, 1);
    pub const DORIAN: ScaleMode = ScaleMode::new(ScaleType::Major, 2);
    pub const PHRYGIAN: ScaleMode = ScaleMode::new(ScaleType::Major, 3);
    pub const LYDIAN: ScaleMode = ScaleMode::new(ScaleType::Major, 4);
    pub const MIXOLYDIAN: ScaleMode = ScaleMode::new(ScaleType::Major, 5);
    pub const AEOLIAN: ScaleMode = ScaleMode::new(ScaleType::Major, 6);
    pub const LOCRIAN: ScaleMode = ScaleMode::new(ScaleType::Major, 7);

    /// Mode `mode` of `scale_type`. Checked when the formula is resolved.
    pub const fn new(scale_type: ScaleType, mode: u8) -> Self {
        Self { scale_type, mode }
    }

    /// The unrotated base scale
    pub const fn base(scale_type: ScaleType) -> Self {
        Self::new(scale_type, 1)
    }

    /// Resolve a mode of `scale_type` by name ("Dorian") or number ("2")
    pub fn named(scale_type: ScaleType, name: &str) -> Result<Self, TheoryError> {
        let degree_count = tables().scale_formula(scale_type)?.len();
        let unknown = || TheoryError::UnknownMode(format!("{} of {}", name.trim(), scale_type));

        let mode = match name.trim().parse::<u8>() {
            Ok(number) => number,
            Err(_) => {
                let wanted = normalize(name);
                let index = scale_type
                    .mode_names()
                    .iter()
                    .position(|mode_name| normalize(mode_name) == wanted)
                    .ok_or_else(unknown)?;
                index as u8 + 1
            }
        };

        if mode == 0 || mode as usize > degree_count {
            return Err(unknown());
        }
        Ok(Self::new(scale_type, mode))
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    pub fn mode(&self) -> u8 {
        self.mode
    }

    /// Resolve the rotated formula for this mode
    pub fn formula(&self) -> Result<Formula, TheoryError> {
        find_formula_for_mode(self.scale_type, self.mode)
    }

    /// Generate this mode anchored at `root`
    pub fn generate(&self, root: Note) -> Result<Scale, TheoryError> {
        let formula = self.formula()?;
        let mut scale = generate_scale(root, &formula)?;
        scale.mode = Some(*self);
        Ok(scale)
    }

    /// Mode name, or "<Base> mode N" when the mode has no common name
    pub fn name(&self) -> String {
        mode_name(self.scale_type, self.mode)
    }
}

impl FromStr for ScaleMode {
    type Err = TheoryError;

    /// Accepts base scale names ("harmonic minor") and mode names
    /// ("dorian", "phrygian dominant", "minor").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(scale_type) = s.parse::<ScaleType>() {
            return Ok(Self::base(scale_type));
        }
        find_mode(s).map_err(|_| TheoryError::UnknownScaleType(s.to_string()))
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn mode_name(scale_type: ScaleType, mode: u8) -> String {
    if mode == 1 {
        return scale_type.name().to_string();
    }
    match scale_type.mode_names().get(mode as usize - 1) {
        Some(name) => name.to_string(),
        None => format!("{} mode {}", scale_type.name(), mode),
    }
}

/// Find a named mode across every base scale type
pub fn find_mode(name: &str) -> Result<ScaleMode, TheoryError> {
    let wanted = normalize(name);
    match wanted.as_str() {
        "minor" | "naturalminor" => return Ok(ScaleMode::AEOLIAN),
        "superlocrian" => return Ok(ScaleMode::new(ScaleType::MelodicMinor, 7)),
        _ => {}
    }

    ScaleType::ALL
        .iter()
        .find_map(|&scale_type| {
            scale_type
                .mode_names()
                .iter()
                .position(|mode_name| normalize(mode_name) == wanted)
                .map(|index| ScaleMode::new(scale_type, index as u8 + 1))
        })
        .ok_or_else(|| TheoryError::UnknownMode(name.trim().to_string()))
}

/// Formula for mode `mode` (1-based) of `scale_type`.
///
/// The base offsets are rotated to start at the requested degree and
/// re-measured from that degree, so mode 2 of Major gives Dorian
/// `[0, 2, 3, 5, 7, 9, 10]`.
pub fn find_formula_for_mode(scale_type: ScaleType, mode: u8) -> Result<Formula, TheoryError> {
    let base = tables().scale_formula(scale_type)?;
    if mode == 0 || mode as usize > base.len() {
        return Err(TheoryError::UnknownMode(format!(
            "mode {} of {}",
            mode, scale_type
        )));
    }
    Ok(rotate(base, mode, mode_name(scale_type, mode)))
}

fn rotate(formula: &Formula, mode: u8, name: String) -> Formula {
    let offsets = formula.offsets();
    let start = mode as usize - 1;
    let anchor = offsets[start];

    let rotated = (0..offsets.len())
        .map(|i| (offsets[(start + i) % offsets.len()] + 12 - anchor) % 12)
        .collect();

    Formula::trusted(name, rotated)
}

/// Build a scale by applying `formula` to `root`.
///
/// Seven-degree formulas are spelled on successive letters; others are
/// spelled by interval size, never reusing the previous degree's interval
/// number (a tritone after a fourth is a diminished fifth). Degree 1 is
/// `root` itself and the root is repeated one octave up at the end.
pub fn generate_scale(root: Note, formula: &Formula) -> Result<Scale, TheoryError> {
    let heptatonic = formula.len() == 7;

    let mut notes = Vec::with_capacity(formula.len() + 1);
    let mut previous = 1;
    for (degree, &offset) in formula.offsets().iter().enumerate() {
        let next = if degree == 0 {
            root
        } else if heptatonic {
            root.spelled(degree as i32, offset as i32)?
        } else {
            match Interval::from_semitones_after(offset as i32, previous) {
                Some(interval) => {
                    previous = interval.number();
                    root.transpose_interval(interval)?
                }
                None => root.transpose(offset as i32)?,
            }
        };
        notes.push(next);
    }
    notes.push(root.transpose(12)?);

    let name = format!("{} {}", root.name(), formula.name());
    debug!(scale = %name, degrees = formula.len(), "generated scale");

    Ok(Scale {
        root,
        formula: formula.clone(),
        mode: None,
        sequence: NoteSequence::new(name, notes),
    })
}

/// A generated scale
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Note,
    formula: Formula,
    mode: Option<ScaleMode>,
    sequence: NoteSequence,
}

impl Scale {
    /// Create a scale from a root and mode
    pub fn new(root: Note, mode: ScaleMode) -> Result<Self, TheoryError> {
        mode.generate(root)
    }

    /// Parse a scale from strings (e.g. "D", "major", Some("dorian")).
    ///
    /// Without a mode, `scale` may itself be a mode name ("lydian").
    pub fn from_names(root: &str, scale: &str, mode: Option<&str>) -> Result<Self, TheoryError> {
        let root = Note::parse(root)?;
        let scale_mode = match mode {
            Some(mode) => ScaleMode::named(scale.parse::<ScaleType>()?, mode)?,
            None => scale.parse::<ScaleMode>()?,
        };
        scale_mode.generate(root)
    }

    /// Get the root note
    pub fn root(&self) -> Note {
        self.root
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// The mode this scale was generated from, if any
    pub fn scale_mode(&self) -> Option<ScaleMode> {
        self.mode
    }

    pub fn name(&self) -> &str {
        self.sequence.name()
    }

    /// All notes including the octave repeat
    pub fn notes(&self) -> &[Note] {
        self.sequence.notes()
    }

    pub fn sequence(&self) -> &NoteSequence {
        &self.sequence
    }

    /// Number of distinct degrees (the octave repeat is not counted)
    pub fn degree_count(&self) -> usize {
        self.formula.len()
    }

    /// Number of stored notes, including the octave repeat
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Check if a note is in this scale
    pub fn contains(&self, note: &Note) -> bool {
        self.sequence.contains(note)
    }

    /// Get the scale degree (1-based) for a note, if it's in the scale
    pub fn degree_of(&self, note: &Note) -> Option<usize> {
        self.notes()[..self.degree_count()]
            .iter()
            .position(|n| n == note)
            .map(|i| i + 1)
    }

    /// Get the note at a degree within the first octave (1-based)
    pub fn note_at_degree(&self, degree: usize) -> Option<Note> {
        if degree == 0 || degree > self.degree_count() {
            return None;
        }
        Some(self.notes()[degree - 1])
    }

    /// Note at any 1-based degree, including extensions past the octave.
    ///
    /// The stored octave repeat is skipped when wrapping: in a seven-note
    /// scale degree 8 is the root an octave up and degree 9 is the second
    /// an octave up.
    pub fn get_interval(&self, degree: u8) -> Result<Note, TheoryError> {
        if degree == 0 {
            return Err(TheoryError::InvalidDegree(degree));
        }
        let degree_count = self.degree_count();
        let index = (degree as usize - 1) % degree_count;
        let octaves = (degree as usize - 1) / degree_count;
        self.notes()[index].transpose(12 * octaves as i32)
    }

    /// The scale's `mode`-th mode, rooted on that degree of this scale.
    ///
    /// Mode 2 of C Major is D Dorian, with the same notes as C Major.
    pub fn relative_mode(&self, mode: u8) -> Result<Scale, TheoryError> {
        let degree_count = self.degree_count();
        if mode == 0 || mode as usize > degree_count {
            return Err(TheoryError::UnknownMode(format!(
                "mode {} of {}",
                mode,
                self.name()
            )));
        }
        let root = self.notes()[mode as usize - 1];

        match self.mode {
            Some(own) => {
                let shifted = (own.mode() as usize - 1 + mode as usize - 1) % degree_count + 1;
                ScaleMode::new(own.scale_type(), shifted as u8).generate(root)
            }
            None => {
                let name = format!("{} mode {}", self.formula.name(), mode);
                generate_scale(root, &rotate(&self.formula, mode, name))
            }
        }
    }

    /// Get the relative scale (e.g., C major -> A minor)
    pub fn relative(&self) -> Option<Scale> {
        match self.mode? {
            ScaleMode::IONIAN => self.relative_mode(6).ok(),
            ScaleMode::AEOLIAN => self.relative_mode(3).ok(),
            _ => None,
        }
    }

    /// Get the parallel scale (major <-> minor on the same root)
    pub fn parallel(&self) -> Option<Scale> {
        match self.mode? {
            ScaleMode::IONIAN => ScaleMode::AEOLIAN.generate(self.root).ok(),
            ScaleMode::AEOLIAN => ScaleMode::IONIAN.generate(self.root).ok(),
            _ => None,
        }
    }

    /// Every known chord type on `degree` that fits this scale
    pub fn harmonize(&self, degree: u8) -> Result<Vec<Chord>, TheoryError> {
        diatonic_chords(self, degree, &ChordType::ALL)
    }
}

impl AsRef<NoteSequence> for Scale {
    fn as_ref(&self) -> &NoteSequence {
        &self.sequence
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
