// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord construction.
//!
//! A chord is built in one step from its root, type, and voicing options:
//! the chord formula picks degrees from an underlying (possibly modal)
//! scale, extensions reach past the octave, an inversion rotates the
//! chord's own notes, and a slash note is placed underneath as the bass.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::note::Note;
use super::scale::Scale;
use super::sequence::NoteSequence;
use super::tables::{tables, ChordType};
use crate::error::TheoryError;

/// Legal inversion values (0 = root position)
pub const INVERSION_VALUES: [u8; 4] = [0, 1, 2, 3];

/// Direction of an altered chord tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alteration {
    Raise,
    Lower,
}

/// Request to raise or lower one chord degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlteredNote {
    pub degree: u8,
    pub alteration: Alteration,
}

/// A built chord. Immutable; edit by building a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    root: Note,
    chord_type: ChordType,
    slash: Option<Note>,
    inversion: u8,
    extensions: Vec<u8>,
    altered: Vec<AlteredNote>,
    sequence: NoteSequence,
}

impl Chord {
    /// Root-position chord with no options
    pub fn new(root: Note, chord_type: ChordType) -> Result<Self, TheoryError> {
        Self::builder(root, chord_type).build()
    }

    pub fn builder(root: Note, chord_type: ChordType) -> ChordBuilder {
        ChordBuilder::new(root, chord_type)
    }

    /// Chord rooted on a degree of `scale`
    pub fn from_degree(scale: &Scale, degree: u8, chord_type: ChordType) -> Result<Self, TheoryError> {
        let root = scale
            .note_at_degree(degree as usize)
            .ok_or(TheoryError::InvalidDegree(degree))?;
        Self::new(root, chord_type)
    }

    /// A builder pre-filled with this chord's parameters, for editing
    pub fn to_builder(&self) -> ChordBuilder {
        ChordBuilder {
            root: self.root,
            chord_type: self.chord_type,
            slash: self.slash,
            inversion: self.inversion,
            extensions: self.extensions.clone(),
            altered: self.altered.clone(),
        }
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn chord_type(&self) -> ChordType {
        self.chord_type
    }

    pub fn slash(&self) -> Option<Note> {
        self.slash
    }

    pub fn inversion(&self) -> u8 {
        self.inversion
    }

    pub fn extensions(&self) -> &[u8] {
        &self.extensions
    }

    pub fn notes(&self) -> &[Note] {
        self.sequence.notes()
    }

    pub fn sequence(&self) -> &NoteSequence {
        &self.sequence
    }

    /// Lowest note of the voicing
    pub fn bass(&self) -> Note {
        self.sequence.first().copied().unwrap_or(self.root)
    }

    /// Check if a note belongs to this chord
    pub fn contains(&self, note: &Note) -> bool {
        self.sequence.contains(note)
    }

    /// Render e.g. "Am7", "C / E", or "C / G" with the standard or
    /// alternate symbol table.
    pub fn to_symbol(&self, use_alt: bool) -> String {
        let symbol = tables()
            .chord_symbol(self.chord_type)
            .map(|s| if use_alt { s.alternate } else { s.standard })
            .unwrap_or_default();

        let mut rendered = format!("{}{}", self.root.name(), symbol);
        if let Some(slash) = self.slash {
            rendered.push_str(&format!(" / {}", slash.name()));
        } else if self.inversion > 0 {
            rendered.push_str(&format!(" / {}", self.bass().name()));
        }
        rendered
    }

    /// True if every chord note is in `scale`
    pub fn is_diatonic(&self, scale: &Scale) -> bool {
        self.sequence.iter().all(|note| scale.contains(note))
    }
}

impl AsRef<NoteSequence> for Chord {
    fn as_ref(&self) -> &NoteSequence {
        &self.sequence
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_symbol(false))
    }
}

/// Collects chord parameters; [`ChordBuilder::build`] validates them all
/// at once.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordBuilder {
    root: Note,
    chord_type: ChordType,
    slash: Option<Note>,
    inversion: u8,
    extensions: Vec<u8>,
    altered: Vec<AlteredNote>,
}

impl ChordBuilder {
    pub fn new(root: Note, chord_type: ChordType) -> Self {
        Self {
            root,
            chord_type,
            slash: None,
            inversion: 0,
            extensions: Vec::new(),
            altered: Vec::new(),
        }
    }

    pub fn root(mut self, root: Note) -> Self {
        self.root = root;
        self
    }

    pub fn chord_type(mut self, chord_type: ChordType) -> Self {
        self.chord_type = chord_type;
        self
    }

    /// Bass note placed under the chord
    pub fn slash(mut self, slash: impl Into<Option<Note>>) -> Self {
        self.slash = slash.into();
        self
    }

    pub fn inversion(mut self, inversion: u8) -> Self {
        self.inversion = inversion;
        self
    }

    /// Extension degrees, e.g. `[9, 13]`
    pub fn extensions(mut self, extensions: impl IntoIterator<Item = u8>) -> Self {
        self.extensions = extensions.into_iter().collect();
        self
    }

    pub fn altered_notes(mut self, altered: impl IntoIterator<Item = AlteredNote>) -> Self {
        self.altered = altered.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<Chord, TheoryError> {
        if !INVERSION_VALUES.contains(&self.inversion) {
            return Err(TheoryError::InvalidInversion(self.inversion));
        }
        if self.slash.is_some() && self.inversion > 0 {
            return Err(TheoryError::InvalidSlashInversion);
        }

        let formula = tables().chord_formula(self.chord_type)?;
        let scale = formula.scale.generate(self.root)?;

        let mut notes = formula
            .intervals
            .iter()
            .chain(self.extensions.iter())
            .map(|&degree| scale.get_interval(degree))
            .collect::<Result<Vec<_>, _>>()?;

        if self.inversion > 0 {
            notes = invert(notes, self.inversion)?;
        }
        if let Some(slash) = self.slash {
            notes.insert(0, slash);
        }

        // TODO: apply raise/lower per degree once altered spellings are settled
        if !self.altered.is_empty() {
            return Err(TheoryError::NotImplemented("altered notes for chords"));
        }

        debug!(
            root = %self.root,
            chord_type = %self.chord_type,
            inversion = self.inversion,
            notes = notes.len(),
            "built chord"
        );

        Ok(Chord {
            root: self.root,
            chord_type: self.chord_type,
            slash: self.slash,
            inversion: self.inversion,
            extensions: self.extensions,
            altered: self.altered,
            sequence: NoteSequence::new(self.chord_type.name(), notes),
        })
    }
}

/// Invert a chord by moving bottom notes up an octave
fn invert(mut notes: Vec<Note>, inversion: u8) -> Result<Vec<Note>, TheoryError> {
    for _ in 0..inversion {
        if notes.is_empty() {
            break;
        }
        let bottom = notes.remove(0);
        notes.push(bottom.transpose(12)?);
    }
    Ok(notes)
}

/// Chords of the given types rooted on `degree` whose notes all lie in `scale`
pub fn diatonic_chords(
    scale: &Scale,
    degree: u8,
    candidates: &[ChordType],
) -> Result<Vec<Chord>, TheoryError> {
    let mut chords = Vec::new();
    for &chord_type in candidates {
        let chord = Chord::from_degree(scale, degree, chord_type)?;
        if chord.is_diatonic(scale) {
            chords.push(chord);
        }
    }
    Ok(chords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::scale::ScaleMode;

    fn note(name: &str) -> Note {
        Note::parse(name).unwrap()
    }

    fn names(chord: &Chord) -> Vec<String> {
        chord.notes().iter().map(Note::name).collect()
    }

    #[test]
    fn test_c_major_triad() {
        let chord = Chord::new(note("C"), ChordType::Major).unwrap();
        assert_eq!(names(&chord), ["C", "E", "G"]);
        assert_eq!(chord.to_symbol(false), "C");
        assert_eq!(chord.to_symbol(true), "Cmaj");
    }

    #[test]
    fn test_chord_qualities() {
        let cases = [
            ("A", ChordType::Minor, vec!["A", "C", "E"]),
            ("B", ChordType::Diminished, vec!["B", "D", "F"]),
            ("C", ChordType::Augmented, vec!["C", "E", "G#"]),
            ("D", ChordType::Sus2, vec!["D", "E", "A"]),
            ("D", ChordType::Sus4, vec!["D", "G", "A"]),
            ("E", ChordType::Power, vec!["E", "B"]),
            ("F", ChordType::Major6, vec!["F", "A", "C", "D"]),
            ("D", ChordType::Minor6, vec!["D", "F", "A", "B"]),
            ("C", ChordType::Major7, vec!["C", "E", "G", "B"]),
            ("G", ChordType::Dominant7, vec!["G", "B", "D", "F"]),
            ("D", ChordType::Minor7, vec!["D", "F", "A", "C"]),
            ("B", ChordType::HalfDiminished7, vec!["B", "D", "F", "A"]),
            ("C", ChordType::Diminished7, vec!["C", "Eb", "Gb", "A"]),
            ("C", ChordType::MinorMajor7, vec!["C", "Eb", "G", "B"]),
            ("C", ChordType::Augmented7, vec!["C", "E", "G#", "Bb"]),
            ("G", ChordType::Dominant7Sus4, vec!["G", "C", "D", "F"]),
            ("Eb", ChordType::Minor, vec!["Eb", "Gb", "Bb"]),
            ("F#", ChordType::Dominant7, vec!["F#", "A#", "C#", "E"]),
        ];

        for (root, chord_type, expected) in cases {
            let chord = Chord::new(note(root), chord_type).unwrap();
            assert_eq!(names(&chord), expected, "{} {}", root, chord_type);
        }
    }

    #[test]
    fn test_first_inversion() {
        let chord = Chord::builder(note("C4"), ChordType::Major)
            .inversion(1)
            .build()
            .unwrap();
        assert_eq!(chord.bass(), note("E"));
        let rendered: Vec<String> = chord.notes().iter().map(Note::to_string).collect();
        assert_eq!(rendered, ["E4", "G4", "C5"]);
        assert_eq!(chord.to_symbol(false), "C / E");
    }

    #[test]
    fn test_second_and_third_inversion() {
        let second = Chord::builder(note("C"), ChordType::Major)
            .inversion(2)
            .build()
            .unwrap();
        assert_eq!(names(&second), ["G", "C", "E"]);

        let third = Chord::builder(note("G3"), ChordType::Dominant7)
            .inversion(3)
            .build()
            .unwrap();
        assert_eq!(names(&third), ["F", "G", "B", "D"]);
        assert_eq!(third.to_symbol(false), "G7 / F");
        assert_eq!(third.notes()[1].to_string(), "G4");
    }

    #[test]
    fn test_invalid_inversion() {
        let result = Chord::builder(note("C"), ChordType::Major)
            .inversion(4)
            .build();
        assert_eq!(result, Err(TheoryError::InvalidInversion(4)));
    }

    #[test]
    fn test_inversion_past_top_octave() {
        let root = note("B126");
        let first = Chord::builder(root, ChordType::Major).inversion(1).build().unwrap();
        assert_eq!(first.bass().to_string(), "D#127");
        assert!(matches!(
            Chord::builder(root, ChordType::Major).inversion(2).build(),
            Err(TheoryError::PitchOutOfRange(_))
        ));
    }

    #[test]
    fn test_slash_chord() {
        let chord = Chord::builder(note("C"), ChordType::Major)
            .slash(note("G"))
            .build()
            .unwrap();
        assert_eq!(names(&chord), ["G", "C", "E", "G"]);
        assert_eq!(chord.bass(), note("G"));
        assert_eq!(chord.to_symbol(false), "C / G");

        let foreign = Chord::builder(note("C"), ChordType::Major7)
            .slash(note("D"))
            .build()
            .unwrap();
        assert_eq!(foreign.to_symbol(true), "CΔ7 / D");
    }

    #[test]
    fn test_slash_with_inversion_rejected() {
        for inversion in 1..=3 {
            let result = Chord::builder(note("C"), ChordType::Major)
                .slash(note("G"))
                .inversion(inversion)
                .build();
            assert_eq!(result, Err(TheoryError::InvalidSlashInversion));
        }
    }

    #[test]
    fn test_inversion_checked_before_slash() {
        let result = Chord::builder(note("C"), ChordType::Major)
            .slash(note("G"))
            .inversion(9)
            .build();
        assert_eq!(result, Err(TheoryError::InvalidInversion(9)));
    }

    #[test]
    fn test_extensions() {
        let chord = Chord::builder(note("G3"), ChordType::Dominant7)
            .extensions([9, 13])
            .build()
            .unwrap();
        let rendered: Vec<String> = chord.notes().iter().map(Note::to_string).collect();
        assert_eq!(rendered, ["G3", "B3", "D4", "F4", "A4", "E5"]);

        let minor_eleven = Chord::builder(note("D"), ChordType::Minor7)
            .extensions([9, 11])
            .build()
            .unwrap();
        assert_eq!(names(&minor_eleven), ["D", "F", "A", "C", "E", "G"]);
    }

    #[test]
    fn test_extension_then_inversion() {
        let chord = Chord::builder(note("C"), ChordType::Major)
            .extensions([9])
            .inversion(1)
            .build()
            .unwrap();
        assert_eq!(names(&chord), ["E", "G", "D", "C"]);
    }

    #[test]
    fn test_zero_extension_rejected() {
        let result = Chord::builder(note("C"), ChordType::Major)
            .extensions([0])
            .build();
        assert_eq!(result, Err(TheoryError::InvalidDegree(0)));
    }

    #[test]
    fn test_altered_notes_not_implemented() {
        let result = Chord::builder(note("C"), ChordType::Dominant7)
            .altered_notes([AlteredNote {
                degree: 5,
                alteration: Alteration::Raise,
            }])
            .build();
        assert!(matches!(result, Err(TheoryError::NotImplemented(_))));
    }

    #[test]
    fn test_is_diatonic() {
        let c_major = Scale::new(note("C"), ScaleMode::IONIAN).unwrap();
        let cs_major = Scale::new(note("C#"), ScaleMode::IONIAN).unwrap();
        let chord = Chord::new(note("C"), ChordType::Major).unwrap();
        assert!(chord.is_diatonic(&c_major));
        assert!(!chord.is_diatonic(&cs_major));

        let g7 = Chord::new(note("G"), ChordType::Dominant7).unwrap();
        assert!(g7.is_diatonic(&c_major));
        let slash = Chord::builder(note("C"), ChordType::Major)
            .slash(note("F#"))
            .build()
            .unwrap();
        assert!(!slash.is_diatonic(&c_major));
    }

    #[test]
    fn test_from_degree() {
        let c_major = Scale::new(note("C"), ScaleMode::IONIAN).unwrap();
        let ii = Chord::from_degree(&c_major, 2, ChordType::Minor7).unwrap();
        assert_eq!(ii.to_symbol(false), "Dm7");
        assert_eq!(
            Chord::from_degree(&c_major, 8, ChordType::Major),
            Err(TheoryError::InvalidDegree(8))
        );
    }

    #[test]
    fn test_diatonic_chords() {
        let c_major = Scale::new(note("C"), ScaleMode::IONIAN).unwrap();
        let on_seven = diatonic_chords(&c_major, 7, &ChordType::TRIADS).unwrap();
        assert_eq!(on_seven.len(), 1);
        assert_eq!(on_seven[0].chord_type(), ChordType::Diminished);

        let on_five = diatonic_chords(&c_major, 5, &ChordType::SEVENTHS).unwrap();
        assert_eq!(on_five.len(), 1);
        assert_eq!(on_five[0].chord_type(), ChordType::Dominant7);
    }

    #[test]
    fn test_to_builder_rebuilds() {
        let original = Chord::builder(note("A"), ChordType::Minor7)
            .extensions([9])
            .build()
            .unwrap();
        let edited = original.to_builder().inversion(2).build().unwrap();
        assert_eq!(edited.extensions(), &[9]);
        assert_eq!(edited.inversion(), 2);
        assert_eq!(original.inversion(), 0);
        assert_eq!(edited.to_symbol(false), "Am7 / E");
    }

    #[test]
    fn test_chord_display() {
        let chord = Chord::new(note("Bb"), ChordType::HalfDiminished7).unwrap();
        assert_eq!(chord.to_string(), "Bbm7b5");
        assert_eq!(chord.sequence().name(), "Half Diminished 7");
    }
}
