// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale and chord tables.
//!
//! Scale and chord types are closed enums. Their formulas and symbols are
//! collected once into [`TheoryTables`] on first use and are read-only
//! afterwards, so any thread may read them without locking.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::debug;

use super::scale::ScaleMode;
use crate::error::TheoryError;

/// Base scale types. Modes are derived from these by rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleType {
    Major,
    HarmonicMinor,
    MelodicMinor, // Ascending form
    HarmonicMajor,
    MajorPentatonic,
    Blues,
    WholeTone,
    Diminished, // Whole-half
    Chromatic,
}

impl ScaleType {
    pub const ALL: [ScaleType; 9] = [
        ScaleType::Major,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::HarmonicMajor,
        ScaleType::MajorPentatonic,
        ScaleType::Blues,
        ScaleType::WholeTone,
        ScaleType::Diminished,
        ScaleType::Chromatic,
    ];

    /// Get the offsets (semitones from root) for this scale type
    fn offsets(self) -> &'static [u8] {
        match self {
            ScaleType::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleType::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleType::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            ScaleType::HarmonicMajor => &[0, 2, 4, 5, 7, 8, 11],
            ScaleType::MajorPentatonic => &[0, 2, 4, 7, 9],
            ScaleType::Blues => &[0, 3, 5, 6, 7, 10],
            ScaleType::WholeTone => &[0, 2, 4, 6, 8, 10],
            ScaleType::Diminished => &[0, 2, 3, 5, 6, 8, 9, 11],
            ScaleType::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    /// Names of the modes of this scale, indexed by mode degree - 1.
    ///
    /// Empty for scales whose modes have no common names.
    pub fn mode_names(self) -> &'static [&'static str] {
        match self {
            ScaleType::Major => &[
                "Ionian",
                "Dorian",
                "Phrygian",
                "Lydian",
                "Mixolydian",
                "Aeolian",
                "Locrian",
            ],
            ScaleType::HarmonicMinor => &[
                "Harmonic Minor",
                "Locrian #6",
                "Ionian #5",
                "Dorian #4",
                "Phrygian Dominant",
                "Lydian #2",
                "Ultralocrian",
            ],
            ScaleType::MelodicMinor => &[
                "Melodic Minor",
                "Dorian b2",
                "Lydian Augmented",
                "Lydian Dominant",
                "Mixolydian b6",
                "Locrian #2",
                "Altered",
            ],
            ScaleType::HarmonicMajor => &[
                "Harmonic Major",
                "Dorian b5",
                "Phrygian b4",
                "Lydian b3",
                "Mixolydian b2",
                "Lydian Augmented #2",
                "Locrian bb7",
            ],
            ScaleType::MajorPentatonic => &[
                "Major Pentatonic",
                "Suspended Pentatonic",
                "Blues Minor Pentatonic",
                "Blues Major Pentatonic",
                "Minor Pentatonic",
            ],
            ScaleType::Blues
            | ScaleType::WholeTone
            | ScaleType::Diminished
            | ScaleType::Chromatic => &[],
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::HarmonicMajor => "Harmonic Major",
            ScaleType::MajorPentatonic => "Major Pentatonic",
            ScaleType::Blues => "Blues",
            ScaleType::WholeTone => "Whole Tone",
            ScaleType::Diminished => "Diminished",
            ScaleType::Chromatic => "Chromatic",
        }
    }
}

impl FromStr for ScaleType {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "major" => Ok(ScaleType::Major),
            "harmonicminor" => Ok(ScaleType::HarmonicMinor),
            "melodicminor" | "jazzminor" => Ok(ScaleType::MelodicMinor),
            "harmonicmajor" => Ok(ScaleType::HarmonicMajor),
            "majorpentatonic" | "pentatonic" | "pentatonicmajor" => Ok(ScaleType::MajorPentatonic),
            "blues" | "minorblues" => Ok(ScaleType::Blues),
            "wholetone" => Ok(ScaleType::WholeTone),
            "diminished" | "octatonic" | "wholehalf" => Ok(ScaleType::Diminished),
            "chromatic" => Ok(ScaleType::Chromatic),
            _ => Err(TheoryError::UnknownScaleType(s.to_string())),
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Chord types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordType {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Power,
    Major6,
    Minor6,
    Major7,
    Dominant7,
    Minor7,
    HalfDiminished7,
    Diminished7,
    MinorMajor7,
    Augmented7,
    Dominant7Sus4,
}

impl ChordType {
    pub const ALL: [ChordType; 17] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Diminished,
        ChordType::Augmented,
        ChordType::Sus2,
        ChordType::Sus4,
        ChordType::Power,
        ChordType::Major6,
        ChordType::Minor6,
        ChordType::Major7,
        ChordType::Dominant7,
        ChordType::Minor7,
        ChordType::HalfDiminished7,
        ChordType::Diminished7,
        ChordType::MinorMajor7,
        ChordType::Augmented7,
        ChordType::Dominant7Sus4,
    ];

    /// Stacked-third triads
    pub const TRIADS: [ChordType; 4] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Diminished,
        ChordType::Augmented,
    ];

    /// Stacked-third seventh chords
    pub const SEVENTHS: [ChordType; 7] = [
        ChordType::Major7,
        ChordType::Dominant7,
        ChordType::Minor7,
        ChordType::HalfDiminished7,
        ChordType::MinorMajor7,
        ChordType::Diminished7,
        ChordType::Augmented7,
    ];

    /// The scale a chord is drawn from and the 1-based degrees it uses
    fn definition(self) -> (ScaleMode, &'static [u8]) {
        match self {
            ChordType::Major => (ScaleMode::IONIAN, &[1, 3, 5]),
            ChordType::Minor => (ScaleMode::AEOLIAN, &[1, 3, 5]),
            ChordType::Diminished => (ScaleMode::LOCRIAN, &[1, 3, 5]),
            ChordType::Augmented => (ScaleMode::base(ScaleType::WholeTone), &[1, 3, 5]),
            ChordType::Sus2 => (ScaleMode::IONIAN, &[1, 2, 5]),
            ChordType::Sus4 => (ScaleMode::IONIAN, &[1, 4, 5]),
            ChordType::Power => (ScaleMode::IONIAN, &[1, 5]),
            ChordType::Major6 => (ScaleMode::IONIAN, &[1, 3, 5, 6]),
            ChordType::Minor6 => (ScaleMode::DORIAN, &[1, 3, 5, 6]),
            ChordType::Major7 => (ScaleMode::IONIAN, &[1, 3, 5, 7]),
            ChordType::Dominant7 => (ScaleMode::MIXOLYDIAN, &[1, 3, 5, 7]),
            ChordType::Minor7 => (ScaleMode::DORIAN, &[1, 3, 5, 7]),
            ChordType::HalfDiminished7 => (ScaleMode::LOCRIAN, &[1, 3, 5, 7]),
            ChordType::Diminished7 => (ScaleMode::base(ScaleType::Diminished), &[1, 3, 5, 7]),
            ChordType::MinorMajor7 => (ScaleMode::base(ScaleType::MelodicMinor), &[1, 3, 5, 7]),
            ChordType::Augmented7 => (ScaleMode::base(ScaleType::WholeTone), &[1, 3, 5, 6]),
            ChordType::Dominant7Sus4 => (ScaleMode::MIXOLYDIAN, &[1, 4, 5, 7]),
        }
    }

    /// Standard and alternate chord symbols
    fn symbols(self) -> (&'static str, &'static str) {
        match self {
            ChordType::Major => ("", "maj"),
            ChordType::Minor => ("m", "-"),
            ChordType::Diminished => ("dim", "°"),
            ChordType::Augmented => ("aug", "+"),
            ChordType::Sus2 => ("sus2", "sus2"),
            ChordType::Sus4 => ("sus4", "sus"),
            ChordType::Power => ("5", "(no3)"),
            ChordType::Major6 => ("6", "maj6"),
            ChordType::Minor6 => ("m6", "-6"),
            ChordType::Major7 => ("maj7", "Δ7"),
            ChordType::Dominant7 => ("7", "dom7"),
            ChordType::Minor7 => ("m7", "-7"),
            ChordType::HalfDiminished7 => ("m7b5", "ø7"),
            ChordType::Diminished7 => ("dim7", "°7"),
            ChordType::MinorMajor7 => ("mMaj7", "-Δ7"),
            ChordType::Augmented7 => ("aug7", "+7"),
            ChordType::Dominant7Sus4 => ("7sus4", "7sus"),
        }
    }

    /// Get a human-readable name for this chord type
    pub fn name(self) -> &'static str {
        match self {
            ChordType::Major => "Major",
            ChordType::Minor => "Minor",
            ChordType::Diminished => "Diminished",
            ChordType::Augmented => "Augmented",
            ChordType::Sus2 => "Sus 2",
            ChordType::Sus4 => "Sus 4",
            ChordType::Power => "Power",
            ChordType::Major6 => "Major 6",
            ChordType::Minor6 => "Minor 6",
            ChordType::Major7 => "Major 7",
            ChordType::Dominant7 => "Dominant 7",
            ChordType::Minor7 => "Minor 7",
            ChordType::HalfDiminished7 => "Half Diminished 7",
            ChordType::Diminished7 => "Diminished 7",
            ChordType::MinorMajor7 => "Minor Major 7",
            ChordType::Augmented7 => "Augmented 7",
            ChordType::Dominant7Sus4 => "Dominant 7 Sus 4",
        }
    }
}

impl FromStr for ChordType {
    type Err = TheoryError;

    /// Parse identifiers ("dominant_7"), names ("Half Diminished 7") and
    /// the common symbols ("m7b5", "maj7").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // "M" and "m" only differ by case
        if trimmed == "M" {
            return Ok(ChordType::Major);
        }

        let normalized = trimmed.to_lowercase().replace([' ', '-', '_'], "");
        match normalized.as_str() {
            "major" | "maj" => Ok(ChordType::Major),
            "minor" | "min" | "m" => Ok(ChordType::Minor),
            "diminished" | "dim" => Ok(ChordType::Diminished),
            "augmented" | "aug" | "+" => Ok(ChordType::Augmented),
            "sus2" | "suspended2" => Ok(ChordType::Sus2),
            "sus4" | "suspended4" | "sus" => Ok(ChordType::Sus4),
            "power" | "5" => Ok(ChordType::Power),
            "major6" | "maj6" | "6" => Ok(ChordType::Major6),
            "minor6" | "min6" | "m6" => Ok(ChordType::Minor6),
            "major7" | "maj7" => Ok(ChordType::Major7),
            "dominant7" | "dom7" | "7" => Ok(ChordType::Dominant7),
            "minor7" | "min7" | "m7" => Ok(ChordType::Minor7),
            "halfdiminished7" | "halfdiminished" | "m7b5" => Ok(ChordType::HalfDiminished7),
            "diminished7" | "dim7" => Ok(ChordType::Diminished7),
            "minormajor7" | "minmaj7" | "mmaj7" => Ok(ChordType::MinorMajor7),
            "augmented7" | "aug7" | "+7" => Ok(ChordType::Augmented7),
            "dominant7sus4" | "7sus4" | "7sus" => Ok(ChordType::Dominant7Sus4),
            _ => Err(TheoryError::UnknownChordType(s.to_string())),
        }
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Semitone offsets from the root for each scale degree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    name: String,
    offsets: Vec<u8>,
}

impl Formula {
    /// A custom formula. Offsets must be non-empty, start at 0, and rise
    /// strictly below 12.
    pub fn new(name: impl Into<String>, offsets: Vec<u8>) -> Result<Self, TheoryError> {
        let name = name.into();
        let reason = match offsets.as_slice() {
            [] => Some("no offsets"),
            [first, ..] if *first != 0 => Some("first offset must be 0"),
            rest if rest.windows(2).any(|w| w[0] >= w[1]) => {
                Some("offsets must be strictly ascending")
            }
            rest if rest.iter().any(|&o| o >= 12) => Some("offsets must be below 12"),
            _ => None,
        };
        match reason {
            Some(reason) => Err(TheoryError::InvalidFormula { name, reason }),
            None => Ok(Self { name, offsets }),
        }
    }

    /// Offsets already known to be valid (built-in tables, rotations)
    pub(crate) fn trusted(name: impl Into<String>, offsets: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            offsets,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offsets(&self) -> &[u8] {
        &self.offsets
    }

    /// Number of scale degrees (the octave repeat is not counted)
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Which scale a chord is drawn from and which degrees it takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordFormula {
    pub scale: ScaleMode,
    pub intervals: &'static [u8],
}

/// Display symbols for a chord type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordSymbol {
    pub standard: &'static str,
    pub alternate: &'static str,
}

/// Process-wide formula and symbol tables
#[derive(Debug)]
pub struct TheoryTables {
    scale_formulas: HashMap<ScaleType, Formula>,
    chord_formulas: HashMap<ChordType, ChordFormula>,
    chord_symbols: HashMap<ChordType, ChordSymbol>,
}

static TABLES: OnceLock<TheoryTables> = OnceLock::new();

/// Shared tables, built on first access
pub fn tables() -> &'static TheoryTables {
    TABLES.get_or_init(TheoryTables::build)
}

impl TheoryTables {
    fn build() -> Self {
        let scale_formulas: HashMap<ScaleType, Formula> = ScaleType::ALL
            .iter()
            .map(|&ty| (ty, Formula::trusted(ty.name(), ty.offsets().to_vec())))
            .collect();

        let mut chord_formulas = HashMap::new();
        let mut chord_symbols = HashMap::new();
        for ty in ChordType::ALL {
            let (scale, intervals) = ty.definition();
            chord_formulas.insert(ty, ChordFormula { scale, intervals });

            let (standard, alternate) = ty.symbols();
            chord_symbols.insert(
                ty,
                ChordSymbol {
                    standard,
                    alternate,
                },
            );
        }

        debug!(
            scales = scale_formulas.len(),
            chords = chord_formulas.len(),
            "theory tables initialised"
        );

        Self {
            scale_formulas,
            chord_formulas,
            chord_symbols,
        }
    }

    pub fn scale_formula(&self, scale_type: ScaleType) -> Result<&Formula, TheoryError> {
        self.scale_formulas
            .get(&scale_type)
            .ok_or_else(|| TheoryError::UnknownScaleType(scale_type.name().to_string()))
    }

    pub fn chord_formula(&self, chord_type: ChordType) -> Result<&ChordFormula, TheoryError> {
        self.chord_formulas
            .get(&chord_type)
            .ok_or_else(|| TheoryError::UnknownChordType(chord_type.name().to_string()))
    }

    pub fn chord_symbol(&self, chord_type: ChordType) -> Result<&ChordSymbol, TheoryError> {
        self.chord_symbols
            .get(&chord_type)
            .ok_or_else(|| TheoryError::UnknownChordType(chord_type.name().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_type_offsets() {
        let major = tables().scale_formula(ScaleType::Major).unwrap();
        assert_eq!(major.offsets(), &[0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(major.len(), 7);

        let pentatonic = tables().scale_formula(ScaleType::MajorPentatonic).unwrap();
        assert_eq!(pentatonic.offsets(), &[0, 2, 4, 7, 9]);
    }

    #[test]
    fn test_every_type_has_table_entries() {
        for ty in ScaleType::ALL {
            let formula = tables().scale_formula(ty).unwrap();
            assert_eq!(formula.offsets()[0], 0, "{} must start at the root", ty);
            assert!(formula.offsets().windows(2).all(|w| w[0] < w[1]));
            assert!(ty.mode_names().is_empty() || ty.mode_names().len() == formula.len());
        }
        for ty in ChordType::ALL {
            let formula = tables().chord_formula(ty).unwrap();
            assert_eq!(formula.intervals[0], 1, "{} must contain its root", ty);
            assert!(tables().chord_symbol(ty).is_ok());
        }
    }

    #[test]
    fn test_scale_type_from_str() {
        assert_eq!("major".parse::<ScaleType>(), Ok(ScaleType::Major));
        assert_eq!("Harmonic Minor".parse::<ScaleType>(), Ok(ScaleType::HarmonicMinor));
        assert_eq!("whole-tone".parse::<ScaleType>(), Ok(ScaleType::WholeTone));
        assert_eq!(
            "lydian".parse::<ScaleType>(),
            Err(TheoryError::UnknownScaleType("lydian".to_string()))
        );
    }

    #[test]
    fn test_chord_type_from_str() {
        assert_eq!("major".parse::<ChordType>(), Ok(ChordType::Major));
        assert_eq!("M".parse::<ChordType>(), Ok(ChordType::Major));
        assert_eq!("m".parse::<ChordType>(), Ok(ChordType::Minor));
        assert_eq!("dominant_7".parse::<ChordType>(), Ok(ChordType::Dominant7));
        assert_eq!("m7b5".parse::<ChordType>(), Ok(ChordType::HalfDiminished7));
        assert_eq!("Minor Major 7".parse::<ChordType>(), Ok(ChordType::MinorMajor7));
        assert_eq!(
            "mystery".parse::<ChordType>(),
            Err(TheoryError::UnknownChordType("mystery".to_string()))
        );
    }

    #[test]
    fn test_names_parse_back() {
        for ty in ChordType::ALL {
            assert_eq!(ty.name().parse::<ChordType>(), Ok(ty));
        }
        for ty in ScaleType::ALL {
            assert_eq!(ty.name().parse::<ScaleType>(), Ok(ty));
        }
    }

    #[test]
    fn test_chord_symbols() {
        let dom = tables().chord_symbol(ChordType::Dominant7).unwrap();
        assert_eq!(dom.standard, "7");
        assert_eq!(dom.alternate, "dom7");
        assert_eq!(tables().chord_symbol(ChordType::Major).unwrap().standard, "");
    }

    #[test]
    fn test_custom_formula_validation() {
        let reason = |offsets: Vec<u8>| match Formula::new("custom", offsets) {
            Err(TheoryError::InvalidFormula { reason, .. }) => reason,
            other => panic!("expected InvalidFormula, got {:?}", other),
        };
        assert_eq!(reason(vec![]), "no offsets");
        assert_eq!(reason(vec![2, 4, 7]), "first offset must be 0");
        assert_eq!(reason(vec![0, 4, 4, 7]), "offsets must be strictly ascending");
        assert_eq!(reason(vec![0, 7, 4]), "offsets must be strictly ascending");
        assert_eq!(reason(vec![0, 4, 12]), "offsets must be below 12");
        assert_eq!(reason(vec![0, 250]), "offsets must be below 12");

        let kumoi = Formula::new("Kumoi", vec![0, 2, 3, 7, 9]).unwrap();
        assert_eq!(kumoi.len(), 5);
        assert_eq!(Formula::new("root", vec![0]).unwrap().len(), 1);
    }

    #[test]
    fn test_builtin_formulas_are_valid() {
        for ty in ScaleType::ALL {
            let formula = tables().scale_formula(ty).unwrap();
            assert!(Formula::new(ty.name(), formula.offsets().to_vec()).is_ok(), "{}", ty);
        }
    }

    #[test]
    fn test_tables_are_shared() {
        assert!(std::ptr::eq(tables(), tables()));
    }
}
