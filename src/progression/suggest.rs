// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Progression suggestions.
//!
//! Picks scale degrees either from common functional templates or at
//! random, then harmonizes each degree with a chord that fits the scale.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Progression;
use crate::error::TheoryError;
use crate::music::{diatonic_chords, Chord, ChordType, Scale};

/// Common functional progressions as scale degrees
const FUNCTIONAL_TEMPLATES: [[u8; 4]; 5] = [
    [1, 4, 5, 1], // I-IV-V-I
    [1, 5, 6, 4], // I-V-vi-IV
    [2, 5, 1, 1], // ii-V-I
    [1, 6, 4, 5], // I-vi-IV-V
    [1, 4, 6, 5], // I-IV-vi-V
];

/// Degree selection algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestMode {
    /// Functional harmony templates
    #[default]
    Functional,
    /// Random degrees of the scale
    RandomInKey,
}

impl std::str::FromStr for SuggestMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "functional" => Ok(SuggestMode::Functional),
            "random" | "randominkey" => Ok(SuggestMode::RandomInKey),
            _ => Err(()),
        }
    }
}

/// Suggests chord progressions for a scale
pub struct ProgressionSuggester {
    mode: SuggestMode,
    sevenths: bool,
    rng: StdRng,
}

impl ProgressionSuggester {
    pub fn new(mode: SuggestMode) -> Self {
        Self {
            mode,
            sevenths: false,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic suggester for repeatable output
    pub fn with_seed(mode: SuggestMode, seed: u64) -> Self {
        Self {
            mode,
            sevenths: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Harmonize with seventh chords instead of triads
    pub fn sevenths(mut self, sevenths: bool) -> Self {
        self.sevenths = sevenths;
        self
    }

    pub fn mode(&self) -> SuggestMode {
        self.mode
    }

    /// Scale degrees for a progression of `length` chords
    fn degrees(&mut self, degree_count: usize, length: usize) -> Vec<u8> {
        let raw: Vec<u8> = match self.mode {
            SuggestMode::Functional => {
                let template = FUNCTIONAL_TEMPLATES[self.rng.gen_range(0..FUNCTIONAL_TEMPLATES.len())];
                template.iter().copied().cycle().take(length).collect()
            }
            SuggestMode::RandomInKey => (0..length)
                .map(|_| self.rng.gen_range(1..=degree_count) as u8)
                .collect(),
        };

        // Wrap template degrees into scales with fewer than seven notes
        raw.into_iter()
            .map(|d| ((d as usize - 1) % degree_count) as u8 + 1)
            .collect()
    }

    /// Suggest a progression of `length` chords in `scale`
    pub fn suggest(&mut self, scale: &Scale, length: usize) -> Result<Progression, TheoryError> {
        let candidates: &[ChordType] = if self.sevenths {
            &ChordType::SEVENTHS
        } else {
            &ChordType::TRIADS
        };

        let mut progression = Progression::new(format!("{} suggestion", scale.name()));
        for degree in self.degrees(scale.degree_count(), length) {
            let chord = match diatonic_chords(scale, degree, candidates)?.into_iter().next() {
                Some(chord) => chord,
                None => Chord::from_degree(scale, degree, ChordType::Power)?,
            };
            progression.append(chord);
        }

        debug!(scale = scale.name(), mode = ?self.mode, "suggested {}", progression);
        Ok(progression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{Note, ScaleMode, ScaleType};

    fn scale(root: &str, mode: ScaleMode) -> Scale {
        Scale::new(Note::parse(root).unwrap(), mode).unwrap()
    }

    #[test]
    fn test_functional_in_c_major() {
        let c_major = scale("C", ScaleMode::IONIAN);
        let expected = [
            ["C", "F", "G", "C"],
            ["C", "G", "Am", "F"],
            ["Dm", "G", "C", "C"],
            ["C", "Am", "F", "G"],
            ["C", "F", "Am", "G"],
        ];

        for seed in 0..20 {
            let mut suggester = ProgressionSuggester::with_seed(SuggestMode::Functional, seed);
            let progression = suggester.suggest(&c_major, 4).unwrap();
            let symbols = progression.symbols(false);
            assert!(
                expected.iter().any(|e| symbols == e),
                "unexpected progression {:?}",
                symbols
            );
        }
    }

    #[test]
    fn test_functional_cycles_template() {
        let c_major = scale("C", ScaleMode::IONIAN);
        let mut suggester = ProgressionSuggester::with_seed(SuggestMode::Functional, 7);
        let progression = suggester.suggest(&c_major, 8).unwrap();
        let symbols = progression.symbols(false);
        assert_eq!(symbols.len(), 8);
        assert_eq!(symbols[..4], symbols[4..]);
    }

    #[test]
    fn test_sevenths_in_minor() {
        let a_minor = scale("A", ScaleMode::AEOLIAN);
        let mut suggester =
            ProgressionSuggester::with_seed(SuggestMode::Functional, 3).sevenths(true);
        let progression = suggester.suggest(&a_minor, 4).unwrap();
        assert!(progression.is_diatonic(&a_minor));
        for chord in progression.chords() {
            assert!(ChordType::SEVENTHS.contains(&chord.chord_type()));
        }
    }

    #[test]
    fn test_random_in_key_is_seeded() {
        let d_dorian = scale("D", ScaleMode::DORIAN);
        let mut a = ProgressionSuggester::with_seed(SuggestMode::RandomInKey, 42);
        let mut b = ProgressionSuggester::with_seed(SuggestMode::RandomInKey, 42);
        let first = a.suggest(&d_dorian, 6).unwrap();
        let second = b.suggest(&d_dorian, 6).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
        assert!(first.is_diatonic(&d_dorian));
    }

    #[test]
    fn test_harmonic_minor_dominant() {
        let a_harmonic = scale("A", ScaleMode::base(ScaleType::HarmonicMinor));
        let chords = diatonic_chords(&a_harmonic, 5, &ChordType::TRIADS).unwrap();
        assert_eq!(chords[0].to_symbol(false), "E");
    }

    #[test]
    fn test_pentatonic_wraps_degrees() {
        let pentatonic = scale("C", ScaleMode::base(ScaleType::MajorPentatonic));
        let mut suggester = ProgressionSuggester::with_seed(SuggestMode::Functional, 11);
        let progression = suggester.suggest(&pentatonic, 4).unwrap();
        assert_eq!(progression.len(), 4);
        for chord in progression.chords() {
            assert!(pentatonic.contains(&chord.root()));
        }
    }

    #[test]
    fn test_power_fallback() {
        let whole_tone = scale("C", ScaleMode::base(ScaleType::WholeTone));
        let mut suggester =
            ProgressionSuggester::with_seed(SuggestMode::RandomInKey, 5).sevenths(true);
        let progression = suggester.suggest(&whole_tone, 6).unwrap();
        for chord in progression.chords() {
            assert!(matches!(
                chord.chord_type(),
                ChordType::Augmented7 | ChordType::Power
            ));
        }
    }

    #[test]
    fn test_empty_length() {
        let c_major = scale("C", ScaleMode::IONIAN);
        let mut suggester = ProgressionSuggester::new(SuggestMode::RandomInKey);
        assert!(suggester.suggest(&c_major, 0).unwrap().is_empty());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("functional".parse(), Ok(SuggestMode::Functional));
        assert_eq!("random-in-key".parse(), Ok(SuggestMode::RandomInKey));
        assert_eq!("random".parse(), Ok(SuggestMode::RandomInKey));
        assert!("jazz".parse::<SuggestMode>().is_err());
    }
}
