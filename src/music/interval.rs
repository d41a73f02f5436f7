// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named intervals.
//!
//! Each interval carries its size in semitones and the number of letter
//! steps it spans, so transposition can keep note spelling intact
//! (a major third above D is F#, never Gb).

use std::fmt;
use std::str::FromStr;

/// Named intervals up to a double octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Unison,
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    AugmentedFourth,
    DiminishedFifth,
    PerfectFifth,
    AugmentedFifth,
    MinorSixth,
    MajorSixth,
    MinorSeventh,
    MajorSeventh,
    Octave,
    MinorNinth,
    MajorNinth,
    AugmentedNinth,
    PerfectEleventh,
    AugmentedEleventh,
    MinorThirteenth,
    MajorThirteenth,
    DoubleOctave,
}

impl Interval {
    /// All intervals in ascending order
    pub const ALL: [Interval; 23] = [
        Interval::Unison,
        Interval::MinorSecond,
        Interval::MajorSecond,
        Interval::MinorThird,
        Interval::MajorThird,
        Interval::PerfectFourth,
        Interval::AugmentedFourth,
        Interval::DiminishedFifth,
        Interval::PerfectFifth,
        Interval::AugmentedFifth,
        Interval::MinorSixth,
        Interval::MajorSixth,
        Interval::MinorSeventh,
        Interval::MajorSeventh,
        Interval::Octave,
        Interval::MinorNinth,
        Interval::MajorNinth,
        Interval::AugmentedNinth,
        Interval::PerfectEleventh,
        Interval::AugmentedEleventh,
        Interval::MinorThirteenth,
        Interval::MajorThirteenth,
        Interval::DoubleOctave,
    ];

    /// Size in semitones
    pub fn semitones(self) -> i32 {
        match self {
            Interval::Unison => 0,
            Interval::MinorSecond => 1,
            Interval::MajorSecond => 2,
            Interval::MinorThird => 3,
            Interval::MajorThird => 4,
            Interval::PerfectFourth => 5,
            Interval::AugmentedFourth | Interval::DiminishedFifth => 6,
            Interval::PerfectFifth => 7,
            Interval::AugmentedFifth | Interval::MinorSixth => 8,
            Interval::MajorSixth => 9,
            Interval::MinorSeventh => 10,
            Interval::MajorSeventh => 11,
            Interval::Octave => 12,
            Interval::MinorNinth => 13,
            Interval::MajorNinth => 14,
            Interval::AugmentedNinth => 15,
            Interval::PerfectEleventh => 17,
            Interval::AugmentedEleventh => 18,
            Interval::MinorThirteenth => 20,
            Interval::MajorThirteenth => 21,
            Interval::DoubleOctave => 24,
        }
    }

    /// Number of letter names spanned (a third spans two steps)
    pub fn steps(self) -> i32 {
        self.number() as i32 - 1
    }

    /// Ordinal number of the interval (third = 3, ninth = 9)
    pub fn number(self) -> u8 {
        match self {
            Interval::Unison => 1,
            Interval::MinorSecond | Interval::MajorSecond => 2,
            Interval::MinorThird | Interval::MajorThird => 3,
            Interval::PerfectFourth | Interval::AugmentedFourth => 4,
            Interval::DiminishedFifth | Interval::PerfectFifth | Interval::AugmentedFifth => 5,
            Interval::MinorSixth | Interval::MajorSixth => 6,
            Interval::MinorSeventh | Interval::MajorSeventh => 7,
            Interval::Octave => 8,
            Interval::MinorNinth | Interval::MajorNinth | Interval::AugmentedNinth => 9,
            Interval::PerfectEleventh | Interval::AugmentedEleventh => 11,
            Interval::MinorThirteenth | Interval::MajorThirteenth => 13,
            Interval::DoubleOctave => 15,
        }
    }

    /// Short symbol (e.g. "m3", "P5", "M9")
    pub fn short_name(self) -> &'static str {
        match self {
            Interval::Unison => "P1",
            Interval::MinorSecond => "m2",
            Interval::MajorSecond => "M2",
            Interval::MinorThird => "m3",
            Interval::MajorThird => "M3",
            Interval::PerfectFourth => "P4",
            Interval::AugmentedFourth => "A4",
            Interval::DiminishedFifth => "d5",
            Interval::PerfectFifth => "P5",
            Interval::AugmentedFifth => "A5",
            Interval::MinorSixth => "m6",
            Interval::MajorSixth => "M6",
            Interval::MinorSeventh => "m7",
            Interval::MajorSeventh => "M7",
            Interval::Octave => "P8",
            Interval::MinorNinth => "m9",
            Interval::MajorNinth => "M9",
            Interval::AugmentedNinth => "A9",
            Interval::PerfectEleventh => "P11",
            Interval::AugmentedEleventh => "A11",
            Interval::MinorThirteenth => "m13",
            Interval::MajorThirteenth => "M13",
            Interval::DoubleOctave => "P15",
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Interval::Unison => "Unison",
            Interval::MinorSecond => "Minor Second",
            Interval::MajorSecond => "Major Second",
            Interval::MinorThird => "Minor Third",
            Interval::MajorThird => "Major Third",
            Interval::PerfectFourth => "Perfect Fourth",
            Interval::AugmentedFourth => "Augmented Fourth",
            Interval::DiminishedFifth => "Diminished Fifth",
            Interval::PerfectFifth => "Perfect Fifth",
            Interval::AugmentedFifth => "Augmented Fifth",
            Interval::MinorSixth => "Minor Sixth",
            Interval::MajorSixth => "Major Sixth",
            Interval::MinorSeventh => "Minor Seventh",
            Interval::MajorSeventh => "Major Seventh",
            Interval::Octave => "Octave",
            Interval::MinorNinth => "Minor Ninth",
            Interval::MajorNinth => "Major Ninth",
            Interval::AugmentedNinth => "Augmented Ninth",
            Interval::PerfectEleventh => "Perfect Eleventh",
            Interval::AugmentedEleventh => "Augmented Eleventh",
            Interval::MinorThirteenth => "Minor Thirteenth",
            Interval::MajorThirteenth => "Major Thirteenth",
            Interval::DoubleOctave => "Double Octave",
        }
    }

    /// First interval of the given size. Tritones resolve to the augmented fourth.
    pub fn from_semitones(semitones: i32) -> Option<Self> {
        Interval::ALL
            .iter()
            .copied()
            .find(|interval| interval.semitones() == semitones)
    }

    /// Interval of the given size whose number differs from `previous` when
    /// such a spelling exists, so consecutive scale notes avoid sharing a
    /// letter. After a fourth, a tritone is a diminished fifth.
    pub fn from_semitones_after(semitones: i32, previous: u8) -> Option<Self> {
        let mut sizes = Interval::ALL
            .iter()
            .copied()
            .filter(|interval| interval.semitones() == semitones);
        let first = sizes.next()?;
        if first.number() != previous {
            return Some(first);
        }
        Some(sizes.find(|interval| interval.number() != previous).unwrap_or(first))
    }
}

impl FromStr for Interval {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Short symbols are case sensitive (m3 vs M3)
        if let Some(interval) = Interval::ALL
            .iter()
            .copied()
            .find(|interval| interval.short_name() == trimmed)
        {
            return Ok(interval);
        }

        let normalized = trimmed.to_lowercase().replace([' ', '-', '_'], "");
        Interval::ALL
            .iter()
            .copied()
            .find(|interval| interval.name().to_lowercase().replace(' ', "") == normalized)
            .ok_or(())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
