// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core.
//!
//! This module provides spelled notes, interval and formula tables,
//! scale generation with modal derivation, and chord construction.

pub mod chord;
pub mod interval;
pub mod note;
pub mod scale;
pub mod sequence;
pub mod tables;

pub use chord::{diatonic_chords, AlteredNote, Alteration, Chord, ChordBuilder, INVERSION_VALUES};
pub use interval::Interval;
pub use note::{Letter, Note};
pub use scale::{find_formula_for_mode, find_mode, generate_scale, Scale, ScaleMode};
pub use sequence::NoteSequence;
pub use tables::{tables, ChordFormula, ChordSymbol, ChordType, Formula, ScaleType, TheoryTables};
