// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chordsmith - music theory primitives for building chord progressions.
//!
//! The [`music`] module holds the theory core (notes, scales, chords);
//! [`progression`] builds songs out of chords; [`config`] loads song files
//! and shell settings.

pub mod config;
pub mod error;
pub mod music;
pub mod progression;

pub use error::{ProgressionError, TheoryError};
pub use music::{Chord, ChordBuilder, ChordType, Interval, Note, NoteSequence, Scale, ScaleMode, ScaleType};
pub use progression::{Progression, Session, Song};
