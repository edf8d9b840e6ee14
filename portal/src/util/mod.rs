//! Browser and formatting helpers shared by pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `clock` and `download` touch browser APIs under the `hydrate` feature and
//! fall back to host equivalents during SSR and in tests. `form`, `format`
//! and `tone` are pure.

pub mod clock;
pub mod download;
pub mod form;
pub mod format;
pub mod tone;
