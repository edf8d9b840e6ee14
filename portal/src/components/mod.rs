//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render table chrome, dialogs and status surfaces. They take
//! plain signals and callbacks so every page can wire them to its own state
//! struct; only `toast` reads a context (the shared notice signal).

pub mod badge;
pub mod controls;
pub mod dialog;
pub mod export_buttons;
pub mod nav;
pub mod pager;
pub mod toast;
