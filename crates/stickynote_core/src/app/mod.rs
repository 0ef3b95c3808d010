//! UI event dispatch over the board.
//!
//! # Responsibility
//! - Route UI input events and external change notifications into the core
//!   operations through one explicit dispatch table.
//!
//! # Invariants
//! - Exactly one handler exists per event type, bound once at
//!   initialization, never rebound per render.

pub mod dispatch;

pub use dispatch::{NotesApp, UiEvent, UiReaction};
