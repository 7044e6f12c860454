//! Core domain types for the code-breaking game
//!
//! This module contains the fundamental domain types: codes, the code space
//! and the feedback rules. Everything here is pure and free of I/O.

mod code;
mod feedback;
mod space;

pub use code::{Code, CodeError, MAX_LENGTH, SYMBOLS};
pub use feedback::{
    BullsCows, Classic, FeedbackKind, FeedbackRule, Positional, PositionalMarks,
    classic_feedback, positional_feedback,
};
pub use space::{CodeSpace, CodeSpaceError, permutations};
