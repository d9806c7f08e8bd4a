//! Reusable UI building blocks.

pub mod dialog_frame;

pub use dialog_frame::DialogFrame;
