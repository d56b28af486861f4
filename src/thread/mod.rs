//! Thread ownership with join-on-drop semantics

pub mod joining;

pub use joining::JoiningThread;
