//! Core types shared by the building blocks

pub mod error;

pub use error::{Result, ThreadError};
