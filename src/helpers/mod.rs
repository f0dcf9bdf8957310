//! Shared helper functions

pub mod date;
pub mod html;
