//! Utility functions and helpers.

pub mod html;
pub mod http;
pub mod text;
pub mod url;
