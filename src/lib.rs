// src/lib.rs

//! Backloggd collection scraper library.
//!
//! Scrapes a user's games and reviews and writes one static-site content
//! document per game.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
