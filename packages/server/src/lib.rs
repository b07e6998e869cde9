// Veracity Engine - API Core
//
// Scores the credibility of a submitted URL: validates and fetches the page,
// then fans out to threat screening, an AI credibility judgment and a
// fact-check lookup, and fuses the three signals into one verdict.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
