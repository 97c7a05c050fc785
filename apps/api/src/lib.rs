//! Career Advisor: résumé skill-gap analysis and career-domain prediction.
//!
//! Core pipeline: [`extraction::extract_text`] → [`matching::match_skills`].

pub mod analysis;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod matching;
pub mod routes;
pub mod state;
