//! Onboarding Flow - Adaptive questionnaire engine
//!
//! This crate drives an onboarding questionnaire that branches on each
//! answer, builds a respondent profile along the way, and learns from
//! recorded sessions which paths work best.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
