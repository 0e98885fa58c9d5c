//! riskledger — risk-management record keeping.
//!
//! Records organizational risk contexts, identified risks, likelihood/impact
//! analyses, and assessment follow-up plans, with matrix-based scoring and a
//! file-backed register.

pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod report;
pub mod scoring;
pub mod store;
