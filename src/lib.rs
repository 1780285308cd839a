//! PRA Engine - Probabilistic Risk Assessment Quantification
//!
//! This crate reduces fault trees to minimal cut sets, expands common-cause
//! failure groups, and quantifies event-tree sequences with point, sampled
//! and hazard-integrated probabilities plus risk-importance measures.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{eta, EtaCommand, EtaError};
