//! Support Triage - Guided Intake for Support Chat Bots
//!
//! This crate implements the conversation core a support bot uses to walk a
//! user through a fixed sequence of intake questions before handing the
//! collected answers to retrieval, classification and ticket rendering
//! collaborators.

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
