//! # vit-core
//!
//! Core types, ID prefixes, and error types for Vitrine.
//!
//! This crate provides the foundational types shared across all Vitrine crates:
//! - Entity structs for all domain objects (apps, versions, media, timeline, users, organizations)
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - Input types for create/update forms, with validation rules
//! - Cross-cutting error types
//! - API response envelopes

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod inputs;
pub mod responses;
pub mod validation;
