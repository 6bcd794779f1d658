//! Version numbers and version ranges for Zero Install feeds.
//!
//! This crate provides the version model used throughout Zero Install:
//! - Dotted-list version numbers with `pre`/`rc`/`post` modifiers
//! - Template versions carrying unexpanded `{variable}` placeholders
//! - Bounded constraints (`not-before` / `before` feed attributes)
//! - Possibly disjoint version ranges (`1.0..!2.0|3.1` syntax)
//!
//! Versions order by padded segment comparison, so `1.2` sorts between
//! `1.2-pre` and `1.2-post` and `0.9` sorts below `0.10`. See
//! [`Version`] for the full grammar and ordering rules.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
mod constraint;
mod dotted;
mod part;
mod range;
mod version;

pub use constraint::Constraint;
pub use dotted::DottedList;
pub use error::{FormatError, Result};
pub use part::{Modifier, VersionPart};
pub use range::VersionRange;
pub use version::Version;
