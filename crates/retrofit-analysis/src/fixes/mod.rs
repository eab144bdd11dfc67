//! Fix engine — classify flagged lifecycle methods, build fixes, apply the
//! high-confidence ones.
//!
//! Generation is pure: it parses files but never writes them. Application
//! re-locates each method by name, starting line and original text, so a
//! fix produced against an older version of a file is skipped rather than
//! misapplied.

pub mod applier;
pub mod classifier;
pub mod constructor;
pub mod generator;
pub mod rename;
pub mod signals;
pub mod state_props;
pub mod types;

pub use applier::FixApplier;
pub use classifier::classify;
pub use generator::{generate_for_tree, FixGenerator};
pub use state_props::{extract_state_props, parse_object_literal, StateProps};
pub use types::{ApplyReport, Confidence, FileFailure, Fix, FixSummary, FixType, Pattern, Urgency};
