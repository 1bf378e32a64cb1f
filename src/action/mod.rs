//! Staged action pipelines.
//!
//! An action validates its business rules before doing its work. The
//! pipeline runs these stages once, in order:
//!
//! `PreAddRules → AddRules → PreValidateRules → ValidateRules →
//! PreProcessAction → ProcessAction → PostProcessAction`
//!
//! If validation fails the action result is `Fail` and processing never
//! starts. An `ActionFault` raised by any hook up through `ProcessAction` is
//! recorded as a failed rule result and the pipeline returns `Fail`
//! normally; any other error propagates and leaves the stage where it was.
//!
//! Actions are either trait implementations ([`Action`], [`AsyncAction`]) or
//! closures bound to stages through [`ActionBuilder`].

mod accessors;
mod async_pipeline;
mod builder;
mod error;
mod lifecycle;
mod pipeline;

pub use async_pipeline::{AsyncAction, AsyncActionPipeline};
pub use builder::{ActionBuilder, FnAction};
pub use error::BuildError;
pub use pipeline::{Action, ActionPipeline};
