//! The five animated sorts, written purely in terms of [`StepController`]
//! primitives.
//!
//! [`StepController`]: crate::controller::StepController

pub(crate) mod bubble;
pub(crate) mod insertion;
pub(crate) mod merge;
pub(crate) mod quick;
pub(crate) mod selection;
