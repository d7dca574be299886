// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod event;
pub mod observation;

pub use activity::{Activity, Athlete, Map};
pub use event::Event;
pub use observation::{
    CodeableConcept, Coding, Identifier, Meta, Narrative, Observation, Quantity, Reference,
};
