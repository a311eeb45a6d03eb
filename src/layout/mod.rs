//! Layout engine: placement generation and clearance validation
//!
//! This module takes a resolved [`LayoutTemplate`](crate::template::LayoutTemplate)
//! and places every furniture item, producing a [`SceneGraph`] that the
//! validator then checks for spacing and boundary problems.

pub mod config;
pub mod engine;
pub mod error;
pub mod transform;
pub mod types;
pub mod validate;

pub use config::{Clearances, ConfigError, FurnitureCatalog, LayoutConfig};
pub use engine::{arrange, circular_seating, generate, linear_offsets, LocalItem};
pub use error::LayoutError;
pub use transform::YawTransform;
pub use types::*;
pub use validate::{
    validate, BoundaryViolation, ClearanceViolation, Edge, Violation, ViolationCategory,
};
