//! # Domain Layer
//!
//! Pure runtime types. No I/O, no locking.

pub mod entities;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
