//! Repository layer — entity-scoped database operations.
//!
//! Typed wrappers over the SQL the screens issue; every function takes a
//! `&Connection` and is reached through `Database::with_conn`.

mod attachment;
mod consultation;
mod exam;
mod health_datum;
mod patient;
mod record_type;
mod stats;

pub use attachment::*;
pub use consultation::*;
pub use exam::*;
pub use health_datum::*;
pub use patient::*;
pub use record_type::*;
pub use stats::*;
