//! Plain-record entity types persisted by the store.

pub mod attachment;
pub mod consultation;
pub mod exam;
pub mod health_datum;
pub mod patient;
pub mod record_type;

pub use attachment::*;
pub use consultation::*;
pub use exam::*;
pub use health_datum::*;
pub use patient::*;
pub use record_type::*;
