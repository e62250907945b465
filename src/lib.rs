// PSRTIMER-RS: reader for the legacy PSRCHIVE "Timer" pulsar archive format

pub mod codec;
pub mod schema;
pub mod timer;

// Re-export commonly used types
pub use codec::{Cursor, Truncated};
pub use schema::{
    FieldDescriptor, FieldKind, Schema, SchemaError, BAND_SCHEMA, SUBINT_SCHEMA, TIMER_SCHEMA,
};
pub use timer::{payload_size, Band, SkyPosition, SubInt, TimerError, TimerHeader, Value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
