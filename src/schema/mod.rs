// Record schemas derived from the bundled struct descriptions
// (data/timer.h, data/band.h, data/mini.h)

pub mod descriptor;
pub mod loader;

pub use descriptor::{FieldDescriptor, FieldKind};
pub use loader::{Schema, SchemaError};

use lazy_static::lazy_static;

lazy_static! {
    /// Fixed header layout, one per process, shared read-only.
    pub static ref TIMER_SCHEMA: Schema =
        Schema::parse("timer", include_str!("data/timer.h"))
            .expect("bundled timer.h must parse");

    /// Embedded frequency band layout.
    pub static ref BAND_SCHEMA: Schema =
        Schema::parse("band", include_str!("data/band.h"))
            .expect("bundled band.h must parse");

    /// Per sub-integration layout.
    pub static ref SUBINT_SCHEMA: Schema =
        Schema::parse("mini", include_str!("data/mini.h"))
            .expect("bundled mini.h must parse");
}
