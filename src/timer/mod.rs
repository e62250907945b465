// Timer archive decoding: header, embedded band, sub-integrations

pub mod band;
pub mod header;
pub mod position;
pub mod record;
pub mod subint;

pub use band::Band;
pub use header::TimerHeader;
pub use position::SkyPosition;
pub use record::{Record, Value};
pub use subint::{payload_size, SubInt};

use hifitime::Epoch;
use serde::Serializer;
use thiserror::Error;

use crate::codec::Truncated;

#[derive(Error, Debug)]
pub enum TimerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Truncated(#[from] Truncated),
}

pub type Result<T> = std::result::Result<T, TimerError>;

pub(crate) fn serialize_epoch<S: Serializer>(
    epoch: &Epoch,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(epoch.to_mjd_utc_days())
}

pub(crate) fn serialize_epoch_opt<S: Serializer>(
    epoch: &Option<Epoch>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match epoch {
        Some(epoch) => serializer.serialize_some(&epoch.to_mjd_utc_days()),
        None => serializer.serialize_none(),
    }
}
