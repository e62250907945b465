// Per sub-integration record and the size of its trailing data block

use std::fmt;

use hifitime::{Duration, Epoch, TimeScale};
use serde::Serialize;

use crate::codec::Cursor;
use crate::schema::SUBINT_SCHEMA;

use super::record::{Record, Value};
use super::Result;

/// One sub-integration: the decoded mini header plus its derived start
/// epoch and integration length. The profile data that follows it on
/// disk is skipped, not decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubInt {
    #[serde(rename = "keywords")]
    record: Record,
    #[serde(serialize_with = "super::serialize_epoch")]
    start: Epoch,
    integration_s: f64,
}

impl SubInt {
    pub fn decode(cursor: &mut Cursor) -> Result<SubInt> {
        let record = Record::decode(&SUBINT_SCHEMA, cursor)?;
        let mjd = record.get("mjd").and_then(Value::as_i32).unwrap_or_default();
        let fracmjd = record
            .get("fracmjd")
            .and_then(Value::as_f64)
            .unwrap_or_default();
        let integration_s = record
            .get("integration")
            .and_then(Value::as_f64)
            .unwrap_or_default();
        Ok(SubInt {
            record,
            start: Epoch::from_mjd_in_time_scale(mjd as f64 + fracmjd, TimeScale::UTC),
            integration_s,
        })
    }

    /// Start of this sub-integration.
    pub fn start(&self) -> Epoch {
        self.start
    }

    /// Integration length.
    pub fn integration(&self) -> Duration {
        Duration::from_seconds(self.integration_s)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }
}

impl fmt::Display for SubInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sub-integration at MJD {:.8} for {:.3} s",
            self.start.to_mjd_utc_days(),
            self.integration_s
        )
    }
}

/// Bytes of profile data following each sub-integration header, from
/// the channel count, polarisation count, bin count and the
/// wts_and_bpass flag of the already-decoded header.
///
/// The no-weights branch and the two per-channel tail terms have not
/// been verified against real captures; keep the arithmetic as-is
/// unless such a capture says otherwise.
///
/// The counts come straight from the file, so the arithmetic saturates
/// rather than wraps: a corrupt header yields an oversized skip that
/// fails as a truncated read, never a panic.
pub fn payload_size(nchan: usize, npol: usize, nbin: usize, wts_and_bpass: bool) -> usize {
    let mut size = if wts_and_bpass {
        // per channel: one weight float plus 2*npol bandpass floats
        nchan.saturating_mul(npol.saturating_mul(2).saturating_add(1).saturating_mul(4))
    } else {
        // scale and offset floats, then 2-byte samples
        nchan
            .saturating_mul(npol)
            .saturating_mul(nbin)
            .saturating_mul(2)
            .saturating_add(2 * 4)
    };
    // per channel: centre frequency and weight floats, bin and pol counts
    size = size.saturating_add(nchan.saturating_mul(2 * 4 + 2 * 4));
    // per channel: two more floats and a 2-byte-wide profile
    size = size.saturating_add(nchan.saturating_mul(nbin.saturating_mul(2).saturating_add(2 * 4)));
    size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subint_bytes(mjd: i32, fracmjd: f64, integration: f64) -> Vec<u8> {
        let mut out = Vec::new();
        for descriptor in SUBINT_SCHEMA.fields() {
            match descriptor.name.as_str() {
                "mjd" => out.extend(mjd.to_be_bytes()),
                "fracmjd" => out.extend(fracmjd.to_be_bytes()),
                "integration" => out.extend(integration.to_be_bytes()),
                _ => out.extend(std::iter::repeat(0u8).take(descriptor.size)),
            }
        }
        out
    }

    #[test]
    fn test_subint_decode() {
        let data = subint_bytes(59000, 0.25, 10.0);
        let mut cursor = Cursor::new(&data);
        let subint = SubInt::decode(&mut cursor).unwrap();

        assert_eq!(
            subint.start(),
            Epoch::from_mjd_in_time_scale(59000.25, TimeScale::UTC)
        );
        assert_eq!(subint.integration(), Duration::from_seconds(10.0));
        assert_eq!(cursor.position(), SUBINT_SCHEMA.wire_size());
    }

    #[test]
    fn test_payload_size_weights_branch() {
        // branch term: 8 * 4 * (1 + 2*2) = 160, tails: 8*16 + 8*(8 + 64*2)
        assert_eq!(payload_size(8, 2, 64, true), 160 + 128 + 1088);
    }

    #[test]
    fn test_payload_size_profile_branch() {
        // 8 + 8*2*64*2 = 2056, same tails as above
        assert_eq!(payload_size(8, 2, 64, false), 2056 + 128 + 1088);
    }

    #[test]
    fn test_payload_size_degenerate() {
        assert_eq!(payload_size(0, 2, 64, true), 0);
        assert_eq!(payload_size(0, 2, 64, false), 8);
    }

    #[test]
    fn test_payload_size_saturates_on_corrupt_counts() {
        let huge = i32::MAX as usize;
        assert_eq!(payload_size(huge, huge, huge, false), usize::MAX);
        assert_eq!(payload_size(huge, huge, huge, true), usize::MAX);
        // a saturated size still fails cleanly as a truncated skip
        let mut cursor = Cursor::new(&[0u8; 16]);
        assert!(cursor.skip(payload_size(huge, huge, huge, false), "x").is_err());
    }
}
