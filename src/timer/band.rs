// Embedded frequency band sub-record

use std::fmt;

use serde::Serialize;

use crate::codec::Cursor;
use crate::schema::BAND_SCHEMA;

use super::record::{Record, Value};
use super::Result;

/// One frequency band as described inside the header: an ordered set of
/// 4-byte scalars plus the convenience values pulled out after decode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    #[serde(rename = "keywords")]
    record: Record,
    frequency: f32,
    bandwidth: f32,
    npol: i32,
}

impl Band {
    /// Decode one band at the cursor using the shared band schema.
    pub fn decode(cursor: &mut Cursor) -> Result<Band> {
        let record = Record::decode(&BAND_SCHEMA, cursor)?;
        let frequency = record
            .get("centrefreq")
            .and_then(Value::as_f32)
            .unwrap_or_default();
        let bandwidth = record.get("bw").and_then(Value::as_f32).unwrap_or_default();
        let npol = record.get("npol").and_then(Value::as_i32).unwrap_or_default();
        Ok(Band {
            record,
            frequency,
            bandwidth,
            npol,
        })
    }

    /// Centre sky frequency, MHz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Bandwidth, MHz. Negative means the band is reversed.
    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    /// Polarisations recorded in this band.
    pub fn npol(&self) -> i32 {
        self.npol
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Bytes the band occupies on disk.
    pub fn wire_size(&self) -> usize {
        BAND_SCHEMA.wire_size()
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz band at {} MHz", self.bandwidth, self.frequency)
    }
}
