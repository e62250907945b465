// Timer archive header and the sequential file walk that fills it

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use hifitime::{Duration, Epoch};
use serde::Serialize;

use crate::codec::Cursor;
use crate::schema::TIMER_SCHEMA;

use super::band::Band;
use super::position::SkyPosition;
use super::record::{Record, Value};
use super::subint::{payload_size, SubInt};
use super::Result;

/// A fully decoded Timer archive header.
///
/// One instance per file, populated by a single top-to-bottom pass:
/// header fields (band decoded inline at its slot), backend data block,
/// optional polyco text, ephemeris text, then one mini header per
/// declared sub-integration with its profile data skipped. Immutable
/// once built.
#[derive(Debug, Clone, Serialize)]
pub struct TimerHeader {
    filename: String,
    #[serde(rename = "keywords")]
    record: Record,
    subints: Vec<SubInt>,
    poly_text: Option<String>,
    ephem_text: Option<String>,
    telescope: Option<String>,
    psrname: Option<String>,
    nchan: usize,
    npol: usize,
    position: Option<SkyPosition>,
    #[serde(serialize_with = "super::serialize_epoch_opt")]
    start: Option<Epoch>,
    duration_s: f64,
    #[serde(serialize_with = "super::serialize_epoch_opt")]
    stop: Option<Epoch>,
    #[serde(skip)]
    consumed: usize,
}

impl TimerHeader {
    /// Read and decode a Timer file from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<TimerHeader> {
        let path = path.as_ref();
        tracing::debug!("reading Timer file {}", path.display());
        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Self::from_bytes(&path.display().to_string(), &data)
    }

    /// Decode a fully-loaded Timer file image. The walk is strictly
    /// sequential with no backtracking; any shortfall against a
    /// declared length aborts with a truncation error and no header.
    pub fn from_bytes(filename: &str, data: &[u8]) -> Result<TimerHeader> {
        let mut cursor = Cursor::new(data);
        let record = Record::decode(&TIMER_SCHEMA, &mut cursor)?;

        // backend-specific block: length declared, contents opaque
        let be_data_size = length_field(&record, "be_data_size");
        cursor.skip(be_data_size, "be_data")?;

        let nbytespoly = length_field(&record, "nbytespoly");
        let poly_text = if nbytespoly > 0 {
            cursor.read_text(nbytespoly, "polyco")?
        } else {
            None
        };

        let nbytesephem = length_field(&record, "nbytesephem");
        let ephem_text = cursor.read_text(nbytesephem, "ephemeris")?;

        let nchan = length_field(&record, "nsub_band");
        // polarisation count comes from the embedded band, not the header
        let npol = record
            .get("banda")
            .and_then(Value::as_band)
            .map(Band::npol)
            .unwrap_or_default()
            .max(0) as usize;
        let nbin = length_field(&record, "nbin");
        let wts_and_bpass = record
            .get("wts_and_bpass")
            .and_then(Value::as_i32)
            .unwrap_or_default()
            != 0;
        let payload = payload_size(nchan, npol, nbin, wts_and_bpass);

        // the declared count is untrusted; allocation grows with the
        // records actually decoded, not with the header's claim
        let nsub_int = length_field(&record, "nsub_int");
        let mut subints = Vec::new();
        for _ in 0..nsub_int {
            subints.push(SubInt::decode(&mut cursor)?);
            cursor.skip(payload, "sub-integration data")?;
        }

        let telescope = text_field(&record, "telid");
        let psrname = text_field(&record, "psrname");

        let coord_type = text_field(&record, "coord_type").unwrap_or_default();
        let position = SkyPosition::from_coord_type(
            &coord_type,
            record.get("ra").and_then(Value::as_f64).unwrap_or_default(),
            record.get("dec").and_then(Value::as_f64).unwrap_or_default(),
            record.get("l").and_then(Value::as_f32).unwrap_or_default() as f64,
            record.get("b").and_then(Value::as_f32).unwrap_or_default() as f64,
        );

        let start = subints.first().map(SubInt::start);
        let duration = subints
            .iter()
            .map(SubInt::integration)
            .fold(Duration::ZERO, |total, d| total + d);
        let stop = start.map(|epoch| epoch + duration);

        let header = TimerHeader {
            filename: filename.to_string(),
            record,
            subints,
            poly_text,
            ephem_text,
            telescope,
            psrname,
            nchan,
            npol,
            position,
            start,
            duration_s: duration.to_seconds(),
            stop,
            consumed: cursor.position(),
        };

        tracing::debug!("telescope = {:?}", header.telescope);
        tracing::debug!("pulsar = {:?}", header.psrname);
        if let Some(start) = header.start {
            tracing::debug!("start = MJD {:.8} = {}", start.to_mjd_utc_days(), start);
        }
        tracing::debug!("duration = {:.3} s", header.duration_s);

        Ok(header)
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Named-field lookup into the raw header keywords.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.record.get(name)
    }

    pub fn keywords(&self) -> &Record {
        &self.record
    }

    pub fn band(&self) -> &Band {
        self.record
            .get("banda")
            .and_then(Value::as_band)
            .expect("timer schema always carries the band slot")
    }

    pub fn subints(&self) -> &[SubInt] {
        &self.subints
    }

    /// Polyco text, present only when the header declared a length > 0.
    pub fn poly_text(&self) -> Option<&str> {
        self.poly_text.as_deref()
    }

    /// Ephemeris text; `None` only if its bytes were not valid text.
    pub fn ephem_text(&self) -> Option<&str> {
        self.ephem_text.as_deref()
    }

    pub fn telescope(&self) -> Option<&str> {
        self.telescope.as_deref()
    }

    pub fn psrname(&self) -> Option<&str> {
        self.psrname.as_deref()
    }

    /// Frequency channels per sub-integration.
    pub fn nchan(&self) -> usize {
        self.nchan
    }

    /// Polarisations, taken from the embedded band.
    pub fn npol(&self) -> usize {
        self.npol
    }

    /// Source position, `None` when coord_type was not recognised.
    pub fn position(&self) -> Option<SkyPosition> {
        self.position
    }

    /// Start of the first sub-integration; `None` for an empty file.
    pub fn start_time(&self) -> Option<Epoch> {
        self.start
    }

    /// Sum of the sub-integration lengths.
    pub fn duration(&self) -> Duration {
        Duration::from_seconds(self.duration_s)
    }

    pub fn stop_time(&self) -> Option<Epoch> {
        self.stop
    }

    /// Total bytes the decode consumed from the file image.
    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// One printable line per header keyword.
    pub fn lines(&self) -> Vec<String> {
        self.record.lines()
    }
}

fn length_field(record: &Record, name: &str) -> usize {
    record
        .get(name)
        .and_then(Value::as_i32)
        .unwrap_or_default()
        .max(0) as usize
}

fn text_field(record: &Record, name: &str) -> Option<String> {
    record.get(name).and_then(Value::as_text).map(str::to_string)
}

impl fmt::Display for TimerHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Timer file {}: {} at MJD {} for {:.3} s with {}",
            self.filename,
            self.psrname.as_deref().unwrap_or("<unknown>"),
            self.start
                .map(|s| format!("{:.8}", s.to_mjd_utc_days()))
                .unwrap_or_else(|| "<none>".to_string()),
            self.duration_s,
            self.telescope.as_deref().unwrap_or("<unknown>"),
        )
    }
}
