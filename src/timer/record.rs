// Generic record decoding: one shared schema, per-instance values

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::codec::Cursor;
use crate::schema::{FieldDescriptor, FieldKind, Schema, BAND_SCHEMA};

use super::band::Band;
use super::Result;

/// One decoded field value. `Undefined` is the sentinel left behind by
/// a char field whose bytes were not valid text.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i32),
    Float(f32),
    Double(f64),
    UInt(u32),
    Text(String),
    Band(Band),
    Undefined,
}

impl Value {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::UInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_band(&self) -> Option<&Band> {
        match self {
            Value::Band(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::UInt(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Band(v) => write!(f, "{}", v),
            Value::Undefined => write!(f, "<undefined>"),
        }
    }
}

/// A decoded record: a read-only reference to its shared schema plus
/// exclusively-owned values, one per descriptor, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: &'static Schema,
    values: Vec<Value>,
}

impl Record {
    /// Decode every field of `schema` in declaration order. An embedded
    /// band descriptor triggers a full inline band decode.
    pub fn decode(schema: &'static Schema, cursor: &mut Cursor) -> Result<Record> {
        let mut values = Vec::with_capacity(schema.len());
        for descriptor in schema.fields() {
            values.push(decode_field(descriptor, cursor)?);
        }
        Ok(Record { schema, values })
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Named-field lookup, resolved through the schema's ordered list.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.index_of(name).map(|i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldDescriptor, &Value)> {
        self.schema.fields().iter().zip(self.values.iter())
    }

    /// Bytes this record occupied on disk, embedded band included.
    pub fn wire_size(&self) -> usize {
        self.iter()
            .map(|(descriptor, _)| match descriptor.kind {
                FieldKind::Band => BAND_SCHEMA.wire_size(),
                _ => descriptor.size,
            })
            .sum()
    }

    /// One printable line per keyword: `name[type, N bytes] = value`.
    pub fn lines(&self) -> Vec<String> {
        self.iter()
            .map(|(descriptor, value)| {
                format!(
                    "{}[{}, {} bytes] = {}",
                    descriptor.name,
                    descriptor.kind.name(),
                    match descriptor.kind {
                        FieldKind::Band => BAND_SCHEMA.wire_size(),
                        _ => descriptor.size,
                    },
                    value
                )
            })
            .collect()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (descriptor, value) in self.iter() {
            map.serialize_entry(&descriptor.name, value)?;
        }
        map.end()
    }
}

fn decode_field(descriptor: &FieldDescriptor, cursor: &mut Cursor) -> Result<Value> {
    let value = match descriptor.kind {
        FieldKind::Int => Value::Int(cursor.read_i32(&descriptor.name)?),
        FieldKind::Float => Value::Float(cursor.read_f32(&descriptor.name)?),
        FieldKind::Double => Value::Double(cursor.read_f64(&descriptor.name)?),
        FieldKind::UInt32 => Value::UInt(cursor.read_u32(&descriptor.name)?),
        FieldKind::Char => match cursor.read_text(descriptor.size, &descriptor.name)? {
            Some(text) => Value::Text(text),
            None => Value::Undefined,
        },
        FieldKind::Band => Value::Band(Band::decode(cursor)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BAND_SCHEMA;

    fn band_bytes() -> Vec<u8> {
        let mut out = Vec::new();
        for descriptor in BAND_SCHEMA.fields() {
            match descriptor.name.as_str() {
                "centrefreq" => out.extend(1400.0f32.to_be_bytes()),
                "bw" => out.extend((-256.0f32).to_be_bytes()),
                "npol" => out.extend(2i32.to_be_bytes()),
                _ => out.extend([0u8; 4]),
            }
        }
        out
    }

    #[test]
    fn test_record_decode_and_lookup() {
        let data = band_bytes();
        let mut cursor = Cursor::new(&data);
        let record = Record::decode(&BAND_SCHEMA, &mut cursor).unwrap();

        assert_eq!(record.get("centrefreq").unwrap().as_f32(), Some(1400.0));
        assert_eq!(record.get("npol").unwrap().as_i32(), Some(2));
        assert_eq!(record.get("nope"), None);
        assert_eq!(record.wire_size(), BAND_SCHEMA.wire_size());
        assert_eq!(cursor.position(), BAND_SCHEMA.wire_size());
    }

    #[test]
    fn test_record_order_matches_schema() {
        let data = band_bytes();
        let mut cursor = Cursor::new(&data);
        let record = Record::decode(&BAND_SCHEMA, &mut cursor).unwrap();

        let names: Vec<&str> = record.iter().map(|(d, _)| d.name.as_str()).collect();
        let schema_names: Vec<&str> =
            BAND_SCHEMA.fields().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, schema_names);
    }

    #[test]
    fn test_record_truncated() {
        let data = band_bytes();
        let mut cursor = Cursor::new(&data[..10]);
        assert!(Record::decode(&BAND_SCHEMA, &mut cursor).is_err());
    }

    #[test]
    fn test_record_lines() {
        let data = band_bytes();
        let mut cursor = Cursor::new(&data);
        let record = Record::decode(&BAND_SCHEMA, &mut cursor).unwrap();
        let lines = record.lines();
        assert_eq!(lines.len(), BAND_SCHEMA.len());
        assert!(lines.iter().any(|l| l == "centrefreq[float, 4 bytes] = 1400"));
    }
}
