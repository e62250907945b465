// Field descriptors derived from the bundled struct definitions

use serde::Serialize;

/// Primitive kind of one header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// 32-bit signed integer, big-endian.
    Int,
    /// IEEE-754 binary32, big-endian.
    Float,
    /// IEEE-754 binary64, big-endian.
    Double,
    /// 32-bit unsigned integer, big-endian.
    UInt32,
    /// Fixed-length NUL-padded text.
    Char,
    /// Embedded band sub-record, decoded with its own schema.
    Band,
}

impl FieldKind {
    /// Map a scalar C type name to its kind. `char` and `struct band`
    /// declarations are handled separately by the loader.
    pub fn from_scalar(ctype: &str) -> Option<FieldKind> {
        match ctype {
            "int" => Some(FieldKind::Int),
            "float" => Some(FieldKind::Float),
            "double" => Some(FieldKind::Double),
            "uint32_t" => Some(FieldKind::UInt32),
            _ => None,
        }
    }

    /// Wire size fixed by the kind itself, if any.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            FieldKind::Int | FieldKind::Float | FieldKind::UInt32 => Some(4),
            FieldKind::Double => Some(8),
            FieldKind::Char | FieldKind::Band => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::UInt32 => "uint32_t",
            FieldKind::Char => "char",
            FieldKind::Band => "band",
        }
    }
}

/// One named field of a record schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Bytes occupied on disk. Zero for an embedded band: the nested
    /// schema's own wire size is substituted at decode time.
    pub size: usize,
}
