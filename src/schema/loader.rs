// Schema loader: derives an ordered field schema from a C-style
// struct definition plus its #define'd char-array lengths

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::descriptor::{FieldDescriptor, FieldKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("char array '{field}' in schema '{schema}' references undefined length constant '{constant}'")]
    UndefinedLength {
        schema: String,
        field: String,
        constant: String,
    },
}

lazy_static! {
    // C and C++ comments, including /* */ spanning lines
    static ref COMMENTS: Regex = Regex::new(r"(?s)//.*?\n|/\*.*?\*/").unwrap();
}

/// Ordered field schema for one record shape. Declaration order in the
/// source text is the on-disk field order; the schema is built once and
/// shared read-only by every decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Parse a struct definition into an ordered schema.
    ///
    /// Lines that do not look like a field declaration are skipped; the
    /// source descriptions carry braces, directives and blank lines that
    /// are not layout. The only fatal condition is a char array whose
    /// length constant is not defined in the same source.
    pub fn parse(name: &str, source: &str) -> Result<Schema, SchemaError> {
        let text = COMMENTS.replace_all(source, "");

        // first extract the lengths of the char[] fields
        let mut lengths: HashMap<&str, usize> = HashMap::new();
        for line in text.lines() {
            let line = line.trim_start();
            if !line.starts_with("#define") {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() == 3 {
                if let Ok(len) = tokens[2].parse::<usize>() {
                    lengths.insert(tokens[1], len);
                }
            }
        }

        // now parse the declarations
        let mut fields: Vec<FieldDescriptor> = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || !line.contains(';') {
                continue;
            }
            let decl = line.split(';').next().unwrap_or("");
            let tokens: Vec<&str> = decl.split_whitespace().collect();

            let field = match tokens.as_slice() {
                ["struct", ctype, cname] if !decl.contains('{') => {
                    if *ctype != "band" {
                        tracing::debug!("skipping unknown nested record '{}'", decl.trim());
                        continue;
                    }
                    FieldDescriptor {
                        name: (*cname).to_string(),
                        kind: FieldKind::Band,
                        size: 0,
                    }
                }
                ["char", cname] if cname.contains('[') => {
                    match char_descriptor(name, cname, &lengths)? {
                        Some(field) => field,
                        None => continue,
                    }
                }
                [ctype, cname] => match FieldKind::from_scalar(*ctype) {
                    Some(kind) => FieldDescriptor {
                        name: (*cname).to_string(),
                        kind,
                        size: kind.fixed_size().unwrap_or(0),
                    },
                    None => {
                        tracing::debug!("skipping declaration '{}'", decl.trim());
                        continue;
                    }
                },
                _ => continue,
            };
            fields.push(field);
        }

        Ok(Schema {
            name: name.to_string(),
            fields,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Sum of the descriptor sizes: the fixed wire size of this record.
    /// An embedded band counts zero here; its own schema supplies the
    /// bytes at decode time.
    pub fn wire_size(&self) -> usize {
        self.fields.iter().map(|f| f.size).sum()
    }
}

/// `char name[LEN]` where LEN is a literal or a #define'd constant.
/// Returns Ok(None) for a char declaration with no usable array suffix.
fn char_descriptor(
    schema: &str,
    cname: &str,
    lengths: &HashMap<&str, usize>,
) -> Result<Option<FieldDescriptor>, SchemaError> {
    let Some((base, suffix)) = cname.split_once('[') else {
        return Ok(None);
    };
    let len_token = suffix.trim_end_matches(']');
    let size = match len_token.parse::<usize>() {
        Ok(n) => n,
        Err(_) => match lengths.get(len_token) {
            Some(&n) => n,
            None => {
                return Err(SchemaError::UndefinedLength {
                    schema: schema.to_string(),
                    field: base.to_string(),
                    constant: len_token.to_string(),
                })
            }
        },
    };
    Ok(Some(FieldDescriptor {
        name: base.to_string(),
        kind: FieldKind::Char,
        size,
    }))
}
