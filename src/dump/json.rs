//! Line-delimited JSON dump.
//!
//! One object per line: a `header` object, then one `ifd` object per
//! directory with its entries inlined. Raw byte payloads are hex strings.

use std::io::Write;

use serde::Serialize;
use serde_json::json;

use crate::error::IoError;
use crate::format::tiff::{tag_name, DecodedEntry, IfdKind, IndirectData, Payload, Value};
use crate::format::FileHeader;

use super::{write_error, DumpSink};

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Serialize)]
struct HeaderRecord {
    r#type: &'static str,
    container: &'static str,
    byte_order: &'static str,
    tiff_base: u64,
    magic: u16,
    first_ifd_offset: u32,
}

#[derive(Debug, Serialize)]
struct IfdRecord {
    r#type: &'static str,
    kind: &'static str,
    offset: u32,
    entries: Vec<EntryRecord>,
    next_ifd_offset: u32,
}

#[derive(Debug, Serialize)]
struct EntryRecord {
    tag: u16,
    tag_name: &'static str,
    field_type: u16,
    type_name: &'static str,
    count: u32,
    /// Present for entries stored outside the value slot
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Vec<ValueRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hex: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValueRecord {
    value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'static str>,
}

impl From<&Value> for ValueRecord {
    fn from(value: &Value) -> Self {
        let (json, description) = match *value {
            Value::Ascii(byte) | Value::Raw(byte) => (json!(byte), ""),
            Value::Short { value, description } => (json!(value), description),
            Value::Long { value, description } => (json!(value), description),
            Value::Rational {
                numerator,
                denominator,
            } => (
                json!({
                    "numerator": numerator,
                    "denominator": denominator,
                    "quotient": value.quotient(),
                }),
                "",
            ),
            Value::SRational {
                numerator,
                denominator,
            } => (
                json!({
                    "numerator": numerator,
                    "denominator": denominator,
                    "quotient": value.quotient(),
                }),
                "",
            ),
            Value::SShort(v) => (json!(v), ""),
            Value::SLong(v) => (json!(v), ""),
            Value::Float(v) => (json!(v), ""),
            Value::Double(v) => (json!(v), ""),
        };

        Self {
            value: json,
            description: (!description.is_empty()).then_some(description),
        }
    }
}

impl From<&DecodedEntry> for EntryRecord {
    fn from(entry: &DecodedEntry) -> Self {
        let mut record = EntryRecord {
            tag: entry.tag,
            tag_name: tag_name(entry.tag),
            field_type: entry.field_type.as_u16(),
            type_name: entry.field_type.name(),
            count: entry.count,
            offset: None,
            values: None,
            text: None,
            hex: None,
        };

        match &entry.payload {
            Payload::Inline(value) => record.values = Some(vec![value.into()]),
            Payload::InlineBytes(bytes) => record.hex = Some(hex::encode(bytes)),
            Payload::Indirect { offset, data } => {
                record.offset = Some(*offset);
                match data {
                    IndirectData::Text(_) => record.text = data.text(),
                    IndirectData::Bytes(bytes) => record.hex = Some(hex::encode(bytes)),
                    IndirectData::Values(values) => {
                        record.values = Some(values.iter().map(ValueRecord::from).collect())
                    }
                }
            }
        }

        record
    }
}

// =============================================================================
// JsonDumper
// =============================================================================

/// Writes one JSON object per line to any [`Write`].
pub struct JsonDumper<W: Write> {
    out: W,
    current: Option<IfdRecord>,
}

impl<W: Write> JsonDumper<W> {
    pub fn new(out: W) -> Self {
        Self { out, current: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<T: Serialize>(&mut self, record: &T) -> Result<(), IoError> {
        serde_json::to_writer(&mut self.out, record).map_err(|e| IoError::Write(e.to_string()))?;
        self.out.write_all(b"\n").map_err(write_error)
    }
}

impl<W: Write> DumpSink for JsonDumper<W> {
    fn header(&mut self, header: &FileHeader) -> Result<(), IoError> {
        self.emit(&HeaderRecord {
            r#type: "header",
            container: header.container.name(),
            byte_order: header.byte_order.description(),
            tiff_base: header.tiff_base,
            magic: header.magic,
            first_ifd_offset: header.first_ifd_offset,
        })
    }

    fn begin_exif(&mut self) -> Result<(), IoError> {
        Ok(())
    }

    fn begin_ifd(&mut self, kind: IfdKind, offset: u32, entry_count: u16) -> Result<(), IoError> {
        self.current = Some(IfdRecord {
            r#type: "ifd",
            kind: kind.name(),
            offset,
            entries: Vec::with_capacity(usize::from(entry_count)),
            next_ifd_offset: 0,
        });
        Ok(())
    }

    fn entry(&mut self, _index: u16, entry: &DecodedEntry) -> Result<(), IoError> {
        if let Some(ifd) = self.current.as_mut() {
            ifd.entries.push(entry.into());
        }
        Ok(())
    }

    fn end_ifd(&mut self, next_offset: u32) -> Result<(), IoError> {
        match self.current.take() {
            Some(mut ifd) => {
                ifd.next_ifd_offset = next_offset;
                self.emit(&ifd)
            }
            None => Ok(()),
        }
    }

    fn finish(&mut self) -> Result<(), IoError> {
        self.out.flush().map_err(write_error)
    }
}
