//! Incremental JSON array output
//!
//! [`ArrayWriter`] frames a stream of converted values as one JSON array,
//! written piece by piece: `[` up front, a `,` separator between values,
//! `]` on [`ArrayWriter::finish`]. The output is valid JSON only once the
//! whole stream completes; a run that aborts mid-way leaves the partial
//! output as-is.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value as JsonValue;
use std::io::{self, Write};

use crate::error::Result;

const DEFAULT_INDENT: usize = 4;

/// Writes a JSON array one value at a time
pub struct ArrayWriter<W: Write> {
    writer: W,
    indent: Vec<u8>,
    count: usize,
}

impl<W: Write> ArrayWriter<W> {
    /// Open the array: writes the leading `[`
    pub fn new(writer: W) -> Result<Self> {
        Self::with_indent(writer, DEFAULT_INDENT)
    }

    /// Open the array with a custom indentation width
    pub fn with_indent(mut writer: W, indent: usize) -> Result<Self> {
        writer.write_all(b"[\n")?;
        Ok(Self {
            writer,
            indent: vec![b' '; indent],
            count: 0,
        })
    }

    /// Append one value, pretty-printed, with a separator when needed
    pub fn write_value(&mut self, value: &JsonValue) -> Result<()> {
        if self.count > 0 {
            self.writer.write_all(b",\n")?;
        }

        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut self.writer, formatter);
        value.serialize(&mut serializer).map_err(io::Error::from)?;

        self.count += 1;
        Ok(())
    }

    /// Number of values written so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Close the array and flush, returning the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.write_all(b"\n]")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}
