//! Record file codec
//!
//! Streaming decode of a JSON array of records and pretty-printed encode.
//!
//! Decoding walks the array element by element through serde's `SeqAccess`,
//! so an id lookup only keeps the matching record in memory instead of
//! materializing the whole collection first.

use std::fmt;
use std::io::{Read, Write};

use serde::de::{Deserializer as _, SeqAccess, Visitor};

use crate::error::Result;
use crate::record::{has_id, Record};

/// Decode a JSON array of records from `reader`
///
/// With `id`, only records whose `id` equals it are kept.
/// Trailing non-whitespace after the array is an error.
pub fn decode_records<R: Read>(reader: R, id: Option<&str>) -> Result<Vec<Record>> {
    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    let records = (&mut deserializer).deserialize_seq(RecordSeqVisitor { id })?;
    deserializer.end()?;
    Ok(records)
}

/// Encode records as a pretty-printed JSON array into `writer`
pub fn encode_records<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

/// Visits the top-level array, keeping the records that pass the id filter
struct RecordSeqVisitor<'a> {
    id: Option<&'a str>,
}

impl<'de, 'a> Visitor<'de> for RecordSeqVisitor<'a> {
    type Value = Vec<Record>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON array of record objects")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut records = Vec::with_capacity(seq.size_hint().unwrap_or(0));

        while let Some(record) = seq.next_element::<Record>()? {
            match self.id {
                Some(id) if !has_id(&record, id) => continue,
                _ => records.push(record),
            }
        }

        Ok(records)
    }
}
