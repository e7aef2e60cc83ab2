use crate::{
    util::{trim_trailing_spaces, write_padded, ByteReader},
    Charset, Error, Value,
};
use std::collections::BTreeMap;
use tracing::{trace, warn};

/// Width of an integer field on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntWidth {
    I16,
    I32,
}

impl IntWidth {
    const fn len(self) -> usize {
        match self {
            IntWidth::I16 => 2,
            IntWidth::I32 => 4,
        }
    }

    fn read(self, reader: &mut ByteReader) -> Result<i64, Error> {
        match self {
            IntWidth::I16 => reader.read_i16().map(i64::from),
            IntWidth::I32 => reader.read_i32().map(i64::from),
        }
    }

    /// Writes the low bits of `x`, matching the wrap-around of a C integer
    /// store
    fn write(self, out: &mut Vec<u8>, x: i64) {
        match self {
            IntWidth::I16 => out.extend_from_slice(&(x as i16).to_le_bytes()),
            IntWidth::I32 => out.extend_from_slice(&(x as i32).to_le_bytes()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    /// Space padded text of the given width
    Text(usize),

    Int(IntWidth),

    /// A run of integers stored as one array value
    IntArray(IntWidth, usize),
}

impl FieldKind {
    const fn len(self) -> usize {
        match self {
            FieldKind::Text(width) => width,
            FieldKind::Int(width) => width.len(),
            FieldKind::IntArray(width, count) => width.len() * count,
        }
    }
}

/// One field of a fixed record. The path is a key into the record map,
/// optionally followed by a key into a nested map (eg: `COST` / `MC`).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    path: &'static [&'static str],
    kind: FieldKind,
}

impl Field {
    pub(crate) const fn text(path: &'static [&'static str], width: usize) -> Field {
        Field {
            path,
            kind: FieldKind::Text(width),
        }
    }

    pub(crate) const fn i16(path: &'static [&'static str]) -> Field {
        Field {
            path,
            kind: FieldKind::Int(IntWidth::I16),
        }
    }

    pub(crate) const fn i32_array(path: &'static [&'static str], count: usize) -> Field {
        Field {
            path,
            kind: FieldKind::IntArray(IntWidth::I32, count),
        }
    }
}

/// Binary layout of an array-shaped file: a sequence of records that all
/// share the same fields at the same offsets.
#[derive(Debug)]
pub(crate) struct RecordLayout {
    pub(crate) name: &'static str,
    pub(crate) fields: &'static [Field],

    /// Number of slots the game defines; extra records in a file are not
    /// decoded
    pub(crate) max_records: usize,
}

impl RecordLayout {
    /// Size of one record in bytes
    pub(crate) const fn width(&self) -> usize {
        let mut result = 0;
        let mut i = 0;
        while i < self.fields.len() {
            result += self.fields[i].kind.len();
            i += 1;
        }
        result
    }

    pub(crate) fn unpack(&self, data: &[u8], charset: &dyn Charset) -> Result<Value, Error> {
        let width = self.width();
        let records = data
            .chunks_exact(width)
            .take(self.max_records)
            .map(|chunk| self.unpack_record(chunk, charset))
            .collect::<Result<Vec<_>, _>>()?;

        trace!(
            format = self.name,
            records = records.len(),
            ignored_bytes = data.len() - records.len() * width,
            "unpacked records"
        );
        Ok(Value::Array(records))
    }

    fn unpack_record(&self, data: &[u8], charset: &dyn Charset) -> Result<Value, Error> {
        let mut reader = ByteReader::new(data);
        let mut record = BTreeMap::new();
        for field in self.fields {
            let value = match field.kind {
                FieldKind::Text(width) => Value::Text(read_text(reader.read_bytes(width)?, charset)),
                FieldKind::Int(width) => Value::Integer(width.read(&mut reader)?),
                FieldKind::IntArray(width, count) => Value::Array(
                    (0..count)
                        .map(|_| width.read(&mut reader).map(Value::Integer))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
            };
            insert_path(&mut record, field.path, value);
        }

        Ok(Value::Map(record))
    }

    pub(crate) fn pack(&self, value: &Value, charset: &dyn Charset) -> Vec<u8> {
        let records: &[Value] = match value.as_array() {
            Some(records) => records,
            None => {
                warn!(format = self.name, "expected an array of records, writing an empty file");
                &[]
            }
        };

        let mut out = Vec::with_capacity(records.len() * self.width());
        for record in records {
            self.pack_record(&mut out, record, charset);
        }
        out
    }

    fn pack_record(&self, out: &mut Vec<u8>, record: &Value, charset: &dyn Charset) {
        for field in self.fields {
            let value = lookup_path(record, field.path);
            match field.kind {
                FieldKind::Text(width) => write_text(out, value, width, charset),
                FieldKind::Int(width) => width.write(out, int_or_zero(value, field.path)),
                FieldKind::IntArray(width, count) => {
                    for i in 0..count {
                        let element = value.and_then(|x| x.get_index(i)).filter(|x| !x.is_null());
                        width.write(out, int_or_zero(element, field.path));
                    }
                }
            }
        }
    }
}

fn insert_path(map: &mut BTreeMap<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [key] => {
            map.insert(String::from(*key), value);
        }
        [key, rest @ ..] => {
            let entry = map
                .entry(String::from(*key))
                .or_insert_with(Value::new_map);
            if let Value::Map(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}

fn lookup_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |acc, key| acc.get(key))
}

/// Decodes a space padded text field
pub(crate) fn read_text(data: &[u8], charset: &dyn Charset) -> String {
    charset.decode(trim_trailing_spaces(data)).into_owned()
}

/// Encodes a text field, padding or cutting it to `width` bytes
fn write_text(out: &mut Vec<u8>, value: Option<&Value>, width: usize, charset: &dyn Charset) {
    let text = value.and_then(Value::to_text).unwrap_or_default();
    write_padded(out, &charset.encode(&text), width);
}

/// Integer for a field, where absent or unconvertible values are zero
pub(crate) fn int_or_zero(value: Option<&Value>, path: &[&str]) -> i64 {
    match value {
        None => 0,
        Some(x) => x.to_integer().unwrap_or_else(|| {
            warn!(field = ?path, "value is not an integer, writing zero");
            0
        }),
    }
}
