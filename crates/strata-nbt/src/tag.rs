use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::collections::HashMap;
use std::io::{self, Read, Write};

/// One node of a tag tree.
///
/// Numeric type ids (0-12) follow the on-disk encoding. Compounds map field
/// names to child tags; lists are homogeneous and unnamed.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Tag>),
    Compound(HashMap<String, Tag>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub fn type_id(&self) -> u8 {
        match self {
            Tag::End => 0,
            Tag::Byte(_) => 1,
            Tag::Short(_) => 2,
            Tag::Int(_) => 3,
            Tag::Long(_) => 4,
            Tag::Float(_) => 5,
            Tag::Double(_) => 6,
            Tag::ByteArray(_) => 7,
            Tag::String(_) => 8,
            Tag::List(_) => 9,
            Tag::Compound(_) => 10,
            Tag::IntArray(_) => 11,
            Tag::LongArray(_) => 12,
        }
    }

    /// Builds a compound from `(name, tag)` pairs. Convenience for tests and
    /// for assembling trees by hand.
    pub fn compound<S, I>(entries: I) -> Tag
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Tag)>,
    {
        Tag::Compound(
            entries
                .into_iter()
                .map(|(name, tag)| (name.into(), tag))
                .collect(),
        )
    }

    /// Reads one named tag: type id, name, payload. `End` carries neither
    /// name nor payload.
    pub fn read<R: Read>(reader: &mut R) -> io::Result<(String, Tag)> {
        let type_id = reader.read_u8()?;
        if type_id == 0 {
            return Ok((String::new(), Tag::End));
        }
        let name = read_string(reader)?;
        let tag = Tag::read_payload(reader, type_id)?;
        Ok((name, tag))
    }

    fn read_payload<R: Read>(reader: &mut R, type_id: u8) -> io::Result<Tag> {
        match type_id {
            0 => Ok(Tag::End),
            1 => Ok(Tag::Byte(reader.read_i8()?)),
            2 => Ok(Tag::Short(reader.read_i16::<BigEndian>()?)),
            3 => Ok(Tag::Int(reader.read_i32::<BigEndian>()?)),
            4 => Ok(Tag::Long(reader.read_i64::<BigEndian>()?)),
            5 => Ok(Tag::Float(reader.read_f32::<BigEndian>()?)),
            6 => Ok(Tag::Double(reader.read_f64::<BigEndian>()?)),
            7 => {
                let len = read_len(reader)?;
                let mut raw = vec![0u8; len];
                reader.read_exact(&mut raw)?;
                Ok(Tag::ByteArray(raw.into_iter().map(|b| b as i8).collect()))
            }
            8 => {
                let mut raw = vec![0u8; reader.read_u16::<BigEndian>()? as usize];
                reader.read_exact(&mut raw)?;
                String::from_utf8(raw)
                    .map(Tag::String)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            }
            9 => {
                let element_type = reader.read_u8()?;
                let len = read_len(reader)?;
                let mut elements = Vec::with_capacity(len);
                for _ in 0..len {
                    elements.push(Tag::read_payload(reader, element_type)?);
                }
                Ok(Tag::List(elements))
            }
            10 => {
                let mut fields = HashMap::new();
                loop {
                    let (name, tag) = Tag::read(reader)?;
                    if tag == Tag::End {
                        return Ok(Tag::Compound(fields));
                    }
                    fields.insert(name, tag);
                }
            }
            11 => {
                let len = read_len(reader)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read_i32::<BigEndian>()?);
                }
                Ok(Tag::IntArray(values))
            }
            12 => {
                let len = read_len(reader)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(reader.read_i64::<BigEndian>()?);
                }
                Ok(Tag::LongArray(values))
            }
            other => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("invalid tag type id: {}", other),
            )),
        }
    }

    /// Writes this tag with the given name. The inverse of [`Tag::read`].
    pub fn write<W: Write>(&self, writer: &mut W, name: &str) -> io::Result<()> {
        writer.write_u8(self.type_id())?;
        if *self != Tag::End {
            writer.write_u16::<BigEndian>(name.len() as u16)?;
            writer.write_all(name.as_bytes())?;
        }
        self.write_payload(writer)
    }

    fn write_payload<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Tag::End => Ok(()),
            Tag::Byte(v) => writer.write_i8(*v),
            Tag::Short(v) => writer.write_i16::<BigEndian>(*v),
            Tag::Int(v) => writer.write_i32::<BigEndian>(*v),
            Tag::Long(v) => writer.write_i64::<BigEndian>(*v),
            Tag::Float(v) => writer.write_f32::<BigEndian>(*v),
            Tag::Double(v) => writer.write_f64::<BigEndian>(*v),
            Tag::ByteArray(v) => {
                writer.write_i32::<BigEndian>(v.len() as i32)?;
                writer.write_all(&v.iter().map(|&b| b as u8).collect::<Vec<u8>>())
            }
            Tag::String(v) => {
                writer.write_u16::<BigEndian>(v.len() as u16)?;
                writer.write_all(v.as_bytes())
            }
            Tag::List(elements) => {
                // An empty list is encoded with element type End.
                let element_type = elements.first().map_or(0, Tag::type_id);
                writer.write_u8(element_type)?;
                writer.write_i32::<BigEndian>(elements.len() as i32)?;
                for element in elements {
                    element.write_payload(writer)?;
                }
                Ok(())
            }
            Tag::Compound(fields) => {
                for (name, tag) in fields {
                    tag.write(writer, name)?;
                }
                writer.write_u8(0)
            }
            Tag::IntArray(v) => {
                writer.write_i32::<BigEndian>(v.len() as i32)?;
                for &value in v {
                    writer.write_i32::<BigEndian>(value)?;
                }
                Ok(())
            }
            Tag::LongArray(v) => {
                writer.write_i32::<BigEndian>(v.len() as i32)?;
                for &value in v {
                    writer.write_i64::<BigEndian>(value)?;
                }
                Ok(())
            }
        }
    }

    /// Looks up a field of a compound. `None` if this tag is not a compound
    /// or the field is absent.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        match self {
            Tag::Compound(fields) => fields.get(name),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&HashMap<String, Tag>> {
        match self {
            Tag::Compound(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Tag::List(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i8(&self) -> Option<i8> {
        match self {
            Tag::Byte(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Tag::Short(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Tag::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Tag::Long(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Tag::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Tag::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Tag::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Tag::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            Tag::LongArray(v) => Some(v),
            _ => None,
        }
    }
}

fn read_len<R: Read>(reader: &mut R) -> io::Result<usize> {
    let len = reader.read_i32::<BigEndian>()?;
    if len < 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("negative length prefix: {}", len),
        ));
    }
    Ok(len as usize)
}

fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut raw = vec![0u8; reader.read_u16::<BigEndian>()? as usize];
    reader.read_exact(&mut raw)?;
    String::from_utf8(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
