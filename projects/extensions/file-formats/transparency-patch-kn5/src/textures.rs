//! The texture table at the start of a KN5 file.
//!
//! ```text
//! magic  "sc6969"
//! i32    version            ; version > 5 adds one unused i32
//! i32    texture count
//! repeat count:
//!   i32  active flag
//!   i32  name length, name bytes (UTF-8)
//!   i32  blob length, blob bytes
//! ```
//!
//! All integers are little endian.

use crate::error::Kn5Error;
use byteorder::{LittleEndian, ReadBytesExt};
use log::trace;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Magic at offset 0 of every KN5 file.
pub const KN5_MAGIC: [u8; 6] = *b"sc6969";

/// Files newer than this carry an extra header field after the version.
const KN5_EXTENDED_HEADER_VERSION: i32 = 5;

/// Where one embedded texture lives in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kn5TextureEntry {
    pub name: String,
    pub active: bool,
    /// Offset of the first blob byte.
    pub offset: u64,
    /// Blob length in bytes.
    pub length: u64,
}

/// Index of the textures embedded in a KN5 file.
#[derive(Debug)]
pub struct Kn5Textures<R> {
    reader: R,
    version: i32,
    entries: Vec<Kn5TextureEntry>,
    by_name: HashMap<String, usize>,
}

impl Kn5Textures<BufReader<File>> {
    /// Opens `path` and reads its texture table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Kn5Error> {
        let file = File::open(path.as_ref())?;
        Self::read(BufReader::new(file))
    }
}

impl<R: Read + Seek> Kn5Textures<R> {
    /// Reads the texture table from the start of `reader`, skipping over the blobs.
    ///
    /// # Errors
    ///
    /// - [`Kn5Error::InvalidMagic`] if the file is not a KN5
    /// - [`Kn5Error::NegativeLength`] for a negative count or length
    /// - [`Kn5Error::InvalidString`] for a name that is not UTF-8
    /// - [`Kn5Error::Io`] if the table is truncated
    pub fn read(mut reader: R) -> Result<Self, Kn5Error> {
        reader.seek(SeekFrom::Start(0))?;

        let mut magic = [0u8; 6];
        reader.read_exact(&mut magic)?;
        if magic != KN5_MAGIC {
            return Err(Kn5Error::InvalidMagic(magic));
        }

        let version = reader.read_i32::<LittleEndian>()?;
        if version > KN5_EXTENDED_HEADER_VERSION {
            reader.read_i32::<LittleEndian>()?;
        }

        let count = read_length(&mut reader, "texture count")?;
        let mut entries = Vec::with_capacity(count.min(1024) as usize);
        let mut by_name = HashMap::with_capacity(entries.capacity());

        for _ in 0..count {
            let active = reader.read_i32::<LittleEndian>()? != 0;

            let name_length = read_length(&mut reader, "name length")?;
            let name_offset = reader.stream_position()?;
            let mut name = vec![0u8; name_length as usize];
            reader.read_exact(&mut name)?;
            let name = String::from_utf8(name).map_err(|_| Kn5Error::InvalidString {
                offset: name_offset,
            })?;

            let length = read_length(&mut reader, "texture length")?;
            let offset = reader.stream_position()?;
            reader.seek(SeekFrom::Current(length as i64))?;

            trace!("KN5 texture {name}: {length} bytes at {offset}");
            by_name.insert(name.clone(), entries.len());
            entries.push(Kn5TextureEntry {
                name,
                active,
                offset,
                length,
            });
        }

        Ok(Self {
            reader,
            version,
            entries,
            by_name,
        })
    }

    /// Reads the blob of the texture called `name`.
    ///
    /// # Errors
    ///
    /// [`Kn5Error::TextureNotFound`] if no such texture exists, [`Kn5Error::Io`] if the blob is
    /// truncated.
    pub fn texture_data(&mut self, name: &str) -> Result<Vec<u8>, Kn5Error> {
        let entry = self
            .entry(name)
            .ok_or_else(|| Kn5Error::TextureNotFound(name.to_owned()))?;
        let (offset, length) = (entry.offset, entry.length);

        self.reader.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; length as usize];
        self.reader.read_exact(&mut data)?;
        Ok(data)
    }
}

impl<R> Kn5Textures<R> {
    /// Format version from the header.
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Every texture in file order.
    pub fn entries(&self) -> &[Kn5TextureEntry] {
        &self.entries
    }

    /// The entry for `name`. A name used twice resolves to the later entry.
    pub fn entry(&self, name: &str) -> Option<&Kn5TextureEntry> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }
}

fn read_length(reader: &mut impl Read, field: &'static str) -> Result<u64, Kn5Error> {
    let value = reader.read_i32::<LittleEndian>()?;
    u64::try_from(value).map_err(|_| Kn5Error::NegativeLength { field, value })
}
