//! The output ZIP: patched textures, an optional JSGME description and the archive comment.

use crate::error::PatchError;
use crate::util::{join_readable, sanitize_file_name, word_wrap};
use log::debug;
use std::io::{self, Seek, SeekFrom, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Column limit of the `Description.jsgme` text.
pub const JSGME_WRAP_WIDTH: usize = 120;

/// Column limit of the archive comment.
pub const COMMENT_WRAP_WIDTH: usize = 80;

/// ZIP comments store their length as a `u16`.
const MAX_COMMENT_LENGTH: usize = u16::MAX as usize;

/// Text describing the patch, listing the cars by display name.
pub fn describe_patch<S: AsRef<str>>(car_names: &[S]) -> String {
    format!(
        "Replaces skin textures to make windscreen banners non-transparent based on set of rules. Affects: {}.",
        join_readable(car_names)
    )
}

/// Folder every entry sits under when packing as a JSGME mod.
pub fn mod_prefix<S: AsRef<str>>(car_names: &[S]) -> String {
    match car_names {
        [single] => format!(
            "MODS/Transparency Banner Patch For {}/",
            sanitize_file_name(single.as_ref())
        ),
        _ => "MODS/Transparency Banner Patch/".to_owned(),
    }
}

/// ZIP writer that places textures at `content/cars/{car}/skins/{skin}/{texture}`.
pub struct PatchArchive<W: Write + Seek> {
    zip: ZipWriter<W>,
    prefix: String,
}

impl<W: Write + Seek> PatchArchive<W> {
    /// Starts an archive whose entries all sit below `prefix` (empty or ending in `/`).
    pub fn new(writer: W, prefix: String) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            prefix,
        }
    }

    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }

    /// Writes `{prefix}Description.jsgme`.
    pub fn add_description(&mut self, description: &str) -> Result<(), PatchError> {
        let name = format!("{}Description.jsgme", self.prefix);
        self.zip.start_file(name, Self::options())?;
        self.zip
            .write_all(word_wrap(description, JSGME_WRAP_WIDTH).as_bytes())?;
        Ok(())
    }

    /// Writes one patched texture.
    pub fn add_texture(
        &mut self,
        car_id: &str,
        skin: &str,
        texture: &str,
        data: &[u8],
    ) -> Result<(), PatchError> {
        let name = format!(
            "{}content/cars/{car_id}/skins/{skin}/{texture}",
            self.prefix
        );
        debug!("Adding {name} ({} bytes)", data.len());
        self.zip.start_file(name, Self::options())?;
        self.zip.write_all(data)?;
        Ok(())
    }

    /// Writes the central directory and returns the underlying writer.
    pub fn finish(self) -> Result<W, PatchError> {
        Ok(self.zip.finish()?)
    }
}

/// Sets the comment of a finished archive that has none.
///
/// The text is wrapped, encoded as Windows-1252 and cut to 65535 bytes, then written over the
/// empty comment length at the end of the file.
pub fn write_archive_comment<W: Write + Seek>(archive: &mut W, text: &str) -> io::Result<()> {
    let wrapped = word_wrap(text, COMMENT_WRAP_WIDTH);
    let (encoded, _, _) = encoding_rs::WINDOWS_1252.encode(&wrapped);
    let comment = &encoded[..encoded.len().min(MAX_COMMENT_LENGTH)];

    archive.seek(SeekFrom::End(-2))?;
    archive.write_all(&(comment.len() as u16).to_le_bytes())?;
    archive.write_all(comment)?;
    archive.flush()
}
