//! Types for reading VPK directories
//!

use binrw::{BinRead, NullString};
use crc::{Crc, CRC_32_ISO_HDLC};
use indexmap::{map::Entry, IndexMap};
use std::{
    fmt::{self, Debug},
    fs::File,
    io::{self, Cursor, Read, Seek, SeekFrom},
    ops::Range,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument, trace, warn};

use crate::{
    error::{Error, FileNotFoundError, Result},
    types::{VpkDirectoryEntry, VpkHeader},
};

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Structure representing a VPK file entry.
#[derive(Debug, Clone, Default)]
pub struct VpkEntryData {
    /// Full virtual path, `directory/filename.extension`
    pub file_name: Box<str>,
    /// CRC32 checksum of the complete file
    pub crc32: u32,
    /// Index of the numbered archive holding the data
    pub archive_index: u16,
    /// Offset of the data inside the archive
    pub data_offset: u32,
    /// Number of bytes stored in the archive
    pub data_length: u32,
    /// Range of the inline preload data within the directory file
    pub preload: Range<usize>,
}

impl VpkEntryData {
    /// Whether the preload data holds the complete file
    pub fn preload_fullfile(&self) -> bool {
        self.data_length == 0
    }
}

/// A struct for reading an entry from a VPK directory
#[derive(Clone, Copy)]
pub struct VpkFile<'a> {
    archive: &'a VpkArchive,
    data: &'a VpkEntryData,
}

impl Debug for VpkFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "VpkFile({:#?})", self.data)
    }
}

/// Methods for retrieving information on VPK file entries
impl<'a> VpkFile<'a> {
    /// Get the virtual path of the file
    ///
    /// # Warnings
    ///
    /// It is dangerous to use this name directly when extracting an archive.
    /// It may contain an absolute path (`/etc/shadow`), or break out of the
    /// current directory (`../runtime`).
    pub fn name(&self) -> &'a str {
        &self.data.file_name
    }

    /// Get the CRC32 checksum recorded for the file
    pub fn crc32(&self) -> u32 {
        self.data.crc32
    }

    /// Get the index of the archive holding the file
    pub fn archive_index(&self) -> u16 {
        self.data.archive_index
    }

    /// Get the offset of the data inside its archive
    pub fn data_offset(&self) -> u32 {
        self.data.data_offset
    }

    /// Get the number of bytes stored in the archive
    pub fn data_length(&self) -> u32 {
        self.data.data_length
    }

    /// Get the total size of the file in bytes
    pub fn size(&self) -> u64 {
        self.data.preload.len() as u64 + self.data.data_length as u64
    }

    /// Get the inline preload data, borrowed from the directory
    pub fn preload(&self) -> &'a [u8] {
        &self.archive.buffer[self.data.preload.clone()]
    }

    /// Whether the preload data holds the complete file
    pub fn is_preload_only(&self) -> bool {
        self.data.preload_fullfile()
    }

    /// Get the path of the numbered archive holding the data
    ///
    /// `None` when the data lives in the directory file itself.
    pub fn archive_path(&self) -> Result<Option<PathBuf>> {
        if self.data.archive_index == VpkDirectoryEntry::INLINE_ARCHIVE {
            return Ok(None);
        }
        self.archive.archive_path(self.data.archive_index).map(Some)
    }

    /// Assemble the complete file content.
    ///
    /// Reads the preload data followed by the archive data. Numbered archives
    /// are opened and closed again for every call.
    #[instrument(skip(self), fields(name = self.name()), err)]
    pub fn get_data(&self) -> Result<Vec<u8>> {
        let mut buffer = self.preload().to_vec();
        if self.is_preload_only() {
            return Ok(buffer);
        }

        let offset = self.data.data_offset as u64;
        let length = self.data.data_length as u64;

        match self.archive_path()? {
            None => {
                let start = self.archive.header.data_section_start() + offset;
                let range = usize::try_from(start).ok().zip(usize::try_from(length).ok());
                let bytes = range
                    .and_then(|(start, length)| Some(start..start.checked_add(length)?))
                    .and_then(|range| self.archive.buffer.get(range))
                    .ok_or(Error::DataOutOfBounds { offset: start, length })?;
                buffer.extend_from_slice(bytes);
            }
            Some(path) => {
                trace!(path = %path.display(), offset, length, "reading archive");
                let read = File::open(&path).and_then(|mut file| {
                    file.seek(SeekFrom::Start(offset))?;
                    let read = file.take(length).read_to_end(&mut buffer)?;
                    if (read as u64) < length {
                        return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            format!("archive ended after {read} of {length} bytes"),
                        ));
                    }
                    Ok(())
                });
                if let Err(source) = read {
                    return Err(Error::ArchiveRead {
                        path,
                        offset,
                        length,
                        source,
                    });
                }
            }
        }

        Ok(buffer)
    }

    /// Assemble the complete file content and check it against the recorded CRC32
    pub fn read_verified(&self) -> Result<Vec<u8>> {
        let data = self.get_data()?;
        let actual = CRC32.checksum(&data);
        if actual != self.data.crc32 {
            return Err(Error::ChecksumMismatch {
                name: self.name().to_owned(),
                expected: self.data.crc32,
                actual,
            });
        }
        Ok(data)
    }
}

/// VPK directory reader
///
/// ```no_run
/// fn list_vpk_contents(path: &str) -> valve_vpk::error::Result<()> {
///     let vpk = valve_vpk::VpkArchive::open(path)?;
///
///     for file in vpk.entries() {
///         println!("{}: {} bytes", file.name(), file.size());
///     }
///
///     if let Some(file) = vpk.find("resource/csgo_english.txt") {
///         let _bytes = file.get_data()?;
///     }
///
///     Ok(())
/// }
/// ```
pub struct VpkArchive {
    path: PathBuf,
    header: VpkHeader,
    buffer: Vec<u8>,
    files: IndexMap<Box<str>, VpkEntryData>,
}

impl Debug for VpkArchive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VpkArchive")
            .field("path", &self.path)
            .field("header", &self.header)
            .field("files", &self.files.len())
            .finish()
    }
}

impl VpkArchive {
    /// Read a VPK directory file, usually named `*_dir.vpk`
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<VpkArchive> {
        let buffer = std::fs::read(path.as_ref())?;
        Self::from_bytes(path.as_ref(), buffer)
    }

    /// Parse a VPK directory already in memory.
    ///
    /// `path` is used to locate the numbered archives next to the directory.
    pub fn from_bytes(path: impl Into<PathBuf>, buffer: Vec<u8>) -> Result<VpkArchive> {
        let header = VpkHeader::read(&mut Cursor::new(&buffer))?;

        if header.signature != VpkHeader::SIGNATURE {
            return Err(Error::InvalidSignature(header.signature));
        }
        if header.version != VpkHeader::VERSION {
            return Err(Error::UnsupportedVersion(header.version));
        }

        let files = Self::get_entries(&buffer, &header)?;
        debug!(files = files.len(), tree_size = header.tree_size, "read vpk directory");

        Ok(VpkArchive {
            path: path.into(),
            header,
            buffer,
            files,
        })
    }

    /// Path of the directory file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header of the directory file
    pub fn header(&self) -> &VpkHeader {
        &self.header
    }

    /// Number of files in this directory
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether this directory contains no files
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all virtual paths in this directory.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.values().map(|f| f.file_name.as_ref())
    }

    /// Returns an iterator over all files in this directory.
    pub fn entries(&self) -> impl Iterator<Item = VpkFile<'_>> {
        self.files.values().map(|data| VpkFile {
            archive: self,
            data,
        })
    }

    /// Look up a file by virtual path, ignoring ASCII case
    pub fn find(&self, name: &str) -> Option<VpkFile<'_>> {
        self.files
            .get(name.to_ascii_lowercase().as_str())
            .map(|data| VpkFile {
                archive: self,
                data,
            })
    }

    /// Search for a file entry by name
    pub fn by_name(&self, name: &str) -> Result<VpkFile<'_>> {
        self.find(name)
            .ok_or_else(|| Error::FileNotFound(FileNotFoundError::Name(name.to_owned())))
    }

    /// Get a contained file by index
    pub fn by_index(&self, file_number: usize) -> Result<VpkFile<'_>> {
        let (_, data) = self
            .files
            .get_index(file_number)
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(file_number)))?;

        Ok(VpkFile {
            archive: self,
            data,
        })
    }

    /// Path of the numbered archive `index`, `pak01_dir.vpk` becoming `pak01_003.vpk` for 3
    pub fn archive_path(&self, index: u16) -> Result<PathBuf> {
        let prefix = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.strip_suffix("_dir"))
            .ok_or_else(|| Error::InvalidArchiveName(self.path.clone()))?;

        Ok(self.path.with_file_name(format!("{prefix}_{index:03}.vpk")))
    }

    fn read_string(reader: &mut Cursor<&[u8]>) -> Result<String> {
        let raw = NullString::read_le(reader).map_err(Self::truncated)?;
        Ok(String::from_utf8_lossy(&raw.0).into_owned())
    }

    fn truncated(source: binrw::Error) -> Error {
        Error::InvalidDirectory(format!("truncated tree: {source}"))
    }

    fn virtual_path(extension: &str, path: &str, name: &str) -> String {
        // A single space stands for "no directory" and "no extension"
        let mut full = String::with_capacity(extension.len() + path.len() + name.len() + 2);
        if path != " " {
            full.push_str(path);
            full.push('/');
        }
        full.push_str(name);
        if extension != " " {
            full.push('.');
            full.push_str(extension);
        }
        full
    }

    fn get_entries(buffer: &[u8], header: &VpkHeader) -> Result<IndexMap<Box<str>, VpkEntryData>> {
        let tree_end = VpkHeader::SIZE + header.tree_size as usize;
        let tree = buffer.get(..tree_end).ok_or_else(|| {
            Error::InvalidDirectory(format!(
                "tree of {} bytes does not fit in {} bytes",
                header.tree_size,
                buffer.len()
            ))
        })?;

        let mut reader = Cursor::new(tree);
        reader.set_position(VpkHeader::SIZE as u64);

        let mut files = IndexMap::new();
        while (reader.position() as usize) < tree_end {
            let extension = Self::read_string(&mut reader)?;
            if extension.is_empty() {
                break;
            }

            loop {
                let path = Self::read_string(&mut reader)?;
                if path.is_empty() {
                    break;
                }

                loop {
                    let name = Self::read_string(&mut reader)?;
                    if name.is_empty() {
                        break;
                    }

                    let entry = VpkDirectoryEntry::read(&mut reader).map_err(Self::truncated)?;
                    let file_name = Self::virtual_path(&extension, &path, &name);
                    if entry.terminator != VpkDirectoryEntry::TERMINATOR {
                        warn!(
                            file = file_name,
                            terminator = entry.terminator,
                            "unexpected entry terminator"
                        );
                    }

                    let start = reader.position() as usize;
                    let preload = start..start + entry.preload_bytes as usize;
                    if preload.end > tree_end {
                        return Err(Error::InvalidDirectory(format!(
                            "preload data of {file_name} runs past the tree"
                        )));
                    }
                    reader.set_position(preload.end as u64);

                    match files.entry(file_name.to_ascii_lowercase().into_boxed_str()) {
                        Entry::Occupied(_) => warn!(file = file_name, "dropping duplicate entry"),
                        Entry::Vacant(slot) => {
                            slot.insert(VpkEntryData {
                                file_name: file_name.into_boxed_str(),
                                crc32: entry.crc,
                                archive_index: entry.archive_index,
                                data_offset: entry.entry_offset,
                                data_length: entry.entry_length,
                                preload,
                            });
                        }
                    }
                }
            }
        }

        Ok(files)
    }
}
