//! Base types for structure of VPK directory files.

use binrw::{BinRead, BinWrite};

/// VPK version 2 header
///
/// Every directory file starts with this fixed 28 byte header. All data is stored in little
/// endian format.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct VpkHeader {
    /// Always [`VpkHeader::SIGNATURE`]
    pub signature: u32,

    /// Only [`VpkHeader::VERSION`] is supported
    pub version: u32,

    /// The size in bytes of the directory tree following the header
    pub tree_size: u32,

    /// How many bytes of file content are stored in the directory file itself
    pub file_data_section_size: u32,

    /// The size of the section holding MD5 checksums for archive content
    pub archive_md5_section_size: u32,

    /// The size of the section holding MD5 checksums for this file's content
    pub other_md5_section_size: u32,

    /// The size of the public key and signature section
    pub signature_section_size: u32,
}

impl VpkHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = 28;

    pub const SIGNATURE: u32 = 0x55AA1234;

    pub const VERSION: u32 = 2;

    /// Offset of the first byte after the directory tree, where data for
    /// [`VpkDirectoryEntry::INLINE_ARCHIVE`] entries is stored
    pub fn data_section_start(&self) -> u64 {
        Self::SIZE as u64 + self.tree_size as u64
    }
}

/// VPK directory entry
///
/// Follows every file name in the directory tree, and is itself followed by
/// `preload_bytes` bytes of inline file content.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct VpkDirectoryEntry {
    /// A CRC-32 checksum of the complete file content
    pub crc: u32,

    /// The number of bytes stored inline after this entry
    pub preload_bytes: u16,

    /// Index of the numbered archive holding the rest of the data
    pub archive_index: u16,

    /// Offset of the data inside the archive
    pub entry_offset: u32,

    /// Number of bytes stored in the archive, zero when the preload holds everything
    pub entry_length: u32,

    /// Always [`VpkDirectoryEntry::TERMINATOR`]
    pub terminator: u16,
}

impl VpkDirectoryEntry {
    /// Size of an entry in bytes
    pub const SIZE: usize = 18;

    pub const TERMINATOR: u16 = 0xFFFF;

    /// Archive index meaning the data follows the tree inside the directory file
    pub const INLINE_ARCHIVE: u16 = 0x7FFF;
}
