//! This library handles reading **VPK** package directories used by *Valve* games.
//!
//! # VPK Format Documentation
//!
//! A VPK package is split over a directory file, usually named `pak01_dir.vpk`, and any number
//! of numbered archives next to it (`pak01_000.vpk`, `pak01_001.vpk`, ...). The directory lists
//! every file in the package and may carry small files, or the first bytes of files, inline.
//! Only version 2 directories are supported.
//!
//! ## File Structure
//!
//! The directory file consists of a header, the directory tree, and an optional data section.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Signature              | 4 bytes: 0x55AA1234                                        |
//! | 0x0004         | Version                | 4 bytes: Fixed value 2                                     |
//! | 0x0008         | Tree Size              | 4 bytes: Size of the directory tree                        |
//! | 0x000C         | File Data Section Size | 4 bytes: Size of the data section after the tree           |
//! | 0x0010         | Archive MD5 Size       | 4 bytes: Size of the archive checksum section              |
//! | 0x0014         | Other MD5 Size         | 4 bytes: Size of the other checksum section                |
//! | 0x0018         | Signature Section Size | 4 bytes: Size of the public key and signature section      |
//!
//! ### Directory Tree
//!
//! The tree starts right after the 28 byte header and is grouped three levels deep. Every string
//! is NUL terminated and every level ends with an empty string:
//!
//! ```text
//! for each extension       ("txt", "vmt", ...)
//!     for each directory   ("resource", "scripts/items", ...)
//!         for each name    ("csgo_english", ...)
//!             entry (18 bytes)
//!             preload data (entry.preload_bytes bytes)
//! ```
//!
//! A single space stands for an empty directory or an empty extension. The virtual path of a file
//! is `directory/name.extension`.
//!
//! ### Directory Entry
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | CRC32                  | 4 bytes: CRC-32 checksum of the complete file           |
//! | 0x0004         | Preload Bytes          | 2 bytes: Number of bytes stored inline after the entry  |
//! | 0x0006         | Archive Index          | 2 bytes: Numbered archive holding the data              |
//! | 0x0008         | Entry Offset           | 4 bytes: Offset of the data inside the archive          |
//! | 0x000C         | Entry Length           | 4 bytes: Number of bytes stored in the archive          |
//! | 0x0010         | Terminator             | 2 bytes: Always 0xFFFF                                  |
//!
//! - An **Archive Index** of `0x7FFF` means the data is stored in the directory file itself, in
//!   the data section following the tree.
//! - An **Entry Length** of `0` means the preload data holds the complete file.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.vpk`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - Virtual paths are looked up ignoring ASCII case
//!

pub mod error;
pub mod read;
pub mod types;

pub use read::{VpkArchive, VpkFile};
