//! Typed tag trees in the NBT binary format used by voxel-world saves.
//!
//! The central type is [`Tag`], an owned tree of named fields. Chunk decoding
//! elsewhere in the workspace operates on already-parsed `Tag` values; this
//! crate owns the byte-level concerns (big-endian payloads, length-prefixed
//! names, and the gzip container used for standalone files).

mod file;
mod tag;

pub use file::NbtFile;
pub use tag::Tag;
