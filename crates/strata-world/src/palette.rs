//! Variable-width palette index packing, shared by block and biome decoding.
//!
//! Cells are stored little-endian within each 64-bit word. Two addressing
//! regimes exist historically: the older one runs cells back to back across
//! word boundaries, the newer one keeps every cell inside a single word and
//! wastes the trailing bits.

use std::error::Error;
use std::fmt;

/// How packed cells are laid out over the 64-bit word stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitAddressing {
    /// Cell `i` occupies bits `[i*width, (i+1)*width)` of the concatenated
    /// stream and may span two words.
    Straddling,
    /// `floor(64/width)` cells per word; no cell crosses a word boundary;
    /// trailing bits of each word are ignored.
    WordAligned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackError {
    /// Widths outside 1..=16 are never produced by valid palettes.
    WidthOutOfRange(u32),
    /// The packed array has fewer words than the cell count needs.
    TooShort { needed: usize, got: usize },
    /// (pack only) An index does not fit in the requested width.
    ValueTooWide { value: u16, width: u32 },
}

impl fmt::Display for UnpackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnpackError::WidthOutOfRange(width) => {
                write!(f, "bit width {} outside the supported 1..=16", width)
            }
            UnpackError::TooShort { needed, got } => {
                write!(f, "packed array too short: need {} words, got {}", needed, got)
            }
            UnpackError::ValueTooWide { value, width } => {
                write!(f, "index {} does not fit in {} bits", value, width)
            }
        }
    }
}

impl Error for UnpackError {}

/// Number of bits needed to represent `value` (0 for 0). For a palette of
/// `n` entries the index width is `bits_for(n - 1)`.
pub fn bits_for(mut value: u32) -> u32 {
    let mut bits = 0;
    while value > 0 {
        bits += 1;
        value >>= 1;
    }
    bits
}

/// Index width for a block palette: at least 4 bits by format rule.
pub fn block_palette_bits(palette_len: usize) -> u32 {
    bits_for(palette_len.saturating_sub(1) as u32).max(4)
}

/// Index width for a biome palette: no minimum. A one-entry palette needs
/// zero bits and no packed array at all; callers fill uniformly instead of
/// unpacking.
pub fn biome_palette_bits(palette_len: usize) -> u32 {
    bits_for(palette_len.saturating_sub(1) as u32)
}

/// Extracts `cells` palette indices of `width` bits each.
pub fn unpack(
    words: &[u64],
    cells: usize,
    width: u32,
    addressing: BitAddressing,
) -> Result<Vec<u16>, UnpackError> {
    if width == 0 || width > 16 {
        return Err(UnpackError::WidthOutOfRange(width));
    }
    let mask = u64::MAX >> (64 - width);
    let needed = words_for(cells, width, addressing);
    if words.len() < needed {
        return Err(UnpackError::TooShort {
            needed,
            got: words.len(),
        });
    }

    let mut indices = Vec::with_capacity(cells);
    match addressing {
        BitAddressing::WordAligned => {
            let per_word = (64 / width) as usize;
            for i in 0..cells {
                let shift = ((i % per_word) as u32) * width;
                indices.push(((words[i / per_word] >> shift) & mask) as u16);
            }
        }
        BitAddressing::Straddling => {
            for i in 0..cells {
                let bit = i * width as usize;
                let offset = (bit % 64) as u32;
                let mut value = words[bit / 64] >> offset;
                if offset + width > 64 {
                    // The cell continues in the next word.
                    value |= words[bit / 64 + 1] << (64 - offset);
                }
                indices.push((value & mask) as u16);
            }
        }
    }
    Ok(indices)
}

/// Packs indices with the given regime; the inverse of [`unpack`].
pub fn pack(
    indices: &[u16],
    width: u32,
    addressing: BitAddressing,
) -> Result<Vec<u64>, UnpackError> {
    if width == 0 || width > 16 {
        return Err(UnpackError::WidthOutOfRange(width));
    }
    let limit = 1u32 << width;
    if let Some(&value) = indices.iter().find(|&&v| u32::from(v) >= limit) {
        return Err(UnpackError::ValueTooWide { value, width });
    }

    let mut words = vec![0u64; words_for(indices.len(), width, addressing)];
    match addressing {
        BitAddressing::WordAligned => {
            let per_word = (64 / width) as usize;
            for (i, &value) in indices.iter().enumerate() {
                let shift = ((i % per_word) as u32) * width;
                words[i / per_word] |= u64::from(value) << shift;
            }
        }
        BitAddressing::Straddling => {
            for (i, &value) in indices.iter().enumerate() {
                let bit = i * width as usize;
                let offset = (bit % 64) as u32;
                words[bit / 64] |= u64::from(value) << offset;
                if offset + width > 64 {
                    words[bit / 64 + 1] |= u64::from(value) >> (64 - offset);
                }
            }
        }
    }
    Ok(words)
}

fn words_for(cells: usize, width: u32, addressing: BitAddressing) -> usize {
    match addressing {
        BitAddressing::WordAligned => {
            let per_word = (64 / width) as usize;
            (cells + per_word - 1) / per_word
        }
        BitAddressing::Straddling => (cells * width as usize + 63) / 64,
    }
}
