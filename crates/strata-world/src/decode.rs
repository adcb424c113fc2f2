//! The versioned chunk decoder: tag tree in, [`VoxelColumn`] out.

use crate::block::BlockState;
use crate::cancel::CancelToken;
use crate::column::{ChunkPos, VoxelColumn};
use crate::error::{DecodeError, Result};
use crate::id::NamespacedId;
use crate::legacy::{self, LegacyConverter, LEGACY_HEIGHT};
use crate::palette::{self, BitAddressing};
use crate::registry::{BlockRegistry, LegacyIdResolver};
use log::warn;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use strata_nbt::Tag;

// Data versions at which the modern family changed shape.
const VER_SECTION_PALETTES: i32 = 1451; // 17w47a: palettes + packed longs
const VER_INT_BIOMES: i32 = 1466; // 18w06a: biomes become an int array
const VER_BIOME_CELLS: i32 = 2203; // 19w36a: biomes go 3D at 4x4x4 cells
const VER_ALIGNED_PACKING: i32 = 2529; // 20w17a: cells stop straddling words
const VER_SECTION_BIOMES: i32 = 2834; // 21w37a: per-section biome palettes
const VER_FLAT_ROOT: i32 = 2844; // 21w43a: the Level wrapper is removed

/// Which on-disk save lineage a column comes from. The old fixed-height
/// family never carries a data version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldFamily {
    Region,
    Anvil,
}

/// Field-layout generation, resolved once per column from the family flag
/// and data version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    /// Fixed height 128, flat YZX-ordered id/data arrays under `Level`.
    LegacyFlat,
    /// Sections with numeric ids: `Blocks`, `Data`, optional `Add`.
    PrePaletteSectioned,
    /// Sections with `Palette`/`BlockStates`; biomes still per column.
    PaletteSectioned { addressing: BitAddressing },
    /// Blocks and biomes both palette-packed per section, under nested
    /// `block_states`/`biomes` records.
    SplitBiomePalette,
    /// Same section layout, with `Level` dissolved into the root.
    FlattenedRoot,
}

/// Collaborators and control state one decode call runs with.
pub struct DecodeContext<'a> {
    pub legacy_ids: &'a dyn LegacyIdResolver,
    pub registry: &'a dyn BlockRegistry,
    pub cancel: CancelToken,
}

impl<'a> DecodeContext<'a> {
    pub fn new(legacy_ids: &'a dyn LegacyIdResolver, registry: &'a dyn BlockRegistry) -> Self {
        DecodeContext {
            legacy_ids,
            registry,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// One column's tag trees plus everything resolved up front: family, data
/// version, chunk position. Vertical bounds are computed on first use and
/// memoized.
#[derive(Debug)]
pub struct ChunkSource {
    root: Tag,
    entities: Option<Tag>,
    family: WorldFamily,
    version: i32,
    pos: ChunkPos,
    bounds: OnceCell<(i32, i32)>,
}

impl ChunkSource {
    /// Validates the root tree and resolves version and position.
    ///
    /// `entities` is the externalized entity tree some worlds store beside
    /// the column data; pass `None` when there is none.
    pub fn new(root: Tag, entities: Option<Tag>, family: WorldFamily) -> Result<Self> {
        if root.as_compound().is_none() {
            return Err(DecodeError::InvalidInput(
                "root tag is not a compound".to_owned(),
            ));
        }

        let version = match family {
            WorldFamily::Anvil => root
                .get("DataVersion")
                .and_then(Tag::as_i32)
                .unwrap_or(0),
            WorldFamily::Region => 0,
        };

        let holder = if version >= VER_FLAT_ROOT {
            &root
        } else {
            match root.get("Level") {
                Some(level) if level.as_compound().is_some() => level,
                Some(_) => {
                    return Err(DecodeError::MistypedField {
                        field: "Level".to_owned(),
                        pos: None,
                    })
                }
                None => {
                    return Err(DecodeError::MissingField {
                        field: "Level".to_owned(),
                        pos: None,
                    })
                }
            }
        };
        let x = require_i32(holder, "xPos")?;
        let z = require_i32(holder, "zPos")?;

        Ok(ChunkSource {
            root,
            entities,
            family,
            version,
            pos: ChunkPos::new(x, z),
            bounds: OnceCell::new(),
        })
    }

    pub fn family(&self) -> WorldFamily {
        self.family
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    pub fn era(&self) -> Era {
        if self.family == WorldFamily::Region {
            return Era::LegacyFlat;
        }
        if self.version >= VER_FLAT_ROOT {
            Era::FlattenedRoot
        } else if self.version >= VER_SECTION_BIOMES {
            Era::SplitBiomePalette
        } else if self.version >= VER_SECTION_PALETTES {
            let addressing = if self.version >= VER_ALIGNED_PACKING {
                BitAddressing::WordAligned
            } else {
                BitAddressing::Straddling
            };
            Era::PaletteSectioned { addressing }
        } else {
            Era::PrePaletteSectioned
        }
    }

    pub fn y_min(&self) -> i32 {
        self.y_bounds().0
    }

    pub fn y_max(&self) -> i32 {
        self.y_bounds().1
    }

    /// The column's vertical range, from the sections that actually carry
    /// block data. Sections that are structurally present but dataless
    /// don't extend the range.
    pub fn y_bounds(&self) -> (i32, i32) {
        *self.bounds.get_or_init(|| self.compute_y_bounds())
    }

    fn compute_y_bounds(&self) -> (i32, i32) {
        if self.family == WorldFamily::Region {
            return (0, LEGACY_HEIGHT);
        }
        let sections = match self.section_list() {
            Ok(Some(sections)) => sections,
            // Absent or malformed section list; decode reports the latter.
            _ => return (0, 256),
        };
        let mut min = i32::MAX;
        let mut max = i32::MIN;
        for section in sections {
            let carries_blocks = section.get("block_states").is_some()
                || section.get("BlockStates").is_some()
                || section.get("Blocks").is_some();
            if !carries_blocks {
                continue;
            }
            let y = match section.get("Y").and_then(Tag::as_i8) {
                Some(y) => i32::from(y),
                None => continue,
            };
            min = min.min(y);
            max = max.max(y);
        }
        if min > max {
            (0, 256)
        } else {
            (min * 16, (max + 1) * 16)
        }
    }

    /// Decodes the column. Errors describe this column only and carry its
    /// position; one failed column never poisons its neighbors.
    pub fn decode(&self, ctx: &DecodeContext<'_>) -> Result<VoxelColumn> {
        let era = self.era();
        let mut column = match era {
            Era::LegacyFlat => self.decode_legacy_flat(ctx)?,
            _ => {
                let sections = match self.section_list()? {
                    Some(sections) => sections,
                    // No section list at all: an empty default-height
                    // column, with nothing else read from the tree.
                    None => return Ok(VoxelColumn::new(0, 256)),
                };
                self.decode_sectioned(era, sections, ctx)?
            }
        };
        self.collect_entities(&mut column);
        self.collect_tile_entities(&mut column);
        Ok(column)
    }

    fn section_list(&self) -> Result<Option<&[Tag]>> {
        let (tag, name) = if self.version >= VER_FLAT_ROOT {
            (self.root.get("sections"), "sections")
        } else {
            (
                self.root.get("Level").and_then(|level| level.get("Sections")),
                "Sections",
            )
        };
        match tag {
            None => Ok(None),
            Some(tag) => tag
                .as_list()
                .map(Some)
                .ok_or_else(|| self.mistyped(name)),
        }
    }

    fn decode_sectioned(
        &self,
        era: Era,
        sections: &[Tag],
        ctx: &DecodeContext<'_>,
    ) -> Result<VoxelColumn> {
        let (y_min, y_max) = self.y_bounds();
        let mut column = VoxelColumn::new(y_min, y_max);
        let mut converter = LegacyConverter::new(ctx.legacy_ids);

        for section in sections {
            ctx.cancel.check()?;
            let y = match section.get("Y") {
                None => return Err(self.missing("Y")),
                Some(tag) => match tag.as_i8() {
                    Some(y) => i32::from(y),
                    None => return Err(self.mistyped("Y")),
                },
            };
            // Sections outside the assembled range (biome-only boundary
            // markers, typically) have nowhere to land.
            if y * 16 < y_min || (y + 1) * 16 > y_max {
                continue;
            }
            let base = ((y * 16 - y_min) * 256) as usize;

            match era {
                Era::PrePaletteSectioned => {
                    self.decode_numeric_section(&mut column, section, base, &mut converter)?
                }
                Era::PaletteSectioned { addressing } => self.decode_palette_section(
                    &mut column,
                    section,
                    base,
                    addressing,
                    &SIBLING_FIELDS,
                    ctx.registry,
                )?,
                Era::SplitBiomePalette | Era::FlattenedRoot => {
                    self.decode_palette_section(
                        &mut column,
                        section,
                        base,
                        BitAddressing::WordAligned,
                        &NESTED_FIELDS,
                        ctx.registry,
                    )?;
                    self.decode_biome_section(&mut column, section, base)?;
                }
                Era::LegacyFlat => unreachable!("the legacy family is not sectioned"),
            }
        }

        if matches!(
            era,
            Era::PrePaletteSectioned | Era::PaletteSectioned { .. }
        ) {
            self.decode_column_biomes(&mut column, &mut converter, ctx)?;
        }
        Ok(column)
    }

    /// Sections of the palette eras. A section with no palette (or, nested,
    /// no `block_states` record) stores no blocks and is skipped; a palette
    /// with no packed array fills the section uniformly with its first
    /// entry.
    fn decode_palette_section(
        &self,
        column: &mut VoxelColumn,
        section: &Tag,
        base: usize,
        addressing: BitAddressing,
        fields: &SectionFields,
        registry: &dyn BlockRegistry,
    ) -> Result<()> {
        let holder = match fields.container {
            None => section,
            Some(name) => match section.get(name) {
                None => return Ok(()),
                Some(tag) if tag.as_compound().is_some() => tag,
                Some(_) => return Err(self.mistyped(name)),
            },
        };
        let palette_tag = match holder.get(fields.palette) {
            None => return Ok(()),
            Some(tag) => tag
                .as_list()
                .ok_or_else(|| self.mistyped(&fields.path(fields.palette)))?,
        };
        let palette = self.build_block_palette(palette_tag, registry);

        let data = match holder.get(fields.data) {
            None => {
                if let Some(state) = palette.first().and_then(Clone::clone) {
                    for i in 0..4096 {
                        column.set_block_raw(base + i, state.clone());
                    }
                }
                return Ok(());
            }
            Some(tag) => tag
                .as_long_array()
                .ok_or_else(|| self.mistyped(&fields.path(fields.data)))?,
        };

        let width = palette::block_palette_bits(palette.len());
        let words: Vec<u64> = data.iter().map(|&w| w as u64).collect();
        let indices = palette::unpack(&words, 4096, width, addressing)
            .map_err(|_| self.mistyped(&fields.path(fields.data)))?;

        for (i, &index) in indices.iter().enumerate() {
            let slot = palette
                .get(index as usize)
                .ok_or_else(|| self.mistyped(&fields.path(fields.data)))?;
            if let Some(state) = slot {
                column.set_block_raw(base + i, state.clone());
            }
        }
        Ok(())
    }

    /// Palette entries are compounds with a `Name` and optional string
    /// `Properties`. An entry without a name becomes a hole in the palette:
    /// logged here, and every voxel referencing it stays absent.
    fn build_block_palette(
        &self,
        entries: &[Tag],
        registry: &dyn BlockRegistry,
    ) -> Vec<Option<Arc<BlockState>>> {
        let mut palette = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = match entry.get("Name").and_then(Tag::as_str) {
                Some(name) => name,
                None => {
                    warn!("chunk {}: palette entry without a block name", self.pos);
                    palette.push(None);
                    continue;
                }
            };
            let mut state = BlockState::new(NamespacedId::parse(name));
            if let Some(properties) = entry.get("Properties").and_then(Tag::as_compound) {
                for (property, value) in properties {
                    if let Some(value) = value.as_str() {
                        state.properties.insert(property.clone(), value.to_owned());
                    }
                }
            }
            if registry.acts_waterlogged(&state.id) {
                state
                    .properties
                    .entry("waterlogged".to_owned())
                    .or_insert_with(|| "true".to_owned());
            }
            palette.push(Some(Arc::new(state)));
        }
        palette
    }

    /// Per-section biome palettes (split-biome eras): 64 packed cells per
    /// section, each governing a 4x4x4 cube.
    fn decode_biome_section(
        &self,
        column: &mut VoxelColumn,
        section: &Tag,
        base: usize,
    ) -> Result<()> {
        let holder = match section.get("biomes") {
            None => return Ok(()),
            Some(tag) if tag.as_compound().is_some() => tag,
            Some(_) => return Err(self.mistyped("biomes")),
        };
        let palette_tag = match holder.get("palette") {
            None => return Ok(()),
            Some(tag) => tag
                .as_list()
                .ok_or_else(|| self.mistyped("biomes.palette"))?,
        };
        let mut palette = Vec::with_capacity(palette_tag.len());
        for entry in palette_tag {
            match entry.as_str() {
                Some(name) => palette.push(NamespacedId::parse(name)),
                None => return Err(self.mistyped("biomes.palette")),
            }
        }

        let data = holder.get("data");
        // One entry needs no packed array; ignore one if present rather
        // than unpacking at width zero.
        if data.is_none() || palette.len() <= 1 {
            if let Some(biome) = palette.first() {
                for i in 0..4096 {
                    column.set_biome_raw(base + i, biome.clone());
                }
            }
            return Ok(());
        }

        let data = data
            .and_then(Tag::as_long_array)
            .ok_or_else(|| self.mistyped("biomes.data"))?;
        let width = palette::biome_palette_bits(palette.len());
        let words: Vec<u64> = data.iter().map(|&w| w as u64).collect();
        let indices = palette::unpack(&words, 64, width, BitAddressing::WordAligned)
            .map_err(|_| self.mistyped("biomes.data"))?;

        for (i, &index) in indices.iter().enumerate() {
            let biome = palette
                .get(index as usize)
                .ok_or_else(|| self.mistyped("biomes.data"))?;
            let origin = (i % 4) * 4 + (i / 4 % 4) * 64 + (i / 16) * 1024;
            for dy in 0..4 {
                for dz in 0..4 {
                    for dx in 0..4 {
                        column.set_biome_raw(
                            base + origin + dx + dz * 16 + dy * 256,
                            biome.clone(),
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// Pre-palette sections: one byte per block id, nibble-packed data
    /// values, and the optional `Add` high-nibble extension.
    fn decode_numeric_section(
        &self,
        column: &mut VoxelColumn,
        section: &Tag,
        base: usize,
        converter: &mut LegacyConverter<'_>,
    ) -> Result<()> {
        let blocks = match section.get("Blocks") {
            None => return Ok(()),
            Some(tag) => tag.as_byte_array().ok_or_else(|| self.mistyped("Blocks"))?,
        };
        let data = match section.get("Data") {
            None => return Err(self.missing("Data")),
            Some(tag) => tag.as_byte_array().ok_or_else(|| self.mistyped("Data"))?,
        };

        let mut ids = vec![0u16; 4096];
        for (i, &raw) in blocks.iter().take(4096).enumerate() {
            ids[i] = u16::from(raw as u8);
        }
        if let Some(tag) = section.get("Add") {
            let add = tag.as_byte_array().ok_or_else(|| self.mistyped("Add"))?;
            legacy::apply_add(&mut ids, add);
        }

        for (i, &id) in ids.iter().enumerate() {
            let data_val = if i / 2 < data.len() {
                legacy::nibble(data, i)
            } else {
                0
            };
            column.set_block_raw(base + i, converter.block(id, data_val));
        }
        Ok(())
    }

    /// Per-column biomes of the pre-split eras: a 16x16 layer replicated
    /// vertically, or (newer) a 4x4x4-cell grid; bytes before the int-array
    /// switch.
    fn decode_column_biomes(
        &self,
        column: &mut VoxelColumn,
        converter: &mut LegacyConverter<'_>,
        ctx: &DecodeContext<'_>,
    ) -> Result<()> {
        let level = self.level()?;
        let biomes: Vec<i32> = match level.get("Biomes") {
            None => return Ok(()),
            Some(tag) => {
                if self.version >= VER_INT_BIOMES {
                    tag.as_int_array()
                        .ok_or_else(|| self.mistyped("Biomes"))?
                        .to_vec()
                } else {
                    tag.as_byte_array()
                        .ok_or_else(|| self.mistyped("Biomes"))?
                        .iter()
                        .map(|&b| i32::from(b))
                        .collect()
                }
            }
        };
        if biomes.is_empty() {
            return Ok(());
        }

        let (y_min, y_max) = (column.y_min(), column.y_max());
        for x in 0..16 {
            ctx.cancel.check()?;
            for z in 0..16 {
                for y in 0..(y_max - y_min) {
                    let index = if self.version >= VER_BIOME_CELLS {
                        (x / 4 + (z / 4) * 4 + (y / 4) * 16) as usize
                    } else {
                        (x + z * 16) as usize
                    };
                    let id = match biomes.get(index) {
                        Some(&id) => id,
                        None => return Err(self.mistyped("Biomes")),
                    };
                    column.set_biome(x, y + y_min, z, converter.biome(id));
                }
            }
        }
        Ok(())
    }

    /// The oldest family: fixed 128-high flat arrays, stored Y-fastest and
    /// reordered here into the column's X-fastest layout.
    fn decode_legacy_flat(&self, ctx: &DecodeContext<'_>) -> Result<VoxelColumn> {
        let level = self.level()?;
        let blocks = match level.get("Blocks") {
            None => return Err(self.missing("Blocks")),
            Some(tag) => tag.as_byte_array().ok_or_else(|| self.mistyped("Blocks"))?,
        };
        let data = match level.get("Data") {
            None => return Err(self.missing("Data")),
            Some(tag) => tag.as_byte_array().ok_or_else(|| self.mistyped("Data"))?,
        };

        let mut column = VoxelColumn::new(0, LEGACY_HEIGHT);
        let mut converter = LegacyConverter::new(ctx.legacy_ids);
        for x in 0..16 {
            ctx.cancel.check()?;
            for z in 0..16 {
                for y in 0..LEGACY_HEIGHT {
                    let disk = legacy::flat_disk_index(x, y, z);
                    let id = match blocks.get(disk) {
                        Some(&raw) => u16::from(raw as u8),
                        None => 0,
                    };
                    let data_val = if disk / 2 < data.len() {
                        legacy::nibble(data, disk)
                    } else {
                        0
                    };
                    column.set_block(x, y, z, converter.block(id, data_val));
                }
            }
        }
        Ok(column)
    }

    fn collect_entities(&self, column: &mut VoxelColumn) {
        if self.version < VER_FLAT_ROOT {
            let list = self
                .root
                .get("Level")
                .and_then(|level| level.get("Entities"))
                .and_then(Tag::as_list);
            if let Some(list) = list {
                column.entities.extend(list.iter().cloned());
            }
        }
        if let Some(tree) = &self.entities {
            if let Some(list) = tree.get("Entities").and_then(Tag::as_list) {
                column.entities.extend(list.iter().cloned());
            }
        }
    }

    fn collect_tile_entities(&self, column: &mut VoxelColumn) {
        let list = if self.version >= VER_FLAT_ROOT {
            self.root.get("block_entities")
        } else {
            self.root
                .get("Level")
                .and_then(|level| level.get("TileEntities"))
        };
        if let Some(list) = list.and_then(Tag::as_list) {
            column.tile_entities.extend(list.iter().cloned());
        }
    }

    fn level(&self) -> Result<&Tag> {
        match self.root.get("Level") {
            Some(level) if level.as_compound().is_some() => Ok(level),
            Some(_) => Err(self.mistyped("Level")),
            None => Err(self.missing("Level")),
        }
    }

    fn missing(&self, field: &str) -> DecodeError {
        DecodeError::MissingField {
            field: field.to_owned(),
            pos: Some(self.pos),
        }
    }

    fn mistyped(&self, field: &str) -> DecodeError {
        DecodeError::MistypedField {
            field: field.to_owned(),
            pos: Some(self.pos),
        }
    }
}

/// Where a palette era keeps its per-section block fields.
struct SectionFields {
    container: Option<&'static str>,
    palette: &'static str,
    data: &'static str,
}

impl SectionFields {
    fn path(&self, leaf: &str) -> String {
        match self.container {
            Some(container) => format!("{}.{}", container, leaf),
            None => leaf.to_owned(),
        }
    }
}

const SIBLING_FIELDS: SectionFields = SectionFields {
    container: None,
    palette: "Palette",
    data: "BlockStates",
};

const NESTED_FIELDS: SectionFields = SectionFields {
    container: Some("block_states"),
    palette: "palette",
    data: "data",
};

fn require_i32(holder: &Tag, field: &str) -> Result<i32> {
    match holder.get(field) {
        None => Err(DecodeError::MissingField {
            field: field.to_owned(),
            pos: None,
        }),
        Some(tag) => tag.as_i32().ok_or_else(|| DecodeError::MistypedField {
            field: field.to_owned(),
            pos: None,
        }),
    }
}
