use strata_nbt::Tag;
use strata_world::{
    pack, BitAddressing, BlockRegistry, BlockState, LegacyIdResolver, NamespacedId, Occlusion,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Maps numeric ids to readable states: 0 is air, 1 stone, 7 bedrock, the
/// rest `block_<id>`, with a `legacy_data` property when data is nonzero.
pub struct TestIds;

impl LegacyIdResolver for TestIds {
    fn block(&self, id: u16, data: u8) -> BlockState {
        let name = match id {
            0 => return BlockState::new(NamespacedId::air()),
            1 => "stone".to_owned(),
            7 => "bedrock".to_owned(),
            other => format!("block_{}", other),
        };
        if data == 0 {
            BlockState::new(NamespacedId::minecraft(&name))
        } else {
            BlockState::with_properties(
                NamespacedId::minecraft(&name),
                [("legacy_data", data.to_string())],
            )
        }
    }

    fn biome(&self, id: i32) -> NamespacedId {
        match id {
            1 => NamespacedId::plains(),
            2 => NamespacedId::minecraft("desert"),
            other => NamespacedId::minecraft(&format!("biome_{}", other)),
        }
    }
}

pub struct TestRegistry;

impl BlockRegistry for TestRegistry {
    fn occlusion(&self, _state: &BlockState) -> Occlusion {
        Occlusion::Full
    }

    fn materials(&self, state: &BlockState, _biome: &NamespacedId) -> Vec<NamespacedId> {
        vec![state.id.clone()]
    }

    fn acts_waterlogged(&self, id: &NamespacedId) -> bool {
        id.path() == "seagrass"
    }
}

/// A block palette list in the on-disk shape: compounds with a `Name`.
pub fn block_palette(names: &[&str]) -> Tag {
    Tag::List(
        names
            .iter()
            .map(|name| Tag::compound([("Name", Tag::String((*name).to_string()))]))
            .collect(),
    )
}

/// Packs palette indices into the on-disk long array.
pub fn packed_longs(values: &[u16], width: u32, addressing: BitAddressing) -> Tag {
    let words = pack(values, width, addressing).expect("test values fit the width");
    Tag::LongArray(words.into_iter().map(|w| w as i64).collect())
}

pub fn anvil_root(version: i32, level_fields: Vec<(&str, Tag)>) -> Tag {
    let mut fields = vec![("xPos", Tag::Int(0)), ("zPos", Tag::Int(0))];
    fields.extend(level_fields);
    Tag::compound([
        ("DataVersion", Tag::Int(version)),
        ("Level", Tag::compound(fields)),
    ])
}

pub fn region_root(level_fields: Vec<(&str, Tag)>) -> Tag {
    let mut fields = vec![("xPos", Tag::Int(0)), ("zPos", Tag::Int(0))];
    fields.extend(level_fields);
    Tag::compound([("Level", Tag::compound(fields))])
}
