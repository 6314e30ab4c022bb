//! Reading the scraped record files and the requested-items list.

use std::path::Path;

use craftguide_core::config::DataConfig;
use craftguide_core::data::{GameData, RawRecords};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::EngineError;

/// Item records.
pub const ITEMS_FILE: &str = "items_parsed.json";
/// Recipe records.
pub const RECIPES_FILE: &str = "recipes_parsed.json";
/// Drop records.
pub const DROPS_FILE: &str = "drops_parsed.json";
/// NPC records.
pub const NPCS_FILE: &str = "npcs_parsed.json";
/// Boss records.
pub const BOSSES_FILE: &str = "bosses.json";
/// Crafting-station records.
pub const TABLES_FILE: &str = "tables.json";
/// Event records.
pub const EVENTS_FILE: &str = "events.json";

/// Deserialize one JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, EngineError> {
    let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| EngineError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and index every record file.
pub fn load_game_data(config: &DataConfig) -> Result<GameData, EngineError> {
    let raw = RawRecords {
        items: read_json(&config.file(ITEMS_FILE))?,
        recipes: read_json(&config.file(RECIPES_FILE))?,
        drops: read_json(&config.file(DROPS_FILE))?,
        npcs: read_json(&config.file(NPCS_FILE))?,
        bosses: read_json(&config.file(BOSSES_FILE))?,
        events: read_json(&config.file(EVENTS_FILE))?,
        tables: read_json(&config.file(TABLES_FILE))?,
        objects: read_json(&config.objects_file())?,
        misc: read_json(&config.misc_file())?,
    };
    info!(
        dir = %config.dir.display(),
        items = raw.items.len(),
        recipes = raw.recipes.len(),
        drops = raw.drops.len(),
        npcs = raw.npcs.len(),
        bosses = raw.bosses.len(),
        events = raw.events.len(),
        tables = raw.tables.len(),
        objects = raw.objects.len(),
        "Game data loaded"
    );
    Ok(GameData::new(raw))
}

/// Read the requested item names, one per line. Blank lines are skipped
/// and trailing whitespace is dropped.
pub fn load_item_list(path: &Path) -> Result<Vec<String>, EngineError> {
    let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use craftguide_types::Boss;

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path();
        write(path, ITEMS_FILE, r#"[{"item_name": "Gel", "item_image": "Gel.png"}]"#);
        write(path, RECIPES_FILE, "[]");
        write(
            path,
            DROPS_FILE,
            r#"[{"drop_source": "Blue Slime", "drop_source_type": "NPC", "drop_item": "Gel",
                "drop_amount": [[1, 2], [1, 2], [1, 3]], "drop_rate": [[100, 100], [100, 100], [100, 100]]}]"#,
        );
        write(path, NPCS_FILE, r#"[{"npc_name": "Blue Slime"}]"#);
        write(
            path,
            BOSSES_FILE,
            r#"[{"boss_name": "King Slime", "boss_summon_type": "Item", "boss_summon": ["Slime Crown"]}]"#,
        );
        write(path, EVENTS_FILE, "[]");
        write(path, TABLES_FILE, r#"[{"table_name": "By Hand"}]"#);
        write(path, "objects.json", r#"[{"object_name": "Demon Altar"}]"#);
        write(path, "misc.json", r#"{"name_replacements": {"Slime Gel": "Gel"}}"#);
        dir
    }

    fn config_for(dir: &Path) -> DataConfig {
        DataConfig {
            dir: dir.to_path_buf(),
            objects_path: None,
            misc_path: None,
        }
    }

    #[test]
    fn loads_every_record_file() {
        let dir = data_dir();
        let data = load_game_data(&config_for(dir.path())).unwrap();
        assert!(data.item("gel").is_some());
        assert_eq!(data.canonical_item_name("Slime Gel"), "Gel");
        assert_eq!(data.drops_of("Gel").len(), 1);
        assert!(data.require_object("Demon Altar").is_ok());
        let boss: &Boss = data.boss("King Slime").unwrap();
        assert_eq!(boss.summon_count, 1);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = data_dir();
        std::fs::remove_file(dir.path().join(TABLES_FILE)).unwrap();
        let err = load_game_data(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, EngineError::Io { ref path, .. } if path.ends_with(TABLES_FILE)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = data_dir();
        write(dir.path(), EVENTS_FILE, "{not json");
        let err = load_game_data(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, EngineError::Json { .. }));
    }

    #[test]
    fn item_list_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("items.txt");
        std::fs::write(&path, "Iron Pickaxe\r\n\n   \nTorch  \n").unwrap();
        assert_eq!(load_item_list(&path).unwrap(), vec!["Iron Pickaxe", "Torch"]);
    }
}
