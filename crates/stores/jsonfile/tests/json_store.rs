use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use tempfile::TempDir;

use september_core::state::Slot;
use september_core::system::KeyedStore;
use september_store_json::JsonFileStore;

fn temp_store(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::open(dir.path().join("state.json")).expect("open store")
}

// ── Durability ──────────────────────────────────────────────────────

#[tokio::test]
async fn values_survive_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let store = temp_store(&dir);
        store.set("volume", json!(85)).await?;
        store.set("appSettings", json!({ "theme": "dark" })).await?;
    }

    let store = temp_store(&dir);
    assert_eq!(store.get("volume").await?, Some(json!(85)));
    assert_eq!(store.get("appSettings").await?, Some(json!({ "theme": "dark" })));
    assert_eq!(store.get("missing").await?, None);
    Ok(())
}

#[tokio::test]
async fn delete_survives_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let store = temp_store(&dir);
        store.set("volume", json!(85)).await?;
        store.delete("volume").await?;
        // Deleting an absent key is quietly accepted.
        store.delete("volume").await?;
    }

    let store = temp_store(&dir);
    assert_eq!(store.get("volume").await?, None);
    Ok(())
}

#[tokio::test]
async fn clear_survives_reopen() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let store = temp_store(&dir);
        store.set("a", json!(1)).await?;
        store.set("b", json!(2)).await?;
        store.clear().await?;
    }

    let store = temp_store(&dir);
    assert_eq!(store.get("a").await?, None);
    assert_eq!(store.get("b").await?, None);
    Ok(())
}

// ── File handling ───────────────────────────────────────────────────

#[tokio::test]
async fn missing_parent_directories_are_created() -> Result<()> {
    let dir = TempDir::new()?;
    let nested = dir.path().join("september").join("deep").join("state.json");
    let store = JsonFileStore::open(&nested)?;
    store.set("volume", json!(70)).await?;
    assert!(nested.is_file());
    Ok(())
}

#[tokio::test]
async fn no_temp_file_lingers_after_a_write() -> Result<()> {
    let dir = TempDir::new()?;
    let store = temp_store(&dir);
    store.set("volume", json!(70)).await?;

    let names: Vec<String> = std::fs::read_dir(dir.path())?
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["state.json".to_string()]);
    Ok(())
}

#[tokio::test]
async fn document_on_disk_is_a_json_object() -> Result<()> {
    let dir = TempDir::new()?;
    let store = temp_store(&dir);
    store.set("volume", json!(70)).await?;

    let doc: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.path().join("state.json"))?)?;
    assert_eq!(doc, json!({ "volume": 70 }));
    Ok(())
}

#[tokio::test]
async fn malformed_document_starts_empty_and_heals_on_write() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("state.json");
    std::fs::write(&path, b"{ not json")?;

    let store = JsonFileStore::open(&path)?;
    assert_eq!(store.get("volume").await?, None);

    store.set("volume", json!(70)).await?;
    let doc: serde_json::Value = serde_json::from_slice(&std::fs::read(&path)?)?;
    assert_eq!(doc, json!({ "volume": 70 }));
    Ok(())
}

#[tokio::test]
async fn non_object_document_starts_empty() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("state.json");
    std::fs::write(&path, b"[1, 2, 3]")?;

    let store = JsonFileStore::open(&path)?;
    assert_eq!(store.get("0").await?, None);
    Ok(())
}

#[test]
fn default_path_lives_under_the_config_dir() {
    let Ok(store) = JsonFileStore::open_default() else {
        eprintln!("skipping: no user config directory");
        return;
    };
    assert!(store.path().ends_with("september/state.json"));
}

// ── Working with slots ──────────────────────────────────────────────

#[tokio::test]
async fn slot_state_survives_a_restart() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let store = Arc::new(temp_store(&dir)) as Arc<dyn KeyedStore>;
        let volume: Slot<u32> = Slot::bind(Some(store), "volume", 70);
        volume.ready().await;
        volume.set(45);
        volume.force_save().await;
    }

    let store = Arc::new(temp_store(&dir)) as Arc<dyn KeyedStore>;
    let volume: Slot<u32> = Slot::bind(Some(store), "volume", 70);
    volume.ready().await;
    assert_eq!(volume.get(), 45);
    Ok(())
}
