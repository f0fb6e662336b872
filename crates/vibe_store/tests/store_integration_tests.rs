//! Integration tests for the saved-trail store.

use std::fs;
use std::time::Duration;

use tempfile::tempdir;

use vibe_core::{EngineConfig, GeoPoint, Trail, TrailRequest, TrailRequestFacade, VibeId, VibeSet};
use vibe_store::{FileTrailStore, StoreError};

async fn trail(vibe: VibeId) -> Trail {
    TrailRequestFacade::new(EngineConfig::default())
        .generate(&TrailRequest::new(
            VibeSet::single(vibe),
            GeoPoint::new(40.7128, -74.0060),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_save_get_delete() {
    let temp = tempdir().unwrap();
    let store = FileTrailStore::new(temp.path());
    let cozy = trail(VibeId::Cozy).await;

    let saved = store.save("alice", &cozy).unwrap();
    assert_eq!(saved.user_id, "alice");
    assert_eq!(saved.vibes, VibeSet::single(VibeId::Cozy));
    assert!(temp
        .path()
        .join("alice")
        .join(format!("{}.json", saved.id))
        .exists());

    let loaded = store.get("alice", saved.id).unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.trail, cozy);

    assert!(store.delete("alice", saved.id).unwrap());
    assert!(!store.delete("alice", saved.id).unwrap());
    assert!(matches!(store.get("alice", saved.id), Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_list_is_newest_first_and_per_user() {
    let temp = tempdir().unwrap();
    let store = FileTrailStore::new(temp.path());

    let first = store.save("alice", &trail(VibeId::Cozy).await).unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = store.save("alice", &trail(VibeId::Artsy).await).unwrap();
    store.save("bob", &trail(VibeId::Nature).await).unwrap();

    let alice = store.list("alice").unwrap();
    assert_eq!(alice.len(), 2);
    assert_eq!(alice[0].id, second.id);
    assert_eq!(alice[1].id, first.id);

    assert_eq!(store.list("bob").unwrap().len(), 1);
    assert!(matches!(store.get("bob", first.id), Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_list_skips_corrupt_documents() {
    let temp = tempdir().unwrap();
    let store = FileTrailStore::new(temp.path());
    store.save("alice", &trail(VibeId::Foodie).await).unwrap();

    let dir = temp.path().join("alice");
    fs::write(dir.join("broken.json"), "{not json").unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    assert_eq!(store.list("alice").unwrap().len(), 1);
}

#[tokio::test]
async fn test_tampered_trail_is_rejected() {
    let temp = tempdir().unwrap();
    let store = FileTrailStore::new(temp.path());
    let saved = store.save("alice", &trail(VibeId::Cozy).await).unwrap();

    let path = temp.path().join("alice").join(format!("{}.json", saved.id));
    let mut doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let first = doc["trail"]["stops"][0].clone();
    doc["trail"]["stops"].as_array_mut().unwrap().push(first);
    fs::write(&path, doc.to_string()).unwrap();

    assert!(matches!(
        store.get("alice", saved.id),
        Err(StoreError::Corrupt { .. })
    ));
}
