//! Unit tests for the per-symbol model store

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use coinlytics::ml::{ModelStore, SequenceModel};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("coinlytics-{tag}-{}-{nanos}", std::process::id()))
}

fn test_model() -> SequenceModel {
    let mut rng = StdRng::seed_from_u64(5);
    SequenceModel::new(5, 8, &mut rng)
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = temp_dir("store-roundtrip");
    let store = ModelStore::new(&dir);
    let model = test_model();

    store.save("BTC", &model).unwrap();
    assert!(store.exists("BTC"));

    let loaded = store.load("BTC").unwrap();
    let sequence = Array2::from_elem((6, 5), 0.4);
    assert_eq!(
        model.predict(sequence.view()),
        loaded.predict(sequence.view())
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_symbol_is_uppercased() {
    let dir = temp_dir("store-case");
    let store = ModelStore::new(&dir);
    store.save("eth", &test_model()).unwrap();
    assert!(store.exists("ETH"));
    assert!(store.load("Eth").is_some());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_load_missing_is_none() {
    let dir = temp_dir("store-missing");
    let store = ModelStore::new(&dir);
    assert!(!store.exists("BTC"));
    assert!(store.load("BTC").is_none());
}

#[test]
fn test_load_corrupted_is_none() {
    let dir = temp_dir("store-corrupted");
    let store = ModelStore::new(&dir);
    let models_dir = dir.join("models");
    fs::create_dir_all(&models_dir).unwrap();
    fs::write(models_dir.join("BTC.json"), "{not valid json").unwrap();

    assert!(store.exists("BTC"));
    assert!(store.load("BTC").is_none());

    let _ = fs::remove_dir_all(&dir);
}
