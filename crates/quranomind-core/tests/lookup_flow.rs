//! End-to-end coverage of the lookup flow against a temp corpus.

use std::fs;

use quranomind_core::{
    AddOutcome, CorpusPaths, CorpusStore, FavoriteRecord, FavoritesStore, LookupOptions,
    LookupService, RemoveOutcome, SurahTable,
};

fn build_service(dir: &tempfile::TempDir) -> LookupService {
    let paths = CorpusPaths::new(dir.path());
    fs::create_dir_all(&paths.verses_dir).unwrap();
    fs::create_dir_all(&paths.tafsir_dir).unwrap();

    fs::write(
        &paths.surahs_file,
        r#"{
            "1": {"arabic": "الفاتحة", "english": "Al-Fatihah"},
            "2": {"arabic": "البقرة", "english": "Al-Baqarah"}
        }"#,
    )
    .unwrap();
    fs::write(
        paths.verses_dir.join("1.json"),
        r#"{"1": "بسم الله الرحمن الرحيم"}"#,
    )
    .unwrap();
    fs::write(
        paths.tafsir_dir.join("1.json"),
        r#"{"1": "تفسير آية البسملة"}"#,
    )
    .unwrap();

    let table = SurahTable::load(&paths.surahs_file);
    let favorites = FavoritesStore::new(&paths.favorites_file);
    let store = CorpusStore::new(paths);
    LookupService::new(table, store, favorites)
}

#[test]
fn surah_tokens_resolve_across_forms() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_service(&dir);
    let table = service.surah_table();

    assert_eq!(table.resolve("البقرة"), Some(2));
    assert_eq!(table.resolve("al-baqarah"), Some(2));
    assert_eq!(table.resolve("2"), Some(2));
}

#[test]
fn verse_lookup_and_absence() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_service(&dir);

    assert_eq!(
        service.corpus().get_verse(1, 1).unwrap().as_deref(),
        Some("بسم الله الرحمن الرحيم")
    );
    assert_eq!(service.corpus().get_verse(1, 2).unwrap(), None);
}

#[test]
fn search_finds_the_basmala_tafsir() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_service(&dir);

    let results = service.search("بسملة");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].surah_id, 1);
    assert_eq!(results[0].ayah_number, 1);
    assert_eq!(results[0].surah_name, "الفاتحة");

    assert!(service.search("لا يوجد").is_empty());
}

#[test]
fn favorites_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_service(&dir);

    let results = service.search("بسملة");
    let record = FavoriteRecord::from_result(&results[0], "arabic", "maissar");
    let fingerprint = record.hash.clone();

    assert_eq!(service.favorites().add(record).unwrap(), AddOutcome::Added);
    let listed = service.favorites().list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].hash, fingerprint);

    assert_eq!(
        service.favorites().remove(&fingerprint).unwrap(),
        RemoveOutcome::Removed
    );
    assert!(service.favorites().list().is_empty());
}

#[test]
fn lookup_without_services_degrades_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_service(&dir);

    // Local tafsir present.
    let response = service.lookup("الفاتحة", 1, &LookupOptions::default()).unwrap();
    assert_eq!(response.tafsir.as_deref(), Some("تفسير آية البسملة"));

    // No local tafsir, no interpreter configured: absent, not an error.
    let response = service.lookup("البقرة", 5, &LookupOptions::default()).unwrap();
    assert_eq!(response.tafsir, None);
    assert_eq!(response.fingerprint, None);
}
