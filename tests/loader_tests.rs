use oneplan_report::artifacts::{
    load_table, ArtifactCache, ArtifactPaths, ArtifactSet, SummarySource, SUMMARY_PART5,
    SUMMARY_PART6,
};
use oneplan_report::config::PathsConfig;
use std::path::PathBuf;

fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("oneplan_loader_{}", name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &PathBuf, rel: &str, content: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════
// load_table: every failure normalizes to None
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_load_missing_file_is_none() {
    let dir = test_dir("missing");
    assert!(load_table(&dir.join("nope.csv")).is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_zero_byte_file_is_none() {
    let dir = test_dir("zero_byte");
    write(&dir, "empty.csv", "");

    assert!(load_table(&dir.join("empty.csv")).is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_headers_only_is_none() {
    let dir = test_dir("headers_only");
    write(&dir, "t.csv", "channel,spend\n");

    assert!(
        load_table(&dir.join("t.csv")).is_none(),
        "a table with no data rows is unusable"
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_malformed_csv_is_none() {
    let dir = test_dir("malformed");
    write(&dir, "bad.csv", "a,b\n1,2,3,4\n");

    assert!(load_table(&dir.join("bad.csv")).is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_non_utf8_is_none() {
    let dir = test_dir("non_utf8");
    std::fs::write(dir.join("bin.csv"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

    assert!(load_table(&dir.join("bin.csv")).is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_valid_table() {
    let dir = test_dir("valid");
    write(&dir, "t.csv", "channel,spend\ntv,100\n");

    let table = load_table(&dir.join("t.csv")).expect("valid CSV should load");
    assert_eq!(table.len(), 1);
    assert_eq!(table.value(0, "channel"), Some("tv"));
    let _ = std::fs::remove_dir_all(&dir);
}

// ═══════════════════════════════════════════════════════════════════════
// Cache: read-through, idempotent
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_cache_repeat_reads_identical() {
    let dir = test_dir("cache_repeat");
    write(&dir, "t.csv", "channel,spend\ntv,100\n");
    let path = dir.join("t.csv");

    let mut cache = ArtifactCache::new();
    let first = cache.get(&path).cloned();
    let second = cache.get(&path).cloned();

    assert_eq!(first, second, "re-reading an unchanged path is idempotent");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_cache_survives_file_change() {
    let dir = test_dir("cache_change");
    write(&dir, "t.csv", "channel,spend\ntv,100\n");
    let path = dir.join("t.csv");

    let mut cache = ArtifactCache::new();
    let first = cache.get(&path).cloned().unwrap();

    // Rewrite the file; the cache must keep serving the first parse.
    write(&dir, "t.csv", "channel,spend\nsearch,999\n");
    let second = cache.get(&path).cloned().unwrap();

    assert_eq!(first, second);
    assert_eq!(second.value(0, "channel"), Some("tv"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_cache_remembers_absence() {
    let dir = test_dir("cache_absent");
    let path = dir.join("late.csv");

    let mut cache = ArtifactCache::new();
    assert!(cache.get(&path).is_none());

    // The file appears after the first miss; absence was cached.
    write(&dir, "late.csv", "channel,spend\ntv,100\n");
    assert!(cache.get(&path).is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

// ═══════════════════════════════════════════════════════════════════════
// ArtifactSet: summary fallback and full-tree load
// ═══════════════════════════════════════════════════════════════════════

fn load_set(dir: &PathBuf) -> ArtifactSet {
    let paths = ArtifactPaths::new(dir, &PathsConfig::default());
    let mut cache = ArtifactCache::new();
    ArtifactSet::load(&paths, &mut cache)
}

#[test]
fn test_summary_prefers_part6() {
    let dir = test_dir("prefers_part6");
    write(
        &dir,
        &format!("data/processed/{}", SUMMARY_PART6),
        "equal_split,optimized,lift_%\n100,120,20.0\n0.5,0.6,20.0\n",
    );
    write(
        &dir,
        &format!("data/processed/{}", SUMMARY_PART5),
        "equal_split,optimized,lift_%\n1,2,3.0\n4,5,6.0\n",
    );

    let set = load_set(&dir);
    assert_eq!(set.summary_source, Some(SummarySource::Part6));
    assert_eq!(
        set.summary.unwrap().numeric(0, "optimized"),
        Some(120.0),
        "part6 content should win when both files exist"
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_summary_falls_back_to_part5() {
    let dir = test_dir("fallback_part5");
    write(
        &dir,
        &format!("data/processed/{}", SUMMARY_PART5),
        "equal_split,optimized,lift_%\n100,120,20.0\n0.5,0.6,20.0\n",
    );

    let set = load_set(&dir);
    assert_eq!(set.summary_source, Some(SummarySource::Part5));
    assert!(set.summary.is_some());
    assert_eq!(
        set.summary_rel_path().unwrap().to_string_lossy(),
        format!("data/processed/{}", SUMMARY_PART5)
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_summary_fallback_used_when_part6_unusable() {
    let dir = test_dir("part6_unusable");
    // part6 exists but has no data rows, so part5 should supply the table.
    write(
        &dir,
        &format!("data/processed/{}", SUMMARY_PART6),
        "equal_split,optimized,lift_%\n",
    );
    write(
        &dir,
        &format!("data/processed/{}", SUMMARY_PART5),
        "equal_split,optimized,lift_%\n100,120,20.0\n0.5,0.6,20.0\n",
    );

    let set = load_set(&dir);
    assert_eq!(set.summary_source, Some(SummarySource::Part5));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_summary_absent_when_neither_loads() {
    let dir = test_dir("no_summary");

    let set = load_set(&dir);
    assert!(set.summary.is_none());
    assert_eq!(set.summary_source, None);
    assert!(set.summary_rel_path().is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_set_loads_tables_independently() {
    let dir = test_dir("independent");
    write(
        &dir,
        "data/processed/marginal_roi_summary.csv",
        "channel,marginal_roi_per_dollar\ntv,0.8\n",
    );

    let set = load_set(&dir);
    assert!(set.marginal_roi.is_some());
    assert!(set.spend_conversions.is_none());
    assert!(set.spend_reach.is_none());
    assert!(set.summary.is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_set_loads_images_and_markdown() {
    let dir = test_dir("assets");
    let png = dir.join("assets/p6_equal_vs_opt_conversions.png");
    std::fs::create_dir_all(png.parent().unwrap()).unwrap();
    std::fs::write(&png, b"\x89PNG\r\n\x1a\nfake").unwrap();
    write(
        &dir,
        "reports/OnePlan_Executive_Summary.md",
        "# Executive Summary\n",
    );

    let set = load_set(&dir);
    assert_eq!(
        set.image_conversions.as_deref(),
        Some(b"\x89PNG\r\n\x1a\nfake".as_slice())
    );
    assert!(set.image_reach.is_none());
    assert_eq!(
        set.executive_summary.as_deref(),
        Some("# Executive Summary\n")
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_empty_image_treated_as_absent() {
    let dir = test_dir("empty_image");
    let png = dir.join("assets/p6_equal_vs_opt_reach.png");
    std::fs::create_dir_all(png.parent().unwrap()).unwrap();
    std::fs::write(&png, b"").unwrap();

    let set = load_set(&dir);
    assert!(set.image_reach.is_none());
    let _ = std::fs::remove_dir_all(&dir);
}
