//! Local scanning and scaffolding exercised through the public API

use skillfind_skills::{create_skill, scan_paths, LocalScanner, ScaffoldOptions, SkillDocument};
use skillfind_types::{DiscoveryConfig, Query, SkillSearcher, SkillSource};
use std::fs;

#[tokio::test]
async fn test_scanner_uses_configured_paths() {
    let tmp = tempfile::tempdir().unwrap();
    let skill = tmp.path().join("silence-detect");
    fs::create_dir_all(&skill).unwrap();
    fs::write(
        skill.join("SKILL.md"),
        "---\nname: silence-detect\ndescription: \"Detects silence gaps in audio\"\n---\n",
    )
    .unwrap();

    let config = DiscoveryConfig {
        local_paths: vec![tmp.path().display().to_string()],
        ..DiscoveryConfig::default()
    };

    let scanner = LocalScanner::new();
    assert_eq!(scanner.tier(), SkillSource::Local);

    let outcome = scanner
        .search(&Query::parse("detect silence").unwrap(), &config)
        .await;
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name(), "silence-detect");
    assert_eq!(outcome.records[0].source(), SkillSource::Local);
}

#[tokio::test]
async fn test_scaffolded_skill_is_discoverable() {
    let tmp = tempfile::tempdir().unwrap();
    let options = ScaffoldOptions {
        author: "Test Author".into(),
        description: "Transcribes meeting recordings".into(),
    };

    let dir = create_skill("meeting-notes", tmp.path(), &options).unwrap();
    assert!(dir.join("scripts").is_dir());
    assert!(dir.join("references").is_dir());
    assert!(dir.join("assets").is_dir());

    let document = SkillDocument::from_dir(&dir).unwrap();
    assert_eq!(document.name(), "meeting-notes");

    let config = DiscoveryConfig {
        local_paths: vec![tmp.path().display().to_string()],
        ..DiscoveryConfig::default()
    };
    let outcome = LocalScanner::new()
        .search(&Query::parse("transcribes").unwrap(), &config)
        .await;
    assert_eq!(outcome.records.len(), 1);
}

#[test]
fn test_scaffold_refuses_existing_directory() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("taken")).unwrap();

    let err = create_skill("taken", tmp.path(), &ScaffoldOptions::default()).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_scaffold_rejects_invalid_name() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(create_skill("Bad_Name", tmp.path(), &ScaffoldOptions::default()).is_err());
    assert!(!tmp.path().join("Bad_Name").exists());
}

#[tokio::test(flavor = "current_thread")]
async fn test_scanner_search_matches_direct_scan_on_single_thread_runtime() {
    let tmp = tempfile::tempdir().unwrap();
    for name in ["audio-split", "audio-merge", "pdf-tools"] {
        let dir = tmp.path().join("media").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("SKILL.md"),
            format!("---\nname: {name}\ndescription: Helper for {name}\n---\n"),
        )
        .unwrap();
    }

    let config = DiscoveryConfig {
        local_paths: vec![tmp.path().display().to_string()],
        ..DiscoveryConfig::default()
    };
    let query = Query::parse("audio").unwrap();

    let searched = LocalScanner::new().search(&query, &config).await;
    let direct = scan_paths(&[tmp.path().to_path_buf()], &query);

    assert!(searched.warnings.is_empty());
    assert_eq!(searched.records.len(), 2);
    assert_eq!(searched.records, direct.records);
}
