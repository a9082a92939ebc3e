//! エラーケーステスト
//!
//! 設定・データセットの異常系を検証

use interview_dashboard::config::Config;
use interview_dashboard::error::DashboardError;
use interview_dashboard::session::load_dataset;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないデータセットを指定した場合
#[test]
fn test_load_missing_dataset() {
    let result = load_dataset(Some(Path::new("/nonexistent/path/12345.json")));
    assert!(matches!(result, Err(DashboardError::Core(_))));
}

/// JSONとして壊れたデータセット
#[test]
fn test_load_corrupt_dataset() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(load_dataset(Some(&path)).is_err());
}

/// 壊れた設定ファイルはエラー
#[test]
fn test_load_corrupt_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(DashboardError::JsonParse(_))));
}

/// 0以下のページサイズは設定できない
#[test]
fn test_set_invalid_page_size() {
    let mut config = Config::default();
    let err = config.set_page_size(0).unwrap_err();
    assert!(matches!(err, DashboardError::Config(_)));
    assert!(err.to_string().contains("ページサイズ"));
    assert_eq!(config.page_size, interview_common::DEFAULT_PAGE_SIZE);
}

#[test]
fn test_error_display() {
    let err = DashboardError::ExcelGeneration("書き込み失敗".into());
    assert_eq!(err.to_string(), "Excel生成エラー: 書き込み失敗");

    let err = DashboardError::Prompt("interrupted".into());
    assert!(err.to_string().contains("interrupted"));
}
