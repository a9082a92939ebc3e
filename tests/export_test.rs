//! Excel出力の統合テスト

use interview_common::{Command, InterviewRecord};
use interview_dashboard::export::{export_selection, output_path_for};
use interview_dashboard::session::Session;
use std::path::Path;
use tempfile::tempdir;

fn records() -> Vec<InterviewRecord> {
    (1..=4)
        .map(|i| {
            InterviewRecord::new(
                format!("Candidate {}", i),
                format!("質問{}", i),
                format!("回答{}", i),
                (i * 20) as f64,
            )
        })
        .collect()
}

#[test]
fn test_export_selection_writes_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut session = Session::open(records(), &dir.path().join("state.json"), 5);
    session
        .apply(vec![
            Command::Toggle("Candidate 2".into()),
            Command::Toggle("Candidate 4".into()),
        ])
        .unwrap();

    let dashboard = session.dashboard();
    let path = export_selection(
        dashboard.chart(),
        dashboard.selection(),
        &dir.path().join("out"),
        "テスト出力",
    )
    .expect("Excel生成に失敗");

    assert_eq!(path, dir.path().join("out").join("テスト出力.xlsx"));
    let bytes = std::fs::read(&path).expect("ファイル読み込み失敗");
    assert!(bytes.starts_with(b"PK"), "xlsxはZIP形式のはず");
}

#[test]
fn test_export_empty_selection_still_writes_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let session = Session::open(records(), &dir.path().join("state.json"), 5);
    let output = dir.path().join("empty.xlsx");

    let dashboard = session.dashboard();
    let path = export_selection(dashboard.chart(), dashboard.selection(), &output, "empty").unwrap();
    assert_eq!(path, output);
    assert!(output.exists());
}

#[test]
fn test_output_path_for() {
    assert_eq!(
        output_path_for(Path::new("report.xlsx"), "title"),
        Path::new("report.xlsx")
    );
    assert_eq!(
        output_path_for(Path::new("reports"), "title"),
        Path::new("reports").join("title.xlsx")
    );
}
