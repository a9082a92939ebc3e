//! 入力データセットの読み込み
//!
//! 同梱データセットはビルド時に埋め込む。ユーザー指定のJSONファイルも読める。

use crate::error::Result;
use crate::types::InterviewRecord;

/// 同梱データセット（InterviewRecordのJSON配列）
pub const BUNDLED_DATASET: &str = include_str!("../data/interview_data.json");

/// JSON文字列からレコード列を読み込む
pub fn parse_records(json: &str) -> Result<Vec<InterviewRecord>> {
    let records: Vec<InterviewRecord> = serde_json::from_str(json)?;
    Ok(records)
}

/// 同梱データセット
pub fn bundled_records() -> Vec<InterviewRecord> {
    match parse_records(BUNDLED_DATASET) {
        Ok(records) => records,
        Err(e) => {
            log::error!("bundled dataset is invalid: {}", e);
            Vec::new()
        }
    }
}

/// JSONファイルからレコード列を読み込む
#[cfg(feature = "fs")]
pub fn load_records(path: &std::path::Path) -> Result<Vec<InterviewRecord>> {
    if !path.exists() {
        return Err(crate::error::Error::Dataset(format!("file not found: {}", path.display())));
    }
    let content = std::fs::read_to_string(path)?;
    parse_records(&content)
}

/// 重複キーの検出（最初に重複したキーを返す）
pub fn find_duplicate_key(records: &[InterviewRecord]) -> Option<&str> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .map(|r| r.key())
        .find(|key| !seen.insert(*key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_bundled_dataset_parses() {
        let records = bundled_records();
        assert!(!records.is_empty());
        assert!(find_duplicate_key(&records).is_none());
    }

    #[test]
    fn test_parse_records_accepts_integer_scores() {
        let json = r#"[{"candidate_name":"Alice","interview_question":"Q1","candidate_response":"R1","ai_generated_score":80}]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ai_generated_score, 80.0);
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let err = parse_records(r#"{"candidate_name":"Alice"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_find_duplicate_key() {
        let records = vec![
            InterviewRecord::new("Alice", "Q", "R", 1.0),
            InterviewRecord::new("Bob", "Q", "R", 2.0),
            InterviewRecord::new("Alice", "Q", "R", 3.0),
        ];
        assert_eq!(find_duplicate_key(&records), Some("Alice"));
    }

    #[cfg(feature = "fs")]
    #[test]
    fn test_load_records_missing_file() {
        let err = load_records(std::path::Path::new("/nonexistent/interviews.json")).unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }
}
