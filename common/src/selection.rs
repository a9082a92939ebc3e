//! 選択済みレコードの集合
//!
//! 挿入順を保持し、`candidate_name` で重複を排除する。
//! 永続化時はInterviewRecordのJSON配列としてそのまま直列化される。

use crate::types::InterviewRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    records: Vec<InterviewRecord>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 復元データから生成（重複キーは先勝ち）
    pub fn from_records(records: impl IntoIterator<Item = InterviewRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.insert(record);
        }
        set
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.iter().any(|r| r.key() == key)
    }

    pub fn get(&self, key: &str) -> Option<&InterviewRecord> {
        self.records.iter().find(|r| r.key() == key)
    }

    /// 末尾に追加。既に同じキーがあれば何もしない。
    pub fn insert(&mut self, record: InterviewRecord) -> bool {
        if self.contains(record.key()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// キーで削除
    pub fn remove(&mut self, key: &str) -> Option<InterviewRecord> {
        let index = self.records.iter().position(|r| r.key() == key)?;
        Some(self.records.remove(index))
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InterviewRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[InterviewRecord] {
        &self.records
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key())
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a InterviewRecord;
    type IntoIter = std::slice::Iter<'a, InterviewRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, score: f64) -> InterviewRecord {
        InterviewRecord::new(name, "Q", "R", score)
    }

    #[test]
    fn test_insert_keeps_order_and_rejects_duplicates() {
        let mut set = SelectionSet::new();
        assert!(set.insert(record("Alice", 80.0)));
        assert!(set.insert(record("Bob", 90.0)));
        assert!(!set.insert(record("Alice", 10.0)));

        let keys: Vec<&str> = set.keys().collect();
        assert_eq!(keys, vec!["Alice", "Bob"]);
        assert_eq!(set.get("Alice").unwrap().ai_generated_score, 80.0);
    }

    #[test]
    fn test_remove_by_key() {
        let mut set = SelectionSet::from_records(vec![record("Alice", 80.0), record("Bob", 90.0)]);
        let removed = set.remove("Alice").unwrap();
        assert_eq!(removed.candidate_name, "Alice");
        assert!(!set.contains("Alice"));
        assert_eq!(set.len(), 1);
        assert!(set.remove("Alice").is_none());
    }

    #[test]
    fn test_from_records_drops_duplicates() {
        let set = SelectionSet::from_records(vec![
            record("Alice", 80.0),
            record("Alice", 81.0),
            record("Bob", 90.0),
        ]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let set = SelectionSet::from_records(vec![record("Alice", 80.0)]);
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with('['));

        let restored: SelectionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, set);
    }
}
