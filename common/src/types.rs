//! 面接レコードの型定義
//!
//! CLI・Web(WASM)・デスクトップで共有される型:
//! - InterviewRecord: データセットの1行（候補者・質問・回答・AIスコア）

use serde::{Deserialize, Serialize};

/// 面接レコード
///
/// `candidate_name` を一意キーとして扱う。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub candidate_name: String,
    pub interview_question: String,
    pub candidate_response: String,
    pub ai_generated_score: f64,
}

impl InterviewRecord {
    pub fn new(
        candidate_name: impl Into<String>,
        interview_question: impl Into<String>,
        candidate_response: impl Into<String>,
        ai_generated_score: f64,
    ) -> Self {
        Self {
            candidate_name: candidate_name.into(),
            interview_question: interview_question.into(),
            candidate_response: candidate_response.into(),
            ai_generated_score,
        }
    }

    /// 選択・グラフで使うキー
    pub fn key(&self) -> &str {
        &self.candidate_name
    }

    /// 小文字化済みの検索語が名前・質問・回答のいずれかに含まれるか
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        [
            &self.candidate_name,
            &self.interview_question,
            &self.candidate_response,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }

    /// 大文字小文字を区別しない部分一致
    pub fn matches(&self, term: &str) -> bool {
        self.matches_lowercase(&term.to_lowercase())
    }

    /// グラフのホバーテキスト
    pub fn hover_text(&self) -> String {
        format!("Score: {}", self.ai_generated_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> InterviewRecord {
        InterviewRecord::new("Alice", "Tell me about Rust", "I like Ownership", 80.0)
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let record = alice();
        assert!(record.matches("alice"));
        assert!(record.matches("RUST"));
        assert!(record.matches("ownership"));
        assert!(!record.matches("bob"));
    }

    #[test]
    fn test_empty_term_matches_everything() {
        assert!(alice().matches(""));
    }

    #[test]
    fn test_hover_text_prints_integral_scores_without_fraction() {
        assert_eq!(alice().hover_text(), "Score: 80");

        let record = InterviewRecord::new("Carol", "Q", "R", 72.5);
        assert_eq!(record.hover_text(), "Score: 72.5");
    }

    #[test]
    fn test_serde_uses_dataset_field_names() {
        let json = serde_json::to_value(alice()).unwrap();
        assert_eq!(json["candidate_name"], "Alice");
        assert_eq!(json["interview_question"], "Tell me about Rust");
        assert_eq!(json["candidate_response"], "I like Ownership");
        assert_eq!(json["ai_generated_score"], 80.0);
    }
}
