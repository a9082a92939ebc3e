//! 棒グラフのデータセット
//!
//! 選択集合から導出される系列。各エントリは最初に選択されたときに色が決まり、
//! 選択されている間はその色と相対位置を保つ。

use crate::color::HexColor;
use crate::selection::SelectionSet;
use crate::types::InterviewRecord;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 棒1本分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    pub category: String,
    pub value: f64,
    pub color: HexColor,
    pub hover_text: String,
}

impl ChartEntry {
    fn from_record(record: &InterviewRecord, color: HexColor) -> Self {
        Self {
            category: record.candidate_name.clone(),
            value: record.ai_generated_score,
            color,
            hover_text: record.hover_text(),
        }
    }
}

/// 描画側に渡す列指向の系列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarTrace {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<HexColor>,
    pub hover_text: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    entries: Vec<ChartEntry>,
}

impl ChartDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// 選択集合に合わせて再計算する
    ///
    /// 残ったエントリは色を引き継ぎ、新しいレコードには `palette` の色、
    /// なければ乱数の色を割り当てる。順序は選択集合の挿入順。
    pub fn sync<R: Rng + ?Sized>(
        &mut self,
        selection: &SelectionSet,
        palette: &HashMap<String, HexColor>,
        rng: &mut R,
    ) {
        let mut previous: HashMap<String, HexColor> = self
            .entries
            .drain(..)
            .map(|entry| (entry.category, entry.color))
            .collect();

        self.entries = selection
            .iter()
            .map(|record| {
                let color = previous
                    .remove(record.key())
                    .or_else(|| palette.get(record.key()).cloned())
                    .unwrap_or_else(|| HexColor::random(&mut *rng));
                ChartEntry::from_record(record, color)
            })
            .collect();
    }

    /// 末尾に追加（同じカテゴリがあれば何もしない）
    pub fn push(&mut self, record: &InterviewRecord, color: HexColor) -> bool {
        if self.contains(record.key()) {
            return false;
        }
        self.entries.push(ChartEntry::from_record(record, color));
        true
    }

    /// カテゴリ（候補者名）で削除。位置ではなくキーで照合する。
    pub fn remove(&mut self, category: &str) -> Option<ChartEntry> {
        let index = self.entries.iter().position(|e| e.category == category)?;
        Some(self.entries.remove(index))
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|e| e.category == category)
    }

    pub fn color_of(&self, category: &str) -> Option<&HexColor> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| &e.color)
    }

    pub fn entries(&self) -> &[ChartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn categories(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.category.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    pub fn colors(&self) -> Vec<HexColor> {
        self.entries.iter().map(|e| e.color.clone()).collect()
    }

    pub fn hover_text(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.hover_text.clone()).collect()
    }

    /// 最大値（描画スケール用、空なら0）
    pub fn max_value(&self) -> f64 {
        self.entries.iter().map(|e| e.value).fold(0.0_f64, f64::max)
    }

    /// 割り当て済みの色（永続化用）
    pub fn palette(&self) -> HashMap<String, HexColor> {
        self.entries
            .iter()
            .map(|e| (e.category.clone(), e.color.clone()))
            .collect()
    }

    pub fn to_trace(&self) -> BarTrace {
        BarTrace {
            categories: self.categories(),
            values: self.values(),
            colors: self.colors(),
            hover_text: self.hover_text(),
        }
    }
}
