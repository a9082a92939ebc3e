//! 表示状態（検索語・ページサイズ・現在ページ）
//!
//! 入力が変わるたびに `reduce` で新しい状態を作り、
//! 総ページ数が確定したら `clamp_to` で現在ページを範囲内に収める。

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// 既定のページサイズ
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// 1ページの件数（0にはならない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// 数値から生成。0以下は1に丸める。
    pub fn clamped(value: i64) -> Self {
        let value = usize::try_from(value.max(1)).unwrap_or(usize::MAX);
        Self(NonZeroUsize::new(value).unwrap_or(NonZeroUsize::MIN))
    }

    /// テキスト入力を解釈
    ///
    /// 整数として読めない入力は `None`（変更を無視する）。
    /// 0以下の整数は1に丸める。
    pub fn parse_input(input: &str) -> Option<Self> {
        input.trim().parse::<i64>().ok().map(Self::clamped)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::clamped(DEFAULT_PAGE_SIZE as i64)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| "page size must be at least 1".to_string())
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// 表示状態の変更イベント
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// 検索語の変更（現在ページは1に戻る）
    Search(String),
    PageSize(PageSize),
    Page(usize),
}

/// 表示状態
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub search_term: String,
    pub page_size: PageSize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            page_size: PageSize::default(),
            current_page: 1,
            total_pages: 0,
        }
    }
}

impl ViewState {
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// イベントを適用した新しい状態を返す（純粋関数）
    ///
    /// `total_pages` は据え置き。再計算後に `clamp_to` を呼ぶこと。
    pub fn reduce(&self, event: &ViewEvent) -> ViewState {
        let mut next = self.clone();
        match event {
            ViewEvent::Search(term) => {
                next.search_term = term.clone();
                next.current_page = 1;
            }
            ViewEvent::PageSize(size) => {
                next.page_size = *size;
            }
            ViewEvent::Page(page) => {
                next.current_page = (*page).max(1);
            }
        }
        next
    }

    /// 総ページ数を反映し、現在ページを `1..=max(total_pages, 1)` に収める
    pub fn clamp_to(&mut self, total_pages: usize) {
        self.total_pages = total_pages;
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }

    /// 小文字化した検索語
    pub fn needle(&self) -> String {
        self.search_term.to_lowercase()
    }
}
