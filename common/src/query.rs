//! レコード検索とページ分割
//!
//! 検索は名前・質問・回答への大文字小文字無視の部分一致、
//! ページ分割は `page_size` 件ずつの連続チャンク（最後のチャンクは短くてよい）。

use crate::types::InterviewRecord;
use crate::view::{PageSize, ViewState};
use serde::{Deserialize, Serialize};

/// 検索にヒットしたレコードを元の順序で返す
pub fn filter_records<'a>(records: &'a [InterviewRecord], term: &str) -> Vec<&'a InterviewRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches_lowercase(&needle))
        .collect()
}

/// ページ分割の結果
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// 1始まりのページ番号に対応するチャンク（範囲外なら空）
    pub items: Vec<T>,
    pub total_pages: usize,
}

/// `items` を `page_size` 件ずつに分け、`page`（1始まり）番目を返す
pub fn paginate<T: Clone>(items: &[T], page_size: PageSize, page: usize) -> Page<T> {
    let size = page_size.get();
    let total_pages = items.len().div_ceil(size);
    let chunk = page
        .checked_sub(1)
        .and_then(|index| items.chunks(size).nth(index))
        .map(|chunk| chunk.to_vec())
        .unwrap_or_default();

    Page {
        items: chunk,
        total_pages,
    }
}

/// 表示中ページの計算結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub rows: Vec<InterviewRecord>,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl QueryResult {
    /// 表示中ページからキーでレコードを探す
    pub fn find(&self, key: &str) -> Option<&InterviewRecord> {
        self.rows.iter().find(|row| row.key() == key)
    }
}

/// 検索してページ分割する
///
/// `view.current_page` はそのまま使う。範囲外のページは空になる。
pub fn run_query(records: &[InterviewRecord], view: &ViewState) -> QueryResult {
    let filtered = filter_records(records, &view.search_term);
    let page = paginate(&filtered, view.page_size, view.current_page);

    QueryResult {
        rows: page.items.into_iter().cloned().collect(),
        total_pages: page.total_pages,
        total_matches: filtered.len(),
    }
}

/// ページボタン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub number: usize,
    pub active: bool,
}

/// 1..=total_pages のページボタン一覧（現在ページに印を付ける）
pub fn page_links(total_pages: usize, current_page: usize) -> Vec<PageLink> {
    (1..=total_pages)
        .map(|number| PageLink {
            number,
            active: number == current_page,
        })
        .collect()
}
