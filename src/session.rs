//! CLIセッション
//!
//! CLIは起動ごとに状態を失うため、選択集合に加えて表示状態（検索語・ページサイズ・
//! 現在ページ）も同じ状態ファイルに保存し、連続した呼び出しを1つの画面操作として扱う。

use crate::error::Result;
use interview_common::dataset::{bundled_records, find_duplicate_key, load_records};
use interview_common::storage::{load_json, save_json};
use interview_common::{
    Change, Command, Dashboard, FileStore, InterviewRecord, KeyValueStore, PageSize, ViewState,
};
use rand::rngs::ThreadRng;
use std::path::Path;

pub const VIEW_STATE_KEY: &str = "viewState";

/// データセットを読み込む（パス未指定なら同梱データ）
pub fn load_dataset(path: Option<&Path>) -> Result<Vec<InterviewRecord>> {
    let records = match path {
        Some(path) => {
            tracing::debug!("loading dataset from {}", path.display());
            load_records(path)?
        }
        None => bundled_records(),
    };

    if let Some(key) = find_duplicate_key(&records) {
        tracing::warn!("duplicate candidate name in dataset: {}", key);
    }
    Ok(records)
}

pub struct Session {
    dashboard: Dashboard<FileStore, ThreadRng>,
}

impl Session {
    /// 状態ファイルを開いて前回の表示状態・選択集合を復元する
    pub fn open(records: Vec<InterviewRecord>, state_path: &Path, default_page_size: usize) -> Self {
        let store = FileStore::open(state_path);
        let view = load_json::<ViewState, _>(&store, VIEW_STATE_KEY).unwrap_or_else(|| {
            ViewState::with_page_size(PageSize::clamped(default_page_size as i64))
        });
        Self {
            dashboard: Dashboard::with_view(records, store, rand::rng(), view),
        }
    }

    /// コマンドを順に適用し、最後に表示状態を保存する
    pub fn apply(&mut self, commands: Vec<Command>) -> Result<Vec<Change>> {
        let mut changes = Vec::with_capacity(commands.len());
        for command in commands {
            changes.push(self.dashboard.dispatch(command)?);
        }
        self.save_view()?;
        Ok(changes)
    }

    pub fn apply_one(&mut self, command: Command) -> Result<Change> {
        let change = self.dashboard.dispatch(command)?;
        self.save_view()?;
        Ok(change)
    }

    /// 既定のページサイズが変わったとき、保存済みの表示状態にも反映する
    pub fn reset_page_size(&mut self, page_size: usize) -> Result<Change> {
        self.apply_one(Command::SetPageSize(page_size as i64))
    }

    fn save_view(&mut self) -> Result<()> {
        let view = self.dashboard.view().clone();
        let store = self.dashboard.store_mut();
        if load_json::<ViewState, _>(&*store, VIEW_STATE_KEY).as_ref() == Some(&view) {
            return Ok(());
        }
        save_json(store, VIEW_STATE_KEY, &view)?;
        Ok(())
    }

    /// 状態ファイルを削除して初期状態に戻す
    pub fn reset(&mut self) -> Result<bool> {
        self.dashboard.dispatch(Command::ClearSelection)?;
        let removed = self.dashboard.store_mut().clear()?;
        Ok(removed)
    }

    pub fn dashboard(&self) -> &Dashboard<FileStore, ThreadRng> {
        &self.dashboard
    }

    pub fn state_path(&self) -> &Path {
        self.dashboard.store().path()
    }

    pub fn stored_keys(&self) -> Vec<&'static str> {
        [
            interview_common::SELECTION_KEY,
            interview_common::CHART_COLORS_KEY,
            VIEW_STATE_KEY,
        ]
        .into_iter()
        .filter(|key| matches!(self.dashboard.store().get(key), Ok(Some(_))))
        .collect()
    }
}

/// `list` の引数をコマンド列に変換する
///
/// 検索 → ページサイズ → ページの順に適用する（検索はページを1に戻すため）。
/// 整数として読めないページサイズは無視し、2番目の値で知らせる。
pub fn list_commands(
    search: Option<String>,
    page_size: Option<&str>,
    page: Option<usize>,
) -> (Vec<Command>, bool) {
    let mut commands = Vec::new();
    let mut ignored = false;

    if let Some(term) = search {
        commands.push(Command::SetSearchTerm(term));
    }
    if let Some(input) = page_size {
        match Command::page_size_input(input) {
            Some(command) => commands.push(command),
            None => ignored = true,
        }
    }
    if let Some(page) = page {
        commands.push(Command::SetPage(page));
    }

    (commands, ignored)
}
