//! ダッシュボードの状態管理
//!
//! レコード列・表示状態・選択集合・グラフ系列をまとめて保持し、
//! 描画側からのコマンドを1件ずつ適用する。適用後は派生状態を再計算し、
//! 実際に変化があった場合だけ購読者へスナップショットを通知する。

use crate::chart::{ChartDataset, ChartEntry};
use crate::color::HexColor;
use crate::error::Result;
use crate::query::{page_links, run_query, PageLink, QueryResult};
use crate::selection::SelectionSet;
use crate::storage::{
    load_chart_colors, load_selection, save_chart_colors, save_selection, KeyValueStore,
};
use crate::types::InterviewRecord;
use crate::view::{PageSize, ViewEvent, ViewState};
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;

/// 描画側から受け付けるコマンド
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetSearchTerm(String),
    /// 0以下は1に丸める
    SetPageSize(i64),
    SetPage(usize),
    /// 候補者名で選択を切り替える
    Toggle(String),
    ClearSelection,
}

impl Command {
    /// テキスト入力からページサイズ変更コマンドを作る
    ///
    /// 整数として読めない入力は `None`（無視する）。
    pub fn page_size_input(input: &str) -> Option<Command> {
        PageSize::parse_input(input).map(|size| Command::SetPageSize(size.get() as i64))
    }
}

/// コマンド適用の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    View,
    Selection,
}

/// 表示中ページの1行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub record: InterviewRecord,
    pub selected: bool,
}

/// 購読者へ渡す読み取り専用ビュー
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub view: ViewState,
    pub rows: Vec<RowView>,
    pub page_links: Vec<PageLink>,
    pub chart: Vec<ChartEntry>,
    pub total_matches: usize,
    pub selected_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Snapshot)>;

pub struct Dashboard<S, R> {
    records: Vec<InterviewRecord>,
    view: ViewState,
    page: QueryResult,
    selection: SelectionSet,
    chart: ChartDataset,
    store: S,
    rng: R,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: KeyValueStore, R: Rng> Dashboard<S, R> {
    pub fn new(records: Vec<InterviewRecord>, store: S, rng: R) -> Self {
        Self::with_view(records, store, rng, ViewState::default())
    }

    /// 表示状態を指定して生成（選択集合とグラフ色はストアから復元）
    pub fn with_view(records: Vec<InterviewRecord>, store: S, mut rng: R, view: ViewState) -> Self {
        let selection = load_selection(&store);
        let palette = load_chart_colors(&store);
        let mut chart = ChartDataset::new();
        chart.sync(&selection, &palette, &mut rng);

        log::debug!(
            "dashboard ready: {} records, {} selected",
            records.len(),
            selection.len()
        );

        let mut dashboard = Self {
            records,
            view,
            page: QueryResult::default(),
            selection,
            chart,
            store,
            rng,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        dashboard.refresh();
        dashboard
    }

    /// コマンドを適用する
    ///
    /// `Err` は永続化の書き込み失敗のみ。その場合もメモリ上の状態は更新済み。
    pub fn dispatch(&mut self, command: Command) -> Result<Change> {
        log::debug!("dispatch {:?}", command);

        let (change, persisted) = match command {
            Command::SetSearchTerm(term) => (self.apply_view(ViewEvent::Search(term)), Ok(())),
            Command::SetPageSize(size) => (
                self.apply_view(ViewEvent::PageSize(PageSize::clamped(size))),
                Ok(()),
            ),
            Command::SetPage(page) => (self.apply_view(ViewEvent::Page(page)), Ok(())),
            Command::Toggle(key) => self.toggle(&key),
            Command::ClearSelection => self.clear_selection(),
        };

        if change != Change::Unchanged {
            self.notify();
        }
        if let Err(e) = &persisted {
            log::warn!("failed to persist selection: {}", e);
        }
        persisted.map(|_| change)
    }

    /// レコード列を差し替える（選択集合は維持、ページは1に戻す）
    pub fn replace_records(&mut self, records: Vec<InterviewRecord>) {
        self.records = records;
        self.view.current_page = 1;
        self.refresh();
        self.notify();
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// 表示中ページのレコード
    pub fn rows(&self) -> &[InterviewRecord] {
        &self.page.rows
    }

    pub fn total_matches(&self) -> usize {
        self.page.total_matches
    }

    pub fn page_links(&self) -> Vec<PageLink> {
        page_links(self.view.total_pages, self.view.current_page)
    }

    pub fn chart(&self) -> &ChartDataset {
        &self.chart
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.contains(key)
    }

    pub fn records(&self) -> &[InterviewRecord] {
        &self.records
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            view: self.view.clone(),
            rows: self
                .page
                .rows
                .iter()
                .map(|record| RowView {
                    selected: self.selection.contains(record.key()),
                    record: record.clone(),
                })
                .collect(),
            page_links: self.page_links(),
            chart: self.chart.entries().to_vec(),
            total_matches: self.page.total_matches,
            selected_count: self.selection.len(),
        }
    }

    fn apply_view(&mut self, event: ViewEvent) -> Change {
        let before = self.view.clone();
        self.view = self.view.reduce(&event);
        self.refresh();
        if self.view == before {
            Change::Unchanged
        } else {
            Change::View
        }
    }

    /// 選択済みなら外し、未選択なら表示中ページから探して追加する
    fn toggle(&mut self, key: &str) -> (Change, Result<()>) {
        if self.selection.remove(key).is_some() {
            self.chart.remove(key);
        } else if let Some(record) = self.page.find(key).cloned() {
            let color = HexColor::random(&mut self.rng);
            self.chart.push(&record, color);
            self.selection.insert(record);
        } else {
            log::debug!("toggle ignored: {} is not on the current page", key);
            return (Change::Unchanged, Ok(()));
        }

        debug_assert_eq!(self.chart.len(), self.selection.len());
        (Change::Selection, self.persist())
    }

    fn clear_selection(&mut self) -> (Change, Result<()>) {
        if self.selection.is_empty() {
            return (Change::Unchanged, Ok(()));
        }
        self.selection.clear();
        self.chart.sync(&self.selection, &HashMap::new(), &mut self.rng);
        (Change::Selection, self.persist())
    }

    fn persist(&mut self) -> Result<()> {
        save_selection(&mut self.store, &self.selection)?;
        save_chart_colors(&mut self.store, &self.chart.palette())
    }

    /// 表示中ページを再計算し、現在ページを範囲内に収める
    fn refresh(&mut self) {
        self.page = run_query(&self.records, &self.view);
        let requested = self.view.current_page;
        self.view.clamp_to(self.page.total_pages);
        if self.view.current_page != requested {
            self.page = run_query(&self.records, &self.view);
        }
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SELECTION_KEY};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn alice_bob() -> Vec<InterviewRecord> {
        vec![
            InterviewRecord::new("Alice", "Q1", "R1", 80.0),
            InterviewRecord::new("Bob", "Q2", "R2", 90.0),
        ]
    }

    fn dashboard(records: Vec<InterviewRecord>) -> Dashboard<MemoryStore, SmallRng> {
        Dashboard::new(records, MemoryStore::new(), SmallRng::seed_from_u64(11))
    }

    fn assert_aligned<S: KeyValueStore, R: Rng>(d: &Dashboard<S, R>) {
        let trace = d.chart().to_trace();
        let n = d.selection().len();
        assert_eq!(trace.categories.len(), n);
        assert_eq!(trace.values.len(), n);
        assert_eq!(trace.colors.len(), n);
        assert_eq!(trace.hover_text.len(), n);
        let keys: Vec<String> = d.selection().keys().map(String::from).collect();
        assert_eq!(trace.categories, keys);
    }

    #[test]
    fn test_toggle_scenario() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        d.dispatch(Command::Toggle("Bob".into())).unwrap();
        assert_eq!(d.chart().categories(), vec!["Alice", "Bob"]);
        assert_eq!(d.chart().hover_text(), vec!["Score: 80", "Score: 90"]);

        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        assert_eq!(d.chart().categories(), vec!["Bob"]);
        assert_aligned(&d);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::Toggle("Bob".into())).unwrap();
        let before = d.selection().clone();
        let before_categories = d.chart().categories();

        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        assert_eq!(d.selection(), &before);
        assert_eq!(d.chart().categories(), before_categories);
        assert_aligned(&d);
    }

    #[test]
    fn test_toggle_looks_up_current_page_only() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::SetPageSize(1)).unwrap();
        assert_eq!(d.rows()[0].candidate_name, "Alice");

        let change = d.dispatch(Command::Toggle("Bob".into())).unwrap();
        assert_eq!(change, Change::Unchanged);
        assert!(d.selection().is_empty());

        d.dispatch(Command::SetPage(2)).unwrap();
        d.dispatch(Command::Toggle("Bob".into())).unwrap();
        assert!(d.is_selected("Bob"));
    }

    #[test]
    fn test_deselect_works_from_any_page() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::SetPageSize(1)).unwrap();
        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        d.dispatch(Command::SetPage(2)).unwrap();

        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        assert!(d.selection().is_empty());
        assert!(d.chart().is_empty());
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut d = dashboard(alice_bob());
        let change = d.dispatch(Command::Toggle("Mallory".into())).unwrap();
        assert_eq!(change, Change::Unchanged);
        assert!(d.store().get(SELECTION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_every_toggle_persists() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        let raw = d.store().get(SELECTION_KEY).unwrap().unwrap();
        assert!(raw.contains("Alice"));

        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        let raw = d.store().get(SELECTION_KEY).unwrap().unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_restart_restores_selection_and_colors() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::Toggle("Bob".into())).unwrap();
        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        let selection = d.selection().clone();
        let colors = d.chart().colors();

        let store = d.store().clone();
        let restarted = Dashboard::new(alice_bob(), store, SmallRng::seed_from_u64(99));
        assert_eq!(restarted.selection(), &selection);
        assert_eq!(restarted.chart().categories(), vec!["Bob", "Alice"]);
        assert_eq!(restarted.chart().colors(), colors);
    }

    #[test]
    fn test_search_resets_page_and_clamps() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::SetPageSize(1)).unwrap();
        d.dispatch(Command::SetPage(2)).unwrap();
        assert_eq!(d.view().current_page, 2);

        d.dispatch(Command::SetSearchTerm("Bob".into())).unwrap();
        assert_eq!(d.view().current_page, 1);
        assert_eq!(d.view().total_pages, 1);
        assert_eq!(d.rows()[0].candidate_name, "Bob");
    }

    #[test]
    fn test_page_size_growth_clamps_current_page() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::SetPageSize(1)).unwrap();
        d.dispatch(Command::SetPage(2)).unwrap();

        d.dispatch(Command::SetPageSize(5)).unwrap();
        assert_eq!(d.view().current_page, 1);
        assert_eq!(d.rows().len(), 2);
    }

    #[test]
    fn test_out_of_range_page_request_is_clamped() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::SetPageSize(1)).unwrap();
        d.dispatch(Command::SetPage(9)).unwrap();
        assert_eq!(d.view().current_page, 2);
        assert_eq!(d.rows()[0].candidate_name, "Bob");
    }

    #[test]
    fn test_page_size_input_policy() {
        assert_eq!(Command::page_size_input("3"), Some(Command::SetPageSize(3)));
        assert_eq!(Command::page_size_input("0"), Some(Command::SetPageSize(1)));
        assert_eq!(Command::page_size_input("-2"), Some(Command::SetPageSize(1)));
        assert_eq!(Command::page_size_input("ten"), None);
    }

    #[test]
    fn test_non_positive_page_size_does_not_crash() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::SetPageSize(-5)).unwrap();
        assert_eq!(d.view().page_size.get(), 1);
        assert_eq!(d.view().total_pages, 2);
    }

    #[test]
    fn test_clear_selection() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        assert_eq!(d.dispatch(Command::ClearSelection).unwrap(), Change::Selection);
        assert!(d.selection().is_empty());
        assert!(d.chart().is_empty());
        assert_eq!(d.dispatch(Command::ClearSelection).unwrap(), Change::Unchanged);
    }

    #[test]
    fn test_subscribers_are_notified_once_per_change() {
        let mut d = dashboard(alice_bob());
        let seen: Rc<RefCell<Vec<Snapshot>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = d.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));

        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        d.dispatch(Command::Toggle("Mallory".into())).unwrap();
        d.dispatch(Command::SetSearchTerm("".into())).unwrap();
        assert_eq!(seen.borrow().len(), 1);

        let last = seen.borrow().last().cloned().unwrap();
        assert_eq!(last.selected_count, 1);
        assert!(last.rows.iter().any(|row| row.record.candidate_name == "Alice" && row.selected));
        assert_eq!(last.chart.len(), 1);

        assert!(d.unsubscribe(id));
        d.dispatch(Command::Toggle("Bob".into())).unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_alignment_holds_over_mixed_commands() {
        let records: Vec<InterviewRecord> = (0..12)
            .map(|i| InterviewRecord::new(format!("C{i}"), "Q", "R", i as f64 * 7.5))
            .collect();
        let mut d = dashboard(records);
        d.dispatch(Command::SetPageSize(4)).unwrap();

        let script = [
            Command::Toggle("C0".into()),
            Command::Toggle("C2".into()),
            Command::SetPage(2),
            Command::Toggle("C5".into()),
            Command::Toggle("C0".into()),
            Command::SetSearchTerm("C1".into()),
            Command::Toggle("C11".into()),
            Command::Toggle("C2".into()),
            Command::SetPage(3),
            Command::Toggle("C10".into()),
        ];
        for command in script {
            d.dispatch(command).unwrap();
            assert_aligned(&d);
        }
        assert_eq!(d.chart().categories(), vec!["C5", "C11", "C10"]);
    }

    #[test]
    fn test_replace_records_keeps_selection() {
        let mut d = dashboard(alice_bob());
        d.dispatch(Command::Toggle("Alice".into())).unwrap();
        d.replace_records(vec![InterviewRecord::new("Zed", "Q", "R", 10.0)]);
        assert!(d.is_selected("Alice"));
        assert_eq!(d.rows().len(), 1);
        assert_eq!(d.view().current_page, 1);
    }
}
