//! メインアプリケーションコンポーネント

use crate::components::{
    bar_chart::BarChart,
    data_table::DataTable,
    header::Header,
    pagination::Pagination,
    search_bar::SearchBar,
};
use crate::storage::BrowserStore;
use interview_common::{bundled_records, Command, Dashboard, Snapshot};
use leptos::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

type WebDashboard = Dashboard<BrowserStore, SmallRng>;

/// メインアプリケーションコンポーネント
///
/// コントローラは購読者（`Box<dyn FnMut>`）を持つため `Send` ではない。
/// ローカルストレージの `StoredValue` に置き、描画は購読で更新するシグナルだけを読む。
#[component]
pub fn App() -> impl IntoView {
    let rng = SmallRng::seed_from_u64(js_sys::Date::now() as u64);
    let mut dashboard: WebDashboard = Dashboard::new(bundled_records(), BrowserStore::new(), rng);

    let (snapshot, set_snapshot) = signal(dashboard.snapshot());
    dashboard.subscribe(move |next: &Snapshot| set_snapshot.set(next.clone()));
    let dashboard = StoredValue::new_local(dashboard);

    let on_command = move |command: Command| {
        dashboard.update_value(|d| {
            if let Err(e) = d.dispatch(command) {
                log::warn!("選択の保存に失敗: {}", e);
            }
        });
    };

    let search_term = Signal::derive(move || snapshot.with(|s| s.view.search_term.clone()));
    let page_size = Signal::derive(move || snapshot.with(|s| s.view.page_size.get()));
    let rows = Signal::derive(move || snapshot.with(|s| s.rows.clone()));
    let links = Signal::derive(move || snapshot.with(|s| s.page_links.clone()));
    let chart = Signal::derive(move || snapshot.with(|s| s.chart.clone()));

    view! {
        <div class="container">
            <Header />

            <SearchBar search_term=search_term page_size=page_size on_command=on_command />

            <p class="summary">
                {move || snapshot.with(|s| {
                    format!("{}件中 {}/{}ページ ・ 選択 {}件",
                        s.total_matches,
                        s.view.current_page,
                        s.view.total_pages,
                        s.selected_count)
                })}
            </p>

            <DataTable rows=rows on_command=on_command />

            <Pagination links=links on_command=on_command />

            <BarChart entries=chart on_command=on_command />
        </div>
    }
}
