//! 選択中の候補者の棒グラフ
//!
//! 棒は `div` で描き、`title` 属性でホバー時にスコアを出す。

use interview_common::{ChartEntry, Command};
use leptos::prelude::*;

/// 棒1本の表示情報
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// 最大値に対する高さ（0〜100）
    pub height_percent: f64,
    pub category: String,
    pub color: String,
    pub hover_text: String,
}

/// エントリ順のまま、最大値を100%として高さを決める
pub fn bar_layout(entries: &[ChartEntry]) -> Vec<Bar> {
    let max_value = entries
        .iter()
        .map(|e| e.value)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    entries
        .iter()
        .map(|entry| Bar {
            height_percent: entry.value.max(0.0) / max_value * 100.0,
            category: entry.category.clone(),
            color: entry.color.to_string(),
            hover_text: entry.hover_text.clone(),
        })
        .collect()
}

#[component]
pub fn BarChart<F>(entries: Signal<Vec<ChartEntry>>, on_command: F) -> impl IntoView
where
    F: Fn(Command) + 'static + Clone + Send,
{
    view! {
        <section class="bar-chart">
            <div class="chart-header">
                <h2>"AI Score"</h2>
                <button
                    class="btn btn-tertiary btn-small"
                    disabled=move || entries.with(|e| e.is_empty())
                    on:click=move |_| on_command(Command::ClearSelection)
                >
                    "選択を解除"
                </button>
            </div>
            <Show
                when=move || !entries.with(|e| e.is_empty())
                fallback=|| view! { <p class="text-muted">"表のチェックボックスで候補者を選択してください"</p> }
            >
                <div class="chart-plot">
                    {move || {
                        bar_layout(&entries.get())
                            .into_iter()
                            .map(|bar| {
                                view! {
                                    <div class="chart-column">
                                        <div
                                            class="chart-bar"
                                            title=bar.hover_text.clone()
                                            style:height=format!("{:.1}%", bar.height_percent)
                                            style:background-color=bar.color.clone()
                                        ></div>
                                        <span class="chart-label">{bar.category.clone()}</span>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </section>
    }
}
