//! 対話モード
//!
//! 表を表示し、操作を選んでコマンドを適用するループ。

use crate::error::{DashboardError, Result};
use crate::render::{render_chart, render_page_links, render_summary, render_table, DEFAULT_CHART_WIDTH};
use crate::session::Session;
use dialoguer::{Input, MultiSelect, Select};
use interview_common::{Change, Command, RowView};

/// 対話アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    /// 現在のページで選択を切り替え
    Select,
    Search,
    PageSize,
    GoToPage,
    Chart,
    Clear,
    Quit,
}

impl BrowseAction {
    pub const ALL: [BrowseAction; 7] = [
        BrowseAction::Select,
        BrowseAction::Search,
        BrowseAction::PageSize,
        BrowseAction::GoToPage,
        BrowseAction::Chart,
        BrowseAction::Clear,
        BrowseAction::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BrowseAction::Select => "選択を切り替え",
            BrowseAction::Search => "検索",
            BrowseAction::PageSize => "ページサイズ",
            BrowseAction::GoToPage => "ページ移動",
            BrowseAction::Chart => "グラフ表示",
            BrowseAction::Clear => "選択を全解除",
            BrowseAction::Quit => "終了",
        }
    }
}

/// チェック結果と現在の選択状態の差分から、切り替えるべき候補者名を求める
pub fn toggles_for(rows: &[RowView], checked: &[usize]) -> Vec<String> {
    rows.iter()
        .enumerate()
        .filter(|(index, row)| checked.contains(index) != row.selected)
        .map(|(_, row)| row.record.candidate_name.clone())
        .collect()
}

fn prompt_error(e: dialoguer::Error) -> DashboardError {
    DashboardError::Prompt(e.to_string())
}

pub fn run_browse(session: &mut Session) -> Result<()> {
    loop {
        let snapshot = session.dashboard().snapshot();
        println!("\n{}", render_table(&snapshot));
        println!("{}", render_page_links(&snapshot.page_links));
        println!("{}\n", render_summary(&snapshot));

        let labels: Vec<&str> = BrowseAction::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("操作")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match BrowseAction::ALL[choice] {
            BrowseAction::Select => {
                if snapshot.rows.is_empty() {
                    println!("  → このページにはレコードがありません");
                    continue;
                }
                let names: Vec<&str> = snapshot
                    .rows
                    .iter()
                    .map(|row| row.record.candidate_name.as_str())
                    .collect();
                let defaults: Vec<bool> = snapshot.rows.iter().map(|row| row.selected).collect();
                let checked = MultiSelect::new()
                    .with_prompt("グラフに表示する候補者（スペースで切り替え）")
                    .items(&names)
                    .defaults(&defaults)
                    .interact()
                    .map_err(prompt_error)?;

                let commands: Vec<Command> = toggles_for(&snapshot.rows, &checked)
                    .into_iter()
                    .map(Command::Toggle)
                    .collect();
                session.apply(commands)?;
            }
            BrowseAction::Search => {
                let term: String = Input::new()
                    .with_prompt("検索語（空で全件）")
                    .with_initial_text(snapshot.view.search_term.clone())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;
                session.apply_one(Command::SetSearchTerm(term))?;
            }
            BrowseAction::PageSize => {
                let input: String = Input::new()
                    .with_prompt("1ページの件数")
                    .with_initial_text(snapshot.view.page_size.get().to_string())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;
                match Command::page_size_input(&input) {
                    Some(command) => {
                        session.apply_one(command)?;
                    }
                    None => println!("  → 整数ではないため無視しました: {:?}", input),
                }
            }
            BrowseAction::GoToPage => {
                if snapshot.page_links.len() < 2 {
                    println!("  → ページは1つだけです");
                    continue;
                }
                let pages: Vec<String> = snapshot
                    .page_links
                    .iter()
                    .map(|link| link.number.to_string())
                    .collect();
                let current = snapshot.view.current_page.saturating_sub(1);
                let index = Select::new()
                    .with_prompt("ページ")
                    .items(&pages)
                    .default(current)
                    .interact()
                    .map_err(prompt_error)?;
                session.apply_one(Command::SetPage(index + 1))?;
            }
            BrowseAction::Chart => {
                println!("\n{}", render_chart(&snapshot.chart, DEFAULT_CHART_WIDTH));
            }
            BrowseAction::Clear => {
                if session.apply_one(Command::ClearSelection)? == Change::Unchanged {
                    println!("  → 選択はありません");
                }
            }
            BrowseAction::Quit => {
                println!("✔ 状態を保存しました: {}", session.state_path().display());
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_common::InterviewRecord;

    fn row(name: &str, selected: bool) -> RowView {
        RowView {
            record: InterviewRecord::new(name, "Q", "R", 50.0),
            selected,
        }
    }

    #[test]
    fn test_toggles_for_reports_only_differences() {
        let rows = vec![row("Alice", true), row("Bob", false), row("Carol", true)];
        let toggles = toggles_for(&rows, &[0, 1]);
        assert_eq!(toggles, vec!["Bob".to_string(), "Carol".to_string()]);
    }

    #[test]
    fn test_toggles_for_no_changes() {
        let rows = vec![row("Alice", true), row("Bob", false)];
        assert!(toggles_for(&rows, &[0]).is_empty());
    }

    #[test]
    fn test_action_labels_are_unique() {
        let mut labels: Vec<&str> = BrowseAction::ALL.iter().map(|a| a.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), BrowseAction::ALL.len());
    }
}
