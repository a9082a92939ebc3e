//! 端末向けの表・ページボタン・棒グラフ描画

use colored::Colorize;
use interview_common::{ChartEntry, PageLink, Snapshot};

const NAME_WIDTH: usize = 18;
const QUESTION_WIDTH: usize = 36;
const RESPONSE_WIDTH: usize = 40;
pub const DEFAULT_CHART_WIDTH: usize = 40;

/// 文字数で切り詰める（末尾に…）
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let fill = width.saturating_sub(cut.chars().count());
    format!("{}{}", cut, " ".repeat(fill))
}

/// 表示中ページの表
pub fn render_table(snapshot: &Snapshot) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "    {} {} {} {}",
        pad("Candidate Name", NAME_WIDTH).bold(),
        pad("Interview Question", QUESTION_WIDTH).bold(),
        pad("Candidate Response", RESPONSE_WIDTH).bold(),
        "AI Score".bold()
    ));

    if snapshot.rows.is_empty() {
        lines.push("    (該当するレコードがありません)".dimmed().to_string());
    }

    for row in &snapshot.rows {
        let mark = if row.selected { "[x]" } else { "[ ]" };
        let record = &row.record;
        lines.push(format!(
            "{} {} {} {} {}",
            mark,
            pad(&record.candidate_name, NAME_WIDTH),
            pad(&record.interview_question, QUESTION_WIDTH),
            pad(&record.candidate_response, RESPONSE_WIDTH),
            record.ai_generated_score
        ));
    }

    lines.join("\n")
}

/// ページボタン（現在ページは [n]）
pub fn render_page_links(links: &[PageLink]) -> String {
    if links.is_empty() {
        return "Page: -".to_string();
    }
    let buttons: Vec<String> = links
        .iter()
        .map(|link| {
            if link.active {
                format!("[{}]", link.number).blue().bold().to_string()
            } else {
                format!(" {} ", link.number)
            }
        })
        .collect();
    format!("Page: {}", buttons.join(""))
}

/// 件数の要約
pub fn render_summary(snapshot: &Snapshot) -> String {
    let view = &snapshot.view;
    let search = if view.search_term.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", view.search_term)
    };
    format!(
        "検索: {} / 該当: {}件 / {}件ずつ / {}/{}ページ / 選択: {}件",
        search,
        snapshot.total_matches,
        view.page_size.get(),
        view.current_page,
        view.total_pages,
        snapshot.selected_count
    )
}

/// 横棒グラフ（各棒は割り当て済みの色）
pub fn render_chart(entries: &[ChartEntry], width: usize) -> String {
    if entries.is_empty() {
        return "(選択されたレコードはありません)".dimmed().to_string();
    }

    let max_value = entries
        .iter()
        .map(|entry| entry.value)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let label_width = entries
        .iter()
        .map(|entry| entry.category.chars().count())
        .max()
        .unwrap_or(0)
        .min(NAME_WIDTH);

    entries
        .iter()
        .map(|entry| {
            let length = if entry.value <= 0.0 {
                0
            } else {
                ((entry.value / max_value) * width as f64).round().max(1.0) as usize
            };
            let (r, g, b) = entry.color.rgb();
            format!(
                "{} │{} {}  {}",
                pad(&entry.category, label_width),
                "█".repeat(length).truecolor(r, g, b),
                entry.hover_text,
                entry.color.as_str().dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
