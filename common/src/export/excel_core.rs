//! Excel生成（共通ライブラリ）
//!
//! 選択済みレコードの一覧シートと、割り当て済みの色で塗った縦棒グラフを生成する。

use crate::chart::ChartDataset;
use crate::selection::SelectionSet;
use rust_xlsxwriter::*;

const SHEET_NAME: &str = "Selection";

const HEADERS: &[(&str, f64)] = &[
    ("Candidate Name", 22.0),
    ("Interview Question", 48.0),
    ("Candidate Response", 60.0),
    ("AI Score", 10.0),
    ("Color", 10.0),
];

/// 選択集合のExcelをバッファに生成
///
/// # Arguments
/// * `chart` - 選択集合から導出したグラフ系列（色を使う）
/// * `selection` - 選択済みレコード
/// * `title` - グラフタイトル
pub fn generate_selection_workbook(
    chart: &ChartDataset,
    selection: &SelectionSet,
    title: &str,
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x6B46C1))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let score_format = Format::new()
        .set_num_format("0.##")
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (label, width)) in HEADERS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, *label, &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }

    for (index, record) in selection.iter().enumerate() {
        let row = index as u32 + 1;
        let color = chart
            .color_of(record.key())
            .map(|c| c.as_str().to_string())
            .unwrap_or_default();

        worksheet
            .write_string_with_format(row, 0, &record.candidate_name, &value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet
            .write_string_with_format(row, 1, &record.interview_question, &value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet
            .write_string_with_format(row, 2, &record.candidate_response, &value_format)
            .map_err(|e| format!("値書き込みエラー: {}", e))?;
        worksheet
            .write_number_with_format(row, 3, record.ai_generated_score, &score_format)
            .map_err(|e| format!("スコア書き込みエラー: {}", e))?;
        worksheet
            .write_string_with_format(row, 4, &color, &value_format)
            .map_err(|e| format!("色書き込みエラー: {}", e))?;
    }

    // 選択がなければ表だけ出力する
    if !selection.is_empty() {
        let last_row = selection.len() as u32;
        let points: Vec<ChartPoint> = chart
            .entries()
            .iter()
            .map(|entry| {
                ChartPoint::new().set_format(ChartSolidFill::new().set_color(entry.color.as_str()))
            })
            .collect();

        let mut bar_chart = Chart::new(ChartType::Column);
        bar_chart
            .add_series()
            .set_name("AI Score")
            .set_categories((SHEET_NAME, 1, 0, last_row, 0))
            .set_values((SHEET_NAME, 1, 3, last_row, 3))
            .set_points(&points);
        bar_chart.title().set_name(title);
        bar_chart.legend().set_hidden();

        worksheet
            .insert_chart(last_row + 2, 0, &bar_chart)
            .map_err(|e| format!("グラフ挿入エラー: {}", e))?;
    }

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
