//! Excel出力（CLI版）
//!
//! 共通ライブラリでバッファを生成し、ファイルに書き出す

use crate::error::{DashboardError, Result};
use interview_common::export::excel_core::generate_selection_workbook;
use interview_common::{ChartDataset, SelectionSet};
use std::path::{Path, PathBuf};

/// 出力パス（ディレクトリ指定ならタイトル.xlsx）
pub fn output_path_for(output: &Path, title: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.xlsx", title))
    } else {
        output.to_path_buf()
    }
}

pub fn export_selection(
    chart: &ChartDataset,
    selection: &SelectionSet,
    output: &Path,
    title: &str,
) -> Result<PathBuf> {
    let path = output_path_for(output, title);
    let buffer = generate_selection_workbook(chart, selection, title)
        .map_err(DashboardError::ExcelGeneration)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, buffer)?;
    Ok(path)
}

/// 既定のタイトル（日付付き）
pub fn default_title() -> String {
    format!("interview-scores-{}", chrono::Local::now().format("%Y%m%d"))
}
