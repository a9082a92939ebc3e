use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};

use interview_common::dataset;
use interview_common::export::excel_core::generate_selection_workbook;
use interview_common::{ChartDataset, InterviewRecord, SelectionSet};

pub fn load_records(path: &Path) -> Result<Vec<InterviewRecord>> {
    let records = dataset::load_records(path).with_context(|| format!("load {}", path.display()))?;
    Ok(records)
}

pub fn export_workbook(
    path: &Path,
    chart: &ChartDataset,
    selection: &SelectionSet,
    title: &str,
) -> Result<()> {
    let buffer = generate_selection_workbook(chart, selection, title).map_err(|e| anyhow!(e))?;
    fs::write(path, buffer).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// 選択・グラフ色の保存先（CLIとは別ファイル）
pub fn default_state_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("interview-dashboard")
        .join("desktop-state.json")
}

pub fn default_export_name(source: Option<&Path>) -> String {
    let stem = source
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("interview-scores");
    format!("{stem}.selection.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_export_name_uses_dataset_stem() {
        assert_eq!(
            default_export_name(Some(Path::new("/data/round1.json"))),
            "round1.selection.xlsx"
        );
        assert_eq!(default_export_name(None), "interview-scores.selection.xlsx");
    }

    #[test]
    fn load_records_reports_missing_file() {
        let err = load_records(Path::new("/nonexistent/interviews.json")).unwrap_err();
        assert!(err.to_string().contains("load /nonexistent/interviews.json"));
        assert!(format!("{err:#}").contains("file not found"));
    }

    #[test]
    fn default_state_path_is_json() {
        let path = default_state_path();
        assert_eq!(path.file_name().and_then(|s| s.to_str()), Some("desktop-state.json"));
    }
}
