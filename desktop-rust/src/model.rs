use std::path::PathBuf;

use interview_common::ViewState;

/// 入力欄など、コントローラの外に置くUI状態
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub search_input: String,
    /// 入力途中の値を保持するため文字列のまま持つ
    pub page_size_input: String,
    /// `None` は同梱データ
    pub source_path: Option<PathBuf>,
    pub status: String,
}

impl AppState {
    pub fn from_view(view: &ViewState) -> Self {
        Self {
            search_input: view.search_term.clone(),
            page_size_input: view.page_size.get().to_string(),
            ..Self::default()
        }
    }

    pub fn source_label(&self) -> String {
        match &self.source_path {
            Some(path) => path.display().to_string(),
            None => "bundled dataset".to_string(),
        }
    }
}
