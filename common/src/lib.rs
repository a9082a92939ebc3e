//! Interview Dashboard Common Library
//!
//! CLI・Web(WASM)・デスクトップで共有される型と状態管理

pub mod types;
pub mod error;
pub mod color;
pub mod view;
pub mod query;
pub mod selection;
pub mod chart;
pub mod storage;
pub mod dataset;
pub mod dashboard;
pub mod export;

pub use types::InterviewRecord;
pub use error::{Error, Result};
pub use color::HexColor;
pub use view::{PageSize, ViewEvent, ViewState, DEFAULT_PAGE_SIZE};
pub use query::{filter_records, page_links, paginate, run_query, PageLink, QueryResult};
pub use selection::SelectionSet;
pub use chart::{BarTrace, ChartDataset, ChartEntry};
pub use storage::{KeyValueStore, MemoryStore, CHART_COLORS_KEY, SELECTION_KEY};
#[cfg(feature = "fs")]
pub use storage::FileStore;
pub use dataset::{bundled_records, parse_records};
pub use dashboard::{Change, Command, Dashboard, RowView, Snapshot, SubscriptionId};
