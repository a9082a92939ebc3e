//! 永続化ポート
//!
//! 選択集合はキー `selectedData` にInterviewRecordのJSON配列として保存する。
//! 割り当て済みのグラフ色はキー `chartColors` に保存する。
//! 読み込みに失敗した場合は空の状態にフォールバックする。

use crate::color::HexColor;
use crate::error::Result;
use crate::selection::SelectionSet;
use crate::types::InterviewRecord;
use std::collections::HashMap;

pub const SELECTION_KEY: &str = "selectedData";
pub const CHART_COLORS_KEY: &str = "chartColors";

/// 文字列キー・文字列値のストア
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// メモリ上のストア（テスト・一時利用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON値を読み込む。キーがない・壊れている場合は `None`。
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("failed to read {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("discarding corrupt {}: {}", key, e);
            None
        }
    }
}

pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<()>
where
    T: serde::Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// 選択集合を復元（失敗時は空）
pub fn load_selection<S: KeyValueStore + ?Sized>(store: &S) -> SelectionSet {
    load_json::<Vec<InterviewRecord>, _>(store, SELECTION_KEY)
        .map(SelectionSet::from_records)
        .unwrap_or_default()
}

pub fn save_selection<S: KeyValueStore + ?Sized>(store: &mut S, selection: &SelectionSet) -> Result<()> {
    save_json(store, SELECTION_KEY, selection)
}

/// 割り当て済みの色を復元（失敗時は空）
pub fn load_chart_colors<S: KeyValueStore + ?Sized>(store: &S) -> HashMap<String, HexColor> {
    load_json(store, CHART_COLORS_KEY).unwrap_or_default()
}

pub fn save_chart_colors<S: KeyValueStore + ?Sized>(
    store: &mut S,
    colors: &HashMap<String, HexColor>,
) -> Result<()> {
    save_json(store, CHART_COLORS_KEY, colors)
}

#[cfg(feature = "fs")]
pub use file_store::FileStore;

#[cfg(feature = "fs")]
mod file_store {
    use super::KeyValueStore;
    use crate::error::Result;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use std::fs::File;
    use std::io::{BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct StateFile {
        /// バージョン（互換性チェック用）
        version: u32,
        entries: BTreeMap<String, String>,
    }

    impl Default for StateFile {
        fn default() -> Self {
            Self {
                version: FileStore::CURRENT_VERSION,
                entries: BTreeMap::new(),
            }
        }
    }

    /// JSONファイルに書き出すストア
    ///
    /// `set` / `remove` のたびにファイル全体を書き直す。
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
        state: StateFile,
    }

    impl FileStore {
        const CURRENT_VERSION: u32 = 1;

        /// ファイルを読み込む。存在しない・壊れている・バージョン違いなら空で開始する。
        pub fn open(path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            let state = Self::read_state(&path).unwrap_or_default();
            Self { path, state }
        }

        fn read_state(path: &Path) -> Option<StateFile> {
            if !path.exists() {
                return None;
            }

            let file = match File::open(path) {
                Ok(f) => f,
                Err(e) => {
                    log::warn!("cannot open state file {}: {}", path.display(), e);
                    return None;
                }
            };

            match serde_json::from_reader::<_, StateFile>(BufReader::new(file)) {
                Ok(state) if state.version == Self::CURRENT_VERSION => Some(state),
                Ok(state) => {
                    log::warn!(
                        "state file version mismatch ({} != {}), starting fresh",
                        state.version,
                        Self::CURRENT_VERSION
                    );
                    None
                }
                Err(e) => {
                    log::warn!("corrupt state file {}: {}", path.display(), e);
                    None
                }
            }
        }

        fn flush(&self) -> Result<()> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = File::create(&self.path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &self.state)?;
            // drop時の書き込みエラーは捨てられるので明示的に flush する
            writer.flush()?;
            Ok(())
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn len(&self) -> usize {
            self.state.entries.len()
        }

        pub fn is_empty(&self) -> bool {
            self.state.entries.is_empty()
        }

        /// ファイルごと削除
        pub fn clear(&mut self) -> Result<bool> {
            self.state.entries.clear();
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
                Ok(true)
            } else {
                Ok(false)
            }
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.state.entries.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.state.entries.insert(key.to_string(), value.to_string());
            self.flush()
        }

        fn remove(&mut self, key: &str) -> Result<()> {
            if self.state.entries.remove(key).is_some() {
                self.flush()?;
            }
            Ok(())
        }
    }
}
