use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interview-dashboard")]
#[command(about = "面接スコアの検索・ページング・選択・棒グラフ表示ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データセットJSON（省略時は設定ファイル、なければ同梱データ）
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// 状態ファイル（選択・表示状態の保存先）
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 現在のページを表示（検索・ページ移動・ページサイズ変更）
    List {
        /// 検索語（候補者名・質問・回答の部分一致、大文字小文字無視）
        #[arg(short, long)]
        search: Option<String>,

        /// ページサイズ（整数以外は無視、0以下は1）
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        page_size: Option<String>,

        /// ページ番号（1始まり）
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// 候補者の選択を切り替える（未選択の候補者は現在のページから探す）
    Toggle {
        /// 候補者名
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// 選択中の候補者を棒グラフで表示
    Chart {
        /// 棒の最大幅（文字数）
        #[arg(short, long, default_value = "40")]
        width: usize,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 選択を解除
    Clear {
        /// 表示状態も含めて状態ファイルを削除
        #[arg(long)]
        all: bool,
    },

    /// 対話モードで表を操作
    Browse,

    /// 選択中の候補者をExcelに出力
    Export {
        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// グラフタイトル
        #[arg(short, long)]
        title: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// データセットJSONを設定
        #[arg(long)]
        set_dataset: Option<PathBuf>,

        /// 既定のページサイズを設定（保存済みの表示状態にも反映）
        #[arg(long, allow_hyphen_values = true)]
        set_page_size: Option<i64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
