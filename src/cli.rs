use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plant-doctor")]
#[command(about = "Upload a plant leaf photo and show the diagnosis", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 解析サービスのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を1枚解析して結果を表示
    Analyze {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 表示の代わりに生のJSONを出力
        #[arg(long)]
        json: bool,
    },

    /// 保存済みの解析結果JSONを表示
    Show {
        /// 解析結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// 対話モード（選択・削除・解析を繰り返す）
    Interactive,

    /// 解析サービスの疎通確認
    Ping,

    /// 設定を表示/編集
    Config {
        /// 解析サービスのURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long, conflicts_with = "clear_timeout")]
        set_timeout: Option<u64>,

        /// タイムアウトを解除
        #[arg(long)]
        clear_timeout: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
