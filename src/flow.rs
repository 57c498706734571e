//! 選択 → 解析 → 表示 の1サイクル
//!
//! `analyze` コマンドと対話モードの両方から使う

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use plant_doctor_common::{Completion, Session};
use tracing::warn;

use crate::client::AnalysisClient;
use crate::decoder::{load_image_file, ImageCrateDecoder};
use crate::error::Result;
use crate::report::format_preview;

/// パスの画像を選択し、プレビュー情報を返す
pub fn select_path(session: &mut Session, path: &Path) -> Result<String> {
    let file = load_image_file(path)?;
    let preview = session.select_image(file, &ImageCrateDecoder)?.clone();
    Ok(session
        .selected()
        .map(|s| format_preview(&s.file, &preview))
        .unwrap_or_default())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// 選択中の画像を解析する
///
/// 解析中はスピナーを出し、終了後はセッションに結果かエラーを残す
pub async fn run_analysis(session: &mut Session, client: &AnalysisClient) -> Result<Completion> {
    let request = session.begin_analysis()?;

    let pb = spinner(&format!("Analyzing {}...", request.file.name));
    let outcome = client.analyze(&request.file).await;
    pb.finish_and_clear();

    if let Err(err) = &outcome {
        warn!(error = %err, "analysis failed");
    }

    Ok(session.finish_analysis(request.ticket, outcome))
}
