//! アップロード → 解析 → 表示 の画面状態
//!
//! 選択中の画像と表示中の結果だけを持つ。フロントエンドは操作を呼び、
//! `Session::view()` が返す `SessionView` をそのまま描画する。
//!
//! - 解析中フラグで二重送信を拒否する
//! - 解析中に画像が差し替えられた場合、古いレスポンスはチケットで破棄する

use crate::error::{AnalysisError, Error, Result};
use crate::preview::{ImageFile, Preview, PreviewDecoder};
use crate::render::{render_result, ResultView};
use crate::types::AnalysisResult;

/// 選択中の画像
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file: ImageFile,
    pub preview: Preview,
}

/// 解析リクエストと選択の世代の対応
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// トランスポートに渡す解析リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub ticket: Ticket,
    pub file: ImageFile,
}

/// `finish_analysis` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 結果パネルを表示した（スクロール対象）
    Rendered,
    /// エラーパネルを表示した
    Failed,
    /// 選択が変わっていたので捨てた
    Discarded,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Panel {
    #[default]
    Hidden,
    Result(AnalysisResult),
    Error(String),
}

/// 画面状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    selected: Option<SelectedImage>,
    panel: Panel,
    in_flight: bool,
    pulse: bool,
    generation: u64,
}

/// 描画指示
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionView {
    pub upload_prompt_visible: bool,
    pub preview: Option<String>,
    pub file_name: Option<String>,
    pub analyze_enabled: bool,
    pub analyze_pulsing: bool,
    pub loading_visible: bool,
    pub result: Option<ResultView>,
    pub error_banner: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.panel {
            Panel::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// 画像を選択する（前の選択は丸ごと置き換え）
    ///
    /// プレビューを作れない場合は前の選択を残し、エラーパネルに理由を出す
    pub fn select_image(
        &mut self,
        file: ImageFile,
        decoder: &dyn PreviewDecoder,
    ) -> Result<&Preview> {
        let preview = match decoder.decode(&file) {
            Ok(preview) => preview,
            Err(err) => {
                self.reject_selection(&err);
                return Err(err);
            }
        };

        self.generation += 1;
        self.panel = Panel::Hidden;
        self.pulse = true;
        // 送信時もプレビューで確定した形式を使う
        let file = ImageFile {
            mime_type: preview.mime_type.clone(),
            ..file
        };
        let selected = self.selected.insert(SelectedImage { file, preview });
        Ok(&selected.preview)
    }

    /// ファイルを読めなかったことをエラーパネルに出す（選択は変えない）
    pub fn reject_selection(&mut self, err: &Error) {
        self.panel = Panel::Error(format!("Error: {}.", err));
    }

    /// 選択を解除し、初期表示に戻す
    pub fn remove_image(&mut self) {
        self.generation += 1;
        self.selected = None;
        self.panel = Panel::Hidden;
        self.pulse = false;
    }

    /// 解析を開始する
    ///
    /// 解析ボタンを無効化してローディング表示に切り替える。
    /// 返したリクエストは `finish_analysis` に同じチケットで戻すこと。
    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest> {
        if self.in_flight {
            return Err(Error::AnalysisInFlight);
        }
        let selected = self.selected.as_ref().ok_or(Error::NoImageSelected)?;
        let request = AnalysisRequest {
            ticket: Ticket(self.generation),
            file: selected.file.clone(),
        };

        self.in_flight = true;
        self.pulse = false;
        self.panel = Panel::Hidden;
        Ok(request)
    }

    /// 解析を終了する（成功・失敗に関わらずボタンを再度有効化）
    pub fn finish_analysis(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<AnalysisResult, AnalysisError>,
    ) -> Completion {
        self.in_flight = false;

        if ticket != Ticket(self.generation) || self.selected.is_none() {
            return Completion::Discarded;
        }

        match outcome {
            Ok(result) => {
                self.panel = Panel::Result(result);
                Completion::Rendered
            }
            Err(err) => {
                self.panel = Panel::Error(err.banner());
                Completion::Failed
            }
        }
    }

    pub fn view(&self) -> SessionView {
        let (result, error_banner) = match &self.panel {
            Panel::Hidden => (None, None),
            Panel::Result(result) => (Some(render_result(result)), None),
            Panel::Error(banner) => (None, Some(banner.clone())),
        };

        SessionView {
            upload_prompt_visible: self.selected.is_none(),
            preview: self.selected.as_ref().map(|s| s.preview.data_url.clone()),
            file_name: self.selected.as_ref().map(|s| s.file.name.clone()),
            analyze_enabled: self.selected.is_some() && !self.in_flight,
            analyze_pulsing: self.pulse,
            loading_visible: self.in_flight,
            result,
            error_banner,
        }
    }
}
