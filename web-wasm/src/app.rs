//! メインアプリケーションコンポーネント
//!
//! 画面状態は `Session` 1つだけを `RwSignal` に持ち、
//! 各コンポーネントは `SessionView` から描画する。

use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use plant_doctor_common::{Completion, Session, SessionView, DEFAULT_SERVICE_URL};
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::api::analyze_plant;
use crate::components::{
    analyze_button::AnalyzeButton,
    error_panel::ErrorPanel,
    header::Header,
    loading_indicator::LoadingIndicator,
    results_panel::ResultsPanel,
    upload_area::UploadArea,
};

/// 描画完了後に要素を画面内へスクロール
fn scroll_into_view(target: NodeRef<html::Div>, block: ScrollLogicalPosition) {
    request_animation_frame(move || {
        if let Some(el) = target.get_untracked() {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(block);
            el.scroll_into_view_with_scroll_into_view_options(&opts);
        }
    });
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let session = RwSignal::new(Session::new());
    let view_state: Memo<SessionView> = Memo::new(move |_| session.with(Session::view));

    let loading_ref = NodeRef::<html::Div>::new();
    let results_ref = NodeRef::<html::Div>::new();

    // 解析開始ハンドラ
    let on_analyze = move |_: ()| {
        // 未選択・解析中はここで弾かれる
        let Some(Ok(request)) = session.try_update(|s| s.begin_analysis()) else {
            return;
        };
        scroll_into_view(loading_ref, ScrollLogicalPosition::Center);

        spawn_local(async move {
            let outcome = analyze_plant(DEFAULT_SERVICE_URL, &request.file).await;
            if let Err(err) = &outcome {
                gloo::console::error!(format!("analysis failed: {}", err));
            }

            let completion = session.try_update(|s| s.finish_analysis(request.ticket, outcome));
            if completion == Some(Completion::Rendered) {
                scroll_into_view(results_ref, ScrollLogicalPosition::Start);
            }
        });
    };

    view! {
        <div class="container">
            <Header />

            <UploadArea session=session view_state=view_state />

            <AnalyzeButton view_state=view_state on_analyze=on_analyze />

            <LoadingIndicator view_state=view_state anchor=loading_ref />

            <ErrorPanel view_state=view_state />

            <ResultsPanel view_state=view_state anchor=results_ref />
        </div>
    }
}
