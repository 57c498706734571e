//! 解析ボタンコンポーネント

use leptos::prelude::*;
use plant_doctor_common::SessionView;

#[component]
pub fn AnalyzeButton<F>(view_state: Memo<SessionView>, on_analyze: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <button
            class="btn btn-primary analyze-btn"
            class:pulse=move || view_state.with(|v| v.analyze_pulsing)
            disabled=move || !view_state.with(|v| v.analyze_enabled)
            on:click=move |_| on_analyze(())
        >
            "🔍 Analyze Plant"
        </button>
    }
}
