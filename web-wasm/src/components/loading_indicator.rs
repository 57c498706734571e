//! 解析中インジケーター

use leptos::html;
use leptos::prelude::*;
use plant_doctor_common::SessionView;

#[component]
pub fn LoadingIndicator(
    view_state: Memo<SessionView>,
    /// 解析開始時のスクロール先
    anchor: NodeRef<html::Div>,
) -> impl IntoView {
    view! {
        <div
            class="loading"
            class:hidden=move || !view_state.with(|v| v.loading_visible)
            node_ref=anchor
        >
            <div class="spinner"></div>
            <p>"Analyzing your plant..."</p>
        </div>
    }
}
