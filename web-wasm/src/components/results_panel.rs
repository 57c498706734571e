//! 診断結果パネル

use leptos::html;
use leptos::prelude::*;
use plant_doctor_common::{RemedyList, ResultView, SessionView, TextList};

#[component]
pub fn ResultsPanel(
    view_state: Memo<SessionView>,
    /// 結果表示時のスクロール先
    anchor: NodeRef<html::Div>,
) -> impl IntoView {
    let result = Memo::new(move |_| view_state.with(|v| v.result.clone()));

    view! {
        <div
            class="results-container"
            class:hidden=move || result.with(Option::is_none)
            node_ref=anchor
        >
            {move || result.get().map(|r| view! { <ResultCard result=r /> })}
        </div>
    }
}

#[component]
fn ResultCard(result: ResultView) -> impl IntoView {
    let ResultView {
        plant_name,
        status,
        confidence,
        problem_name,
        cause,
        symptoms,
        prevention_tips,
        natural_remedies,
        chemical_treatments,
        confidence_note,
        disclaimer,
    } = result;

    view! {
        <div class="card diagnosis-card">
            <div class="diagnosis-header">
                <h2 class="plant-name">{plant_name}</h2>
                <span class=status.tone.css_class()>{status.label}</span>
            </div>
            {confidence.map(|c| view! { <span class="confidence-badge">{c}</span> })}
            <h3 class="problem-name">{problem_name}</h3>
            <p class="problem-cause">{cause}</p>
        </div>

        <div class="card">
            <h3>"🔎 Symptoms"</h3>
            <TextItems list=symptoms />
        </div>

        <div class="card remedies">
            <div class="remedy-column">
                <h3>"🌿 Natural Remedies"</h3>
                <RemedyItems list=natural_remedies />
            </div>
            <div class="remedy-column">
                <h3>"🧪 Chemical Treatments"</h3>
                <RemedyItems list=chemical_treatments />
            </div>
        </div>

        <div class="card">
            <h3>"🛡️ Prevention"</h3>
            <TextItems list=prevention_tips />
        </div>

        {confidence_note.map(|note| view! { <p class="confidence-note">{note}</p> })}
        {disclaimer.map(|text| view! { <p class="disclaimer">{text}</p> })}
    }
}

#[component]
fn TextItems(list: TextList) -> impl IntoView {
    let class = if list.placeholder { "item-list text-muted" } else { "item-list" };
    view! {
        <ol class=class>
            {list.items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
        </ol>
    }
}

#[component]
fn RemedyItems(list: RemedyList) -> impl IntoView {
    match list {
        RemedyList::Empty => {
            view! { <p class="text-muted">{RemedyList::placeholder()}</p> }.into_any()
        }
        RemedyList::Blocks(blocks) => blocks
            .into_iter()
            .map(|block| {
                view! {
                    <div class="remedy-item">
                        <strong>{format!("{} {}", block.kind.icon(), block.heading)}</strong>
                        {block
                            .details
                            .into_iter()
                            .map(|line| view! { <p class="remedy-detail">{line}</p> })
                            .collect_view()}
                    </div>
                }
            })
            .collect_view()
            .into_any(),
    }
}
