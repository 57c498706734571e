//! 解析結果の表示モデル
//!
//! `AnalysisResult` から画面に出す文字列をすべて決める純粋関数。
//! 欠けたフィールドは失敗ではなくフォールバック表示にする。
//! Web(Leptos)とCLIの両方がこの `ResultView` をそのまま描画する。

use crate::types::{AnalysisResult, ChemicalTreatment, Diagnosis, NaturalRemedy};

pub const UNKNOWN_PLANT: &str = "Unknown Plant";
pub const NO_PROBLEM: &str = "Healthy or Unknown Issue";
pub const NO_CAUSE: &str = "No specific cause detected.";
pub const NONE_LISTED: &str = "None listed.";
pub const NO_RECOMMENDATIONS: &str = "No recommendations.";

/// ステータスピルの色調
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Ok,
    Warn,
}

impl StatusTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusTone::Ok => "status-pill status-ok",
            StatusTone::Warn => "status-pill status-warn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPill {
    pub label: &'static str,
    pub tone: StatusTone,
}

/// 箇条書き（空なら "None listed." の1項目）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextList {
    pub items: Vec<String>,
    pub placeholder: bool,
}

impl TextList {
    fn from_items(items: &[String]) -> Self {
        if items.is_empty() {
            TextList {
                items: vec![NONE_LISTED.to_string()],
                placeholder: true,
            }
        } else {
            TextList {
                items: items.to_vec(),
                placeholder: false,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemedyKind {
    Natural,
    Chemical,
}

impl RemedyKind {
    pub fn icon(&self) -> &'static str {
        match self {
            RemedyKind::Natural => "✨",
            RemedyKind::Chemical => "☢️",
        }
    }
}

/// 療法1件分の表示ブロック
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemedyBlock {
    pub kind: RemedyKind,
    pub heading: String,
    pub details: Vec<String>,
}

impl From<&NaturalRemedy> for RemedyBlock {
    /// 手順は最初の1つだけ表示する
    fn from(remedy: &NaturalRemedy) -> Self {
        RemedyBlock {
            kind: RemedyKind::Natural,
            heading: remedy.title.clone(),
            details: vec![
                remedy.ingredients.join(", "),
                remedy.steps.first().cloned().unwrap_or_default(),
            ],
        }
    }
}

impl From<&ChemicalTreatment> for RemedyBlock {
    fn from(treatment: &ChemicalTreatment) -> Self {
        RemedyBlock {
            kind: RemedyKind::Chemical,
            heading: treatment.active_ingredient.clone(),
            details: vec![treatment.usage_guidance.clone()],
        }
    }
}

/// 療法リスト（空なら "No recommendations."）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemedyList {
    Blocks(Vec<RemedyBlock>),
    Empty,
}

impl RemedyList {
    fn from_blocks(blocks: Vec<RemedyBlock>) -> Self {
        if blocks.is_empty() {
            RemedyList::Empty
        } else {
            RemedyList::Blocks(blocks)
        }
    }

    pub fn placeholder() -> &'static str {
        NO_RECOMMENDATIONS
    }
}

/// 結果パネル全体の表示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub plant_name: String,
    pub status: StatusPill,
    /// Noneならバッジ自体を隠す
    pub confidence: Option<String>,
    pub problem_name: String,
    pub cause: String,
    pub symptoms: TextList,
    pub prevention_tips: TextList,
    pub natural_remedies: RemedyList,
    pub chemical_treatments: RemedyList,
    pub confidence_note: Option<String>,
    pub disclaimer: Option<String>,
}

/// 信頼度（0.0〜1.0）を四捨五入したパーセント表記にする
///
/// ```
/// use plant_doctor_common::render::format_confidence;
///
/// assert_eq!(format_confidence(0.873), "87% Confident");
/// assert_eq!(format_confidence(0.876), "88% Confident");
/// ```
pub fn format_confidence(confidence: f64) -> String {
    format!("{}% Confident", (confidence * 100.0).round() as i64)
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|s| !s.is_empty())
}

/// 解析結果を表示モデルに変換する
pub fn render_result(result: &AnalysisResult) -> ResultView {
    let status = match result.diagnosis() {
        Diagnosis::Confirmed => StatusPill {
            label: "Confirmed",
            tone: StatusTone::Ok,
        },
        Diagnosis::Uncertain => StatusPill {
            label: "Uncertain",
            tone: StatusTone::Warn,
        },
    };

    let problem = result.detected_problem.as_ref();

    ResultView {
        plant_name: non_empty(result.plant_name.as_deref())
            .unwrap_or(UNKNOWN_PLANT)
            .to_string(),
        status,
        confidence: problem
            .and_then(|p| p.confidence)
            .map(format_confidence),
        problem_name: problem
            .and_then(|p| non_empty(p.name.as_deref()))
            .unwrap_or(NO_PROBLEM)
            .to_string(),
        cause: non_empty(result.cause.as_deref())
            .unwrap_or(NO_CAUSE)
            .to_string(),
        symptoms: TextList::from_items(&result.symptoms),
        prevention_tips: TextList::from_items(&result.prevention_tips),
        natural_remedies: RemedyList::from_blocks(
            result.natural_remedies.iter().map(RemedyBlock::from).collect(),
        ),
        chemical_treatments: RemedyList::from_blocks(
            result.chemical_treatments.iter().map(RemedyBlock::from).collect(),
        ),
        confidence_note: non_empty(result.confidence_note.as_deref()).map(str::to_string),
        disclaimer: non_empty(result.disclaimer.as_deref()).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DetectedProblem;

    fn problem(name: &str, confidence: Option<f64>) -> Option<DetectedProblem> {
        Some(DetectedProblem {
            name: Some(name.to_string()),
            kind: None,
            confidence,
        })
    }

    #[test]
    fn test_empty_result_uses_every_fallback() {
        let view = render_result(&AnalysisResult::default());

        assert_eq!(view.plant_name, UNKNOWN_PLANT);
        assert_eq!(view.status.label, "Uncertain");
        assert_eq!(view.status.tone, StatusTone::Warn);
        assert_eq!(view.confidence, None);
        assert_eq!(view.problem_name, NO_PROBLEM);
        assert_eq!(view.cause, NO_CAUSE);
        assert_eq!(view.symptoms.items, vec![NONE_LISTED]);
        assert!(view.symptoms.placeholder);
        assert_eq!(view.prevention_tips.items, vec![NONE_LISTED]);
        assert_eq!(view.natural_remedies, RemedyList::Empty);
        assert_eq!(view.chemical_treatments, RemedyList::Empty);
        assert!(view.disclaimer.is_none());
    }

    #[test]
    fn test_confirmed_status_pill() {
        let result = AnalysisResult {
            diagnosis_status: Some("confirmed".to_string()),
            ..Default::default()
        };
        let view = render_result(&result);
        assert_eq!(view.status.label, "Confirmed");
        assert_eq!(view.status.tone.css_class(), "status-pill status-ok");
    }

    #[test]
    fn test_uncertain_status_pill() {
        let result = AnalysisResult {
            diagnosis_status: Some("uncertain".to_string()),
            ..Default::default()
        };
        let view = render_result(&result);
        assert_eq!(view.status.label, "Uncertain");
        assert_eq!(view.status.tone.css_class(), "status-pill status-warn");
    }

    #[test]
    fn test_confidence_rounds() {
        assert_eq!(format_confidence(0.873), "87% Confident");
        assert_eq!(format_confidence(0.876), "88% Confident");
        assert_eq!(format_confidence(1.0), "100% Confident");
        assert_eq!(format_confidence(0.0), "0% Confident");
    }

    #[test]
    fn test_confidence_shown_with_problem() {
        let result = AnalysisResult {
            detected_problem: problem("Powdery Mildew", Some(0.873)),
            ..Default::default()
        };
        let view = render_result(&result);
        assert_eq!(view.confidence.as_deref(), Some("87% Confident"));
        assert_eq!(view.problem_name, "Powdery Mildew");
    }

    #[test]
    fn test_problem_without_confidence_hides_badge() {
        let result = AnalysisResult {
            detected_problem: problem("Aphids", None),
            ..Default::default()
        };
        let view = render_result(&result);
        assert!(view.confidence.is_none());
        assert_eq!(view.problem_name, "Aphids");
    }

    #[test]
    fn test_problem_with_empty_name_falls_back() {
        let result = AnalysisResult {
            detected_problem: problem("", Some(0.4)),
            ..Default::default()
        };
        let view = render_result(&result);
        assert_eq!(view.problem_name, NO_PROBLEM);
        assert_eq!(view.confidence.as_deref(), Some("40% Confident"));
    }

    #[test]
    fn test_empty_plant_name_falls_back() {
        let result = AnalysisResult {
            plant_name: Some(String::new()),
            cause: Some(String::new()),
            ..Default::default()
        };
        let view = render_result(&result);
        assert_eq!(view.plant_name, UNKNOWN_PLANT);
        assert_eq!(view.cause, NO_CAUSE);
    }

    #[test]
    fn test_natural_remedy_shows_first_step_only() {
        let result = AnalysisResult {
            natural_remedies: vec![NaturalRemedy {
                title: "Neem Spray".to_string(),
                ingredients: vec!["neem oil".to_string(), "water".to_string()],
                steps: vec![
                    "Mix 2% neem oil with water".to_string(),
                    "Spray weekly".to_string(),
                ],
                ..Default::default()
            }],
            ..Default::default()
        };

        let view = render_result(&result);
        let RemedyList::Blocks(blocks) = view.natural_remedies else {
            panic!("療法ブロックがない");
        };
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, RemedyKind::Natural);
        assert_eq!(blocks[0].heading, "Neem Spray");
        assert_eq!(
            blocks[0].details,
            vec!["neem oil, water", "Mix 2% neem oil with water"]
        );
        assert!(!blocks[0].details.iter().any(|d| d.contains("Spray weekly")));
    }

    #[test]
    fn test_natural_remedy_without_steps() {
        let block = RemedyBlock::from(&NaturalRemedy {
            title: "Compost Tea".to_string(),
            ..Default::default()
        });
        assert_eq!(block.details, vec!["", ""]);
    }

    #[test]
    fn test_chemical_treatment_block() {
        let result = AnalysisResult {
            chemical_treatments: vec![ChemicalTreatment {
                active_ingredient: "Copper hydroxide".to_string(),
                usage_guidance: "Apply at first sign of disease".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let view = render_result(&result);
        let RemedyList::Blocks(blocks) = view.chemical_treatments else {
            panic!("処置ブロックがない");
        };
        assert_eq!(blocks[0].kind.icon(), "☢️");
        assert_eq!(blocks[0].heading, "Copper hydroxide");
        assert_eq!(blocks[0].details, vec!["Apply at first sign of disease"]);
    }

    #[test]
    fn test_lists_keep_order() {
        let result = AnalysisResult {
            symptoms: vec!["Spots".to_string(), "Curling".to_string()],
            prevention_tips: vec!["Prune".to_string()],
            ..Default::default()
        };
        let view = render_result(&result);
        assert_eq!(view.symptoms.items, vec!["Spots", "Curling"]);
        assert!(!view.symptoms.placeholder);
        assert_eq!(view.prevention_tips.items, vec!["Prune"]);
    }
}
