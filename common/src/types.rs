//! 解析結果の型定義
//!
//! 解析サービスの `/analyze-plant` が返すJSONに対応する。
//! すべてのフィールドは任意で、型が合わないフィールドはデフォルト値に落とす。
//! 部分的に欠けたレスポンスでも描画は必ず成功させるため。

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 診断ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnosis {
    Confirmed,
    Uncertain,
}

/// AI解析結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub diagnosis_status: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub plant_name: Option<String>,

    #[serde(deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub detected_problem: Option<DetectedProblem>,

    #[serde(deserialize_with = "lenient_text_list", skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,

    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub natural_remedies: Vec<NaturalRemedy>,

    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Vec::is_empty")]
    pub chemical_treatments: Vec<ChemicalTreatment>,

    #[serde(deserialize_with = "lenient_text_list", skip_serializing_if = "Vec::is_empty")]
    pub prevention_tips: Vec<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub confidence_note: Option<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

impl AnalysisResult {
    /// `diagnosis_status` が厳密に "confirmed" の場合のみ確定
    pub fn diagnosis(&self) -> Diagnosis {
        if self.diagnosis_status.as_deref() == Some("confirmed") {
            Diagnosis::Confirmed
        } else {
            Diagnosis::Uncertain
        }
    }
}

/// 検出された問題（病気・害虫・栄養不足など）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedProblem {
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// disease | pest | nutrient_deficiency | unknown
    #[serde(rename = "type", deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// 0.0〜1.0
    #[serde(deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// 自然療法
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaturalRemedy {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(deserialize_with = "lenient_text_list")]
    pub ingredients: Vec<String>,

    #[serde(deserialize_with = "lenient_text_list")]
    pub steps: Vec<String>,

    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,

    /// low | medium
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub safety_level: Option<String>,
}

/// 化学的処置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemicalTreatment {
    /// fungicide | pesticide | fertilizer
    #[serde(deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub treatment_type: Option<String>,

    #[serde(deserialize_with = "lenient_string")]
    pub active_ingredient: String,

    #[serde(deserialize_with = "lenient_string")]
    pub usage_guidance: String,

    #[serde(deserialize_with = "lenient_text_list", skip_serializing_if = "Vec::is_empty")]
    pub precautions: Vec<String>,
}

// =============================================
// 寛容なデシリアライズ
// =============================================

/// 文字列・数値・真偽値をテキストとして扱う（それ以外はNone）
fn value_as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_as_text(Value::deserialize(deserializer)?))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(value_as_text).collect(),
        _ => Vec::new(),
    })
}

/// オブジェクトの場合のみ `Some`
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => T::deserialize(value).ok(),
        _ => None,
    })
}

/// 配列の各要素を個別にデシリアライズし、形の合わない要素は捨てる
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_result_default() {
        let result = AnalysisResult::default();
        assert!(result.plant_name.is_none());
        assert!(result.symptoms.is_empty());
        assert_eq!(result.diagnosis(), Diagnosis::Uncertain);
    }

    #[test]
    fn test_analysis_result_deserialize_full() {
        let json = r#"{
            "diagnosis_status": "confirmed",
            "plant_name": "Tomato",
            "detected_problem": {"name": "Early Blight", "type": "disease", "confidence": 0.91},
            "symptoms": ["Brown spots", "Yellow halo"],
            "cause": "Alternaria solani",
            "natural_remedies": [{
                "title": "Neem Spray",
                "ingredients": ["neem oil", "water"],
                "steps": ["Mix 2% neem oil with water", "Spray weekly"],
                "frequency": "weekly",
                "safety_level": "low"
            }],
            "chemical_treatments": [{
                "treatment_type": "fungicide",
                "active_ingredient": "Chlorothalonil",
                "usage_guidance": "Follow label directions",
                "precautions": ["Wear gloves"]
            }],
            "prevention_tips": ["Rotate crops"],
            "confidence_note": "Clear lesions visible",
            "disclaimer": "This is AI-assisted guidance."
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.diagnosis(), Diagnosis::Confirmed);
        assert_eq!(result.plant_name.as_deref(), Some("Tomato"));

        let problem = result.detected_problem.as_ref().expect("detected_problemがない");
        assert_eq!(problem.name.as_deref(), Some("Early Blight"));
        assert_eq!(problem.kind.as_deref(), Some("disease"));
        assert_eq!(problem.confidence, Some(0.91));

        assert_eq!(result.symptoms.len(), 2);
        assert_eq!(result.natural_remedies[0].steps.len(), 2);
        assert_eq!(result.natural_remedies[0].safety_level.as_deref(), Some("low"));
        assert_eq!(result.chemical_treatments[0].active_ingredient, "Chlorothalonil");
        assert_eq!(result.chemical_treatments[0].precautions, vec!["Wear gloves"]);
        assert_eq!(result.disclaimer.as_deref(), Some("This is AI-assisted guidance."));
    }

    #[test]
    fn test_analysis_result_deserialize_empty_object() {
        let result: AnalysisResult = serde_json::from_str("{}").expect("デシリアライズ失敗");
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_nulls_become_defaults() {
        // サービス側は不明な値をnullで返す
        let json = r#"{
            "plant_name": null,
            "detected_problem": null,
            "symptoms": null,
            "natural_remedies": null,
            "cause": null
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_wrong_types_degrade_per_field() {
        let json = r#"{
            "plant_name": "Basil",
            "detected_problem": "mildew",
            "symptoms": "wilting",
            "prevention_tips": ["Water early", 3, null, {"x": 1}],
            "natural_remedies": [{"title": "Milk Spray"}, "bogus", 42],
            "chemical_treatments": {"active_ingredient": "Sulfur"}
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(result.plant_name.as_deref(), Some("Basil"));
        assert!(result.detected_problem.is_none());
        assert!(result.symptoms.is_empty());
        assert_eq!(result.prevention_tips, vec!["Water early", "3"]);
        assert_eq!(result.natural_remedies.len(), 1);
        assert_eq!(result.natural_remedies[0].title, "Milk Spray");
        assert!(result.natural_remedies[0].ingredients.is_empty());
        assert!(result.chemical_treatments.is_empty());
    }

    #[test]
    fn test_confidence_string_is_ignored() {
        for confidence in [r#""0.5""#, r#""NaN""#, r#""inf""#] {
            let json = format!(
                r#"{{"detected_problem": {{"name": "Rust", "confidence": {}}}}}"#,
                confidence
            );
            let result: AnalysisResult = serde_json::from_str(&json).expect("デシリアライズ失敗");
            let problem = result.detected_problem.expect("問題がない");
            assert_eq!(problem.name, "Rust");
            assert_eq!(problem.confidence, None, "confidence: {}", confidence);
        }
    }

    #[test]
    fn test_diagnosis_is_exact_match() {
        for status in ["Confirmed", "confirmed ", "uncertain", ""] {
            let result = AnalysisResult {
                diagnosis_status: Some(status.to_string()),
                ..Default::default()
            };
            assert_eq!(result.diagnosis(), Diagnosis::Uncertain, "status: {:?}", status);
        }
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let result = AnalysisResult {
            plant_name: Some("Rose".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"plant_name":"Rose"}"#);
    }
}
