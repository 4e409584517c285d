//! Core types for the TRIZ innovation advisor
//!
//! The data model follows the classical TRIZ toolkit:
//! - 40 invention principles as the unit of recommendation
//! - A contradiction matrix keyed by competing technical parameters
//! - Scored solutions produced fresh for every analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output language for localized text and generated descriptions.
///
/// Always threaded explicitly (engine config or per-call argument),
/// never process-global.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// "zh" selects Chinese; anything else is English.
    pub fn parse_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("zh") {
            Language::Zh
        } else {
            Language::En
        }
    }
}

/// A zh/en translation pair. Every localized field on a knowledge
/// record resolves through [`LocalizedText::get`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedText {
    pub zh: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(zh: &str, en: &str) -> Self {
        Self {
            zh: zh.to_string(),
            en: en.to_string(),
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::Zh => &self.zh,
            Language::En => &self.en,
        }
    }
}

/// Optimization category a principle belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrincipleCategory {
    Structure,
    Function,
    Cost,
    Adaptability,
    State,
    Material,
    Automation,
    Process,
}

impl PrincipleCategory {
    pub fn label(&self) -> LocalizedText {
        match self {
            PrincipleCategory::Structure => LocalizedText::new("结构优化", "Structure optimization"),
            PrincipleCategory::Function => LocalizedText::new("功能优化", "Function optimization"),
            PrincipleCategory::Cost => LocalizedText::new("成本优化", "Cost optimization"),
            PrincipleCategory::Adaptability => {
                LocalizedText::new("适应性优化", "Adaptability optimization")
            }
            PrincipleCategory::State => LocalizedText::new("状态优化", "State optimization"),
            PrincipleCategory::Material => LocalizedText::new("材料优化", "Material optimization"),
            PrincipleCategory::Automation => {
                LocalizedText::new("自动化优化", "Automation optimization")
            }
            PrincipleCategory::Process => LocalizedText::new("过程优化", "Process optimization"),
        }
    }
}

/// One of the 40 invention principles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principle {
    /// 1..=40, unique, the join key for matrix and category tables
    pub id: u8,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub detailed_explanation: LocalizedText,
    pub examples: Vec<LocalizedText>,
    pub category: PrincipleCategory,
    /// Matching tokens, deliberately not localized: matched as raw
    /// substrings against the problem text in whatever script it uses
    pub keywords: Vec<String>,
}

/// Problem category assigned by the keyword classifier
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProblemCategory {
    Technical,
    Design,
    Cost,
    User,
    Quality,
    #[default]
    General,
}

impl ProblemCategory {
    pub fn label(&self) -> LocalizedText {
        match self {
            ProblemCategory::Technical => LocalizedText::new("技术问题", "Technical Problem"),
            ProblemCategory::Design => LocalizedText::new("设计问题", "Design Problem"),
            ProblemCategory::Cost => LocalizedText::new("成本问题", "Cost Problem"),
            ProblemCategory::User => LocalizedText::new("用户问题", "User Problem"),
            ProblemCategory::Quality => LocalizedText::new("质量问题", "Quality Problem"),
            ProblemCategory::General => LocalizedText::new("通用问题", "General Problem"),
        }
    }
}

/// One scored recommendation, produced fresh per analysis call.
///
/// Serializes with the exact camelCase field names the export and web
/// layers expose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub principle_name: String,
    pub principle_id: u8,
    pub description: String,
    pub detailed_explanation: String,
    pub examples: Vec<String>,
    /// Heuristic match confidence, clamped to [0.6, 0.95]
    pub confidence: f64,
    /// Topical overlap score, clamped to [0.0, 1.0]
    pub relevance_score: f64,
    pub category: String,
    /// First 3 keywords of the source principle
    pub tags: Vec<String>,
}

impl Solution {
    /// Ranking key used everywhere a solution list is sorted
    pub fn combined_score(&self) -> f64 {
        (self.confidence + self.relevance_score) / 2.0
    }
}

/// A historical record of one analysis invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSession {
    pub session_id: String,
    pub problem: String,
    pub improving_param: String,
    pub worsening_param: String,
    pub solutions: Vec<Solution>,
    pub timestamp: DateTime<Utc>,
    /// 1..=5, set later through the rating flow
    pub user_rating: Option<u8>,
    #[serde(default)]
    pub notes: String,
}

impl ProblemSession {
    pub fn new(
        problem: String,
        improving_param: String,
        worsening_param: String,
        solutions: Vec<Solution>,
    ) -> Self {
        Self {
            session_id: short_session_id(),
            problem,
            improving_param,
            worsening_param,
            solutions,
            timestamp: Utc::now(),
            user_rating: None,
            notes: String::new(),
        }
    }
}

/// Short display identifier for a session. Collision-tolerant: these
/// are never used as a primary key, only for history display and the
/// rating flow.
pub fn short_session_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..8].to_string()
}

/// Compact history row for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub problem: String,
    pub timestamp: String,
    pub solution_count: usize,
    pub user_rating: Option<u8>,
}

/// Aggregate usage counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatistics {
    pub total_sessions: usize,
    pub rated_sessions: usize,
    pub average_rating: f64,
    pub favorites_count: usize,
}

/// One principle-search result with its match score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: u8,
    pub name: String,
    pub description: String,
    pub category: String,
    pub relevance: f64,
}

/// Export/report format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Text,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "text",
        }
    }

    /// "json" selects JSON; every other value falls back to text
    pub fn parse_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") {
            ExportFormat::Json
        } else {
            ExportFormat::Text
        }
    }
}

/// Envelope produced by JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub timestamp: String,
    pub solution_count: usize,
    pub solutions: Vec<Solution>,
}

/// Engine configuration, persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Cap on returned solutions, valid range 1..=10
    pub max_solutions: usize,
    pub enable_history: bool,
    pub auto_save: bool,
    pub export_format: ExportFormat,
    pub language: Language,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_solutions: 5,
            enable_history: true,
            auto_save: true,
            export_format: ExportFormat::Json,
            language: Language::En,
        }
    }
}

impl EngineConfig {
    /// Force `max_solutions` back into its valid range; values loaded
    /// from disk pass through here
    pub fn clamped(mut self) -> Self {
        self.max_solutions = self.max_solutions.clamp(1, 10);
        self
    }
}

/// Result of an LLM parameter-extraction call. `success: false` means
/// the reply was absent or unparseable and the fields carry no signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterExtraction {
    pub improving_param: String,
    pub worsening_param: String,
    pub enhanced_description: String,
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solution_serializes_with_camel_case_fields() {
        let solution = Solution {
            principle_name: "Segmentation".to_string(),
            principle_id: 1,
            description: "Divide the system".to_string(),
            detailed_explanation: "Split into independent parts".to_string(),
            examples: vec!["Modular furniture".to_string()],
            confidence: 0.8,
            relevance_score: 0.4,
            category: "Structure optimization".to_string(),
            tags: vec!["split".to_string()],
        };
        let json = serde_json::to_value(&solution).unwrap();
        assert!(json.get("principleName").is_some());
        assert!(json.get("principleId").is_some());
        assert!(json.get("detailedExplanation").is_some());
        assert!(json.get("relevanceScore").is_some());
        assert!(json.get("principle_name").is_none());
    }

    #[test]
    fn config_defaults_match_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.max_solutions, 5);
        assert!(config.enable_history);
        assert!(config.auto_save);
        assert_eq!(config.export_format, ExportFormat::Json);
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn config_clamps_max_solutions_into_range() {
        let mut config = EngineConfig::default();
        config.max_solutions = 0;
        assert_eq!(config.clamped().max_solutions, 1);
        let mut config = EngineConfig::default();
        config.max_solutions = 99;
        assert_eq!(config.clamped().max_solutions, 10);
    }

    #[test]
    fn localized_text_resolves_per_language() {
        let text = LocalizedText::new("分割", "Segmentation");
        assert_eq!(text.get(Language::Zh), "分割");
        assert_eq!(text.get(Language::En), "Segmentation");
    }

    #[test]
    fn export_format_falls_back_to_text() {
        assert_eq!(ExportFormat::parse_lossy("json"), ExportFormat::Json);
        assert_eq!(ExportFormat::parse_lossy("JSON"), ExportFormat::Json);
        assert_eq!(ExportFormat::parse_lossy("yaml"), ExportFormat::Text);
        assert_eq!(ExportFormat::parse_lossy(""), ExportFormat::Text);
    }

    #[test]
    fn session_ids_are_short_hex() {
        let id = short_session_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn combined_score_averages_both_axes() {
        let solution = Solution {
            principle_name: String::new(),
            principle_id: 1,
            description: String::new(),
            detailed_explanation: String::new(),
            examples: vec![],
            confidence: 0.9,
            relevance_score: 0.5,
            category: String::new(),
            tags: vec![],
        };
        assert!((solution.combined_score() - 0.7).abs() < f64::EPSILON);
    }
}
