//! The problem-to-principle recommendation engine.
//!
//! Couples the static knowledge tables with the matching, scoring and
//! ranking pipeline: detect parameters, resolve the contradiction,
//! expand candidate principle ids into scored solutions. History,
//! favorites and settings live here too, so every surface (CLI, HTTP)
//! shares one state owner instead of ambient globals.

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::i18n::tr;
use crate::knowledge::{self, KnowledgeBase};
use crate::store::Store;
use crate::types::{
    EngineConfig, ExportDocument, ExportFormat, Language, Principle, ProblemCategory,
    ProblemSession, SearchHit, SessionSummary, Solution, UsageStatistics,
};

/// Worsening parameter assumed when detection finds exactly one
/// parameter and the caller supplied none.
const DEFAULT_WORSENING: &str = "complexity";

/// Outcome of the contradiction-resolution step: the filled parameter
/// pair and the candidate principle ids, in priority order.
struct Resolution {
    improving: String,
    worsening: String,
    candidates: Vec<u8>,
}

pub struct TrizEngine {
    knowledge: KnowledgeBase,
    config: EngineConfig,
    history: Vec<ProblemSession>,
    favorites: BTreeSet<u8>,
    store: Option<Store>,
}

impl TrizEngine {
    /// Engine over the built-in knowledge base, no persistence.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_knowledge(KnowledgeBase::builtin(), config)
    }

    /// Engine over caller-supplied tables, no persistence. Used by
    /// tests and embedders that bring their own principle data.
    pub fn with_knowledge(knowledge: KnowledgeBase, config: EngineConfig) -> Self {
        Self {
            knowledge,
            config: config.clamped(),
            history: Vec::new(),
            favorites: BTreeSet::new(),
            store: None,
        }
    }

    /// Engine backed by a store: config, history and favorites are
    /// loaded up front and written back as they change.
    pub fn with_store(store: Store) -> Self {
        let config = store.load_config();
        let history = store.load_history();
        let favorites = store.load_favorites();
        info!(
            "loaded engine state: {} sessions, {} favorites",
            history.len(),
            favorites.len()
        );
        Self {
            knowledge: KnowledgeBase::builtin(),
            config,
            history,
            favorites,
            store: Some(store),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn language(&self) -> Language {
        self.config.language
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn history(&self) -> &[ProblemSession] {
        &self.history
    }

    /// Ordered list of parameter names with a keyword hit in the text.
    /// Order follows the fixed detection table, not text position.
    pub fn detect_parameters(&self, problem: &str) -> Vec<String> {
        let lowered = problem.to_lowercase();
        self.knowledge
            .parameters()
            .iter()
            .filter(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|kw| lowered.contains(&kw.to_lowercase()))
            })
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// First category with a keyword hit, in fixed table order.
    pub fn classify_problem(&self, problem: &str) -> ProblemCategory {
        let lowered = problem.to_lowercase();
        self.knowledge
            .categories()
            .iter()
            .find(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|kw| lowered.contains(&kw.to_lowercase()))
            })
            .map(|entry| entry.category)
            .unwrap_or_default()
    }

    /// The (improving, worsening) pair an analysis of this input would
    /// use, after auto-detection fills any blanks. Exposed so callers
    /// can report which contradiction was actually analyzed.
    pub fn resolve_parameters(&self, problem: &str, improving: &str, worsening: &str) -> (String, String) {
        let resolution = self.resolve(problem, improving, worsening);
        (resolution.improving, resolution.worsening)
    }

    /// Candidate principle ids for this input. Never empty: the matrix
    /// lookup falls back to the reversed pair, then to the classified
    /// category's default list.
    pub fn resolve_principles(&self, problem: &str, improving: &str, worsening: &str) -> Vec<u8> {
        self.resolve(problem, improving, worsening).candidates
    }

    /// Full analysis pipeline: resolve the contradiction, cap the
    /// candidate list at `maxSolutions`, expand the survivors into
    /// scored solutions and rank them. Records a history session when
    /// history is enabled.
    pub fn analyze_problem(&mut self, problem: &str, improving: &str, worsening: &str) -> Vec<Solution> {
        let resolution = self.resolve(problem, improving, worsening);
        debug!(
            "analyzing problem ({} candidates, improving={:?}, worsening={:?})",
            resolution.candidates.len(),
            resolution.improving,
            resolution.worsening
        );

        let mut solutions: Vec<Solution> = resolution
            .candidates
            .iter()
            .take(self.config.max_solutions)
            .filter_map(|id| self.build_solution(*id, problem, &resolution.improving, &resolution.worsening))
            .collect();
        sort_by_combined_score(&mut solutions);

        if self.config.enable_history {
            let session = ProblemSession::new(
                problem.to_string(),
                resolution.improving,
                resolution.worsening,
                solutions.clone(),
            );
            debug!("recorded session {}", session.session_id);
            self.history.push(session);
            if self.config.auto_save {
                self.persist_history();
            }
        }
        solutions
    }

    /// Free-association mode: no parameter pair, candidates come from
    /// the classified category's default list. Every candidate is
    /// scored first; the cut to `num_solutions` happens after ranking.
    /// Brainstorm runs are not recorded in history.
    pub fn brainstorm(&self, problem: &str, num_solutions: Option<usize>) -> Vec<Solution> {
        let count = num_solutions.unwrap_or(self.config.max_solutions);
        let category = self.classify_problem(problem);
        debug!("brainstorming in category {:?}", category);

        let mut solutions: Vec<Solution> = knowledge::category_default_principles(category)
            .iter()
            .filter_map(|id| self.build_solution(*id, problem, "", ""))
            .collect();
        sort_by_combined_score(&mut solutions);
        solutions.truncate(count);
        solutions
    }

    /// Render solutions as a report. `None` uses the configured format;
    /// anything unrecognized has already collapsed to text upstream.
    pub fn export_solutions(&self, solutions: &[Solution], format: Option<ExportFormat>) -> Result<String> {
        let format = format.unwrap_or(self.config.export_format);
        match format {
            ExportFormat::Json => {
                let document = ExportDocument {
                    timestamp: Utc::now().to_rfc3339(),
                    solution_count: solutions.len(),
                    solutions: solutions.to_vec(),
                };
                Ok(serde_json::to_string_pretty(&document)?)
            }
            ExportFormat::Text => Ok(self.render_text_report(solutions)),
        }
    }

    /// Mark a principle as a favorite. Accepts a numeric id or a name
    /// in either language; returns false for anything unknown.
    pub fn add_to_favorites(&mut self, reference: &str) -> bool {
        let Some(id) = self.resolve_principle_reference(reference) else {
            return false;
        };
        self.favorites.insert(id);
        self.persist_favorites();
        true
    }

    pub fn remove_from_favorites(&mut self, reference: &str) -> bool {
        let Some(id) = self.resolve_principle_reference(reference) else {
            return false;
        };
        let removed = self.favorites.remove(&id);
        if removed {
            self.persist_favorites();
        }
        removed
    }

    pub fn is_favorite(&self, id: u8) -> bool {
        self.favorites.contains(&id)
    }

    /// Favorites as (id, display name) pairs, ordered by id.
    pub fn favorites(&self) -> Vec<(u8, String)> {
        let lang = self.config.language;
        self.favorites
            .iter()
            .filter_map(|id| {
                self.knowledge
                    .principle(*id)
                    .map(|p| (p.id, p.name.get(lang).to_string()))
            })
            .collect()
    }

    /// Compact rows for the most recent `limit` sessions, newest first.
    pub fn get_history(&self, limit: usize) -> Vec<SessionSummary> {
        self.history
            .iter()
            .rev()
            .take(limit)
            .map(|session| SessionSummary {
                session_id: session.session_id.clone(),
                problem: session.problem.clone(),
                timestamp: session.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                solution_count: session.solutions.len(),
                user_rating: session.user_rating,
            })
            .collect()
    }

    /// Attach a 1–5 rating to a session. Session ids are short and only
    /// collision-tolerant, so the newest match wins.
    pub fn rate_session(&mut self, session_id: &str, rating: u8) -> bool {
        if !(1..=5).contains(&rating) {
            return false;
        }
        let Some(session) = self
            .history
            .iter_mut()
            .rev()
            .find(|s| s.session_id == session_id)
        else {
            return false;
        };
        session.user_rating = Some(rating);
        if self.config.auto_save {
            self.persist_history();
        }
        true
    }

    pub fn get_statistics(&self) -> UsageStatistics {
        let ratings: Vec<u8> = self.history.iter().filter_map(|s| s.user_rating).collect();
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().map(|r| *r as f64).sum::<f64>() / ratings.len() as f64
        };
        UsageStatistics {
            total_sessions: self.history.len(),
            rated_sessions: ratings.len(),
            average_rating,
            favorites_count: self.favorites.len(),
        }
    }

    /// Substring search across names, descriptions, keywords and
    /// examples in both languages, scored and sorted descending.
    pub fn search_principles(&self, query: &str) -> Vec<SearchHit> {
        let lang = self.config.language;
        let lowered = query.trim().to_lowercase();
        if lowered.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for principle in self.knowledge.principles() {
            let mut score = 0.0;
            if principle.name.zh.to_lowercase().contains(&lowered)
                || principle.name.en.to_lowercase().contains(&lowered)
            {
                score += 1.0;
            }
            if principle.description.zh.to_lowercase().contains(&lowered)
                || principle.description.en.to_lowercase().contains(&lowered)
            {
                score += 0.5;
            }
            for keyword in &principle.keywords {
                let kw = keyword.to_lowercase();
                if kw.contains(&lowered) || lowered.contains(&kw) {
                    score += 0.3;
                }
            }
            for example in &principle.examples {
                if example.zh.to_lowercase().contains(&lowered)
                    || example.en.to_lowercase().contains(&lowered)
                {
                    score += 0.2;
                }
            }
            if score > 0.0 {
                hits.push(SearchHit {
                    id: principle.id,
                    name: principle.name.get(lang).to_string(),
                    description: principle.description.get(lang).to_string(),
                    category: principle.category.label().get(lang).to_string(),
                    relevance: score,
                });
            }
        }
        hits.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }

    /// Flip between the two supported languages and persist the choice.
    pub fn toggle_language(&mut self) -> Language {
        self.config.language = match self.config.language {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        };
        self.persist_config();
        self.config.language
    }

    /// Transient language override; not written back to the store.
    pub fn set_language(&mut self, lang: Language) {
        self.config.language = lang;
    }

    pub fn set_max_solutions(&mut self, count: usize) {
        self.config.max_solutions = count.clamp(1, 10);
        self.persist_config();
    }

    pub fn set_enable_history(&mut self, enabled: bool) {
        self.config.enable_history = enabled;
        self.persist_config();
    }

    fn resolve(&self, problem: &str, improving: &str, worsening: &str) -> Resolution {
        let mut improving = if improving.trim().is_empty() {
            String::new()
        } else {
            knowledge::canonical_parameter(improving)
        };
        let mut worsening = if worsening.trim().is_empty() {
            String::new()
        } else {
            knowledge::canonical_parameter(worsening)
        };

        if improving.is_empty() || worsening.is_empty() {
            let detected = self.detect_parameters(problem);
            if detected.len() >= 2 {
                if improving.is_empty() {
                    improving = detected[0].clone();
                }
                if worsening.is_empty() {
                    worsening = detected[1].clone();
                }
            } else if detected.len() == 1 {
                if improving.is_empty() {
                    improving = detected[0].clone();
                } else if worsening.is_empty() {
                    worsening = detected[0].clone();
                }
                if worsening.is_empty() {
                    worsening = DEFAULT_WORSENING.to_string();
                }
            }
        }

        let candidates = self.lookup_candidates(problem, &improving, &worsening);
        Resolution {
            improving,
            worsening,
            candidates,
        }
    }

    fn lookup_candidates(&self, problem: &str, improving: &str, worsening: &str) -> Vec<u8> {
        if let Some(ids) = self.knowledge.matrix_lookup(improving, worsening) {
            return ids.to_vec();
        }
        // Matrix rows are directional; the reversed pair is a fallback,
        // not an equivalent key.
        if let Some(ids) = self.knowledge.matrix_lookup(worsening, improving) {
            return ids.to_vec();
        }
        let category = self.classify_problem(problem);
        knowledge::category_default_principles(category).to_vec()
    }

    fn build_solution(&self, id: u8, problem: &str, improving: &str, worsening: &str) -> Option<Solution> {
        let principle = self.knowledge.principle(id)?;
        let lang = self.config.language;
        let lowered = problem.to_lowercase();
        Some(Solution {
            principle_name: principle.name.get(lang).to_string(),
            principle_id: principle.id,
            description: self.generate_description(principle, problem, improving, worsening),
            detailed_explanation: principle.detailed_explanation.get(lang).to_string(),
            examples: principle
                .examples
                .iter()
                .map(|ex| ex.get(lang).to_string())
                .collect(),
            confidence: calculate_confidence(principle, &lowered, improving, worsening),
            relevance_score: calculate_relevance(principle, &lowered),
            category: principle.category.label().get(lang).to_string(),
            tags: principle.keywords.iter().take(3).cloned().collect(),
        })
    }

    fn generate_description(&self, principle: &Principle, problem: &str, improving: &str, worsening: &str) -> String {
        let lang = self.config.language;
        let improving_disp = knowledge::parameter_display(improving, lang);
        let worsening_disp = knowledge::parameter_display(worsening, lang);
        let lowered = problem.to_lowercase();
        let software_flavor = problem.contains("软件")
            || problem.contains("系统")
            || lowered.contains("software")
            || lowered.contains("system");

        if software_flavor && principle.id == 1 {
            return match lang {
                Language::Zh => format!(
                    "将{problem}进行模块化拆分，每个模块专注于特定功能，降低{worsening_disp}同时提升{improving_disp}"
                ),
                Language::En => format!(
                    "Break {problem} into focused modules, each owning a single concern, cutting {worsening_disp} while improving {improving_disp}"
                ),
            };
        }
        if software_flavor && principle.id == 15 {
            return match lang {
                Language::Zh => format!(
                    "为{problem}添加自适应机制，根据实际需求动态调整，平衡{improving_disp}和{worsening_disp}"
                ),
                Language::En => format!(
                    "Give {problem} an adaptive mechanism that adjusts to actual demand, balancing {improving_disp} and {worsening_disp}"
                ),
            };
        }
        match lang {
            Language::Zh => format!(
                "运用{}原理（{}）来解决{problem}，重点改善{improving_disp}与{worsening_disp}的平衡",
                principle.name.zh, principle.description.zh
            ),
            Language::En => format!(
                "Apply the {} principle ({}) to {problem}, focusing on the balance between {improving_disp} and {worsening_disp}",
                principle.name.en, principle.description.en
            ),
        }
    }

    fn render_text_report(&self, solutions: &[Solution]) -> String {
        let lang = self.config.language;
        let mut lines = Vec::new();
        lines.push(tr(lang, "export_title").to_string());
        lines.push("=".repeat(50));
        lines.push(format!(
            "{} {}",
            tr(lang, "export_generated"),
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        ));
        lines.push(format!("{} {}", tr(lang, "export_count"), solutions.len()));
        lines.push(String::new());
        for (i, solution) in solutions.iter().enumerate() {
            lines.push(format!(
                "{} {}: {}",
                tr(lang, "export_solution"),
                i + 1,
                solution.principle_name
            ));
            lines.push(format!("{} {}", tr(lang, "export_description"), solution.description));
            lines.push(format!(
                "{} {:.1}%",
                tr(lang, "export_confidence"),
                solution.confidence * 100.0
            ));
            lines.push(format!(
                "{} {:.1}%",
                tr(lang, "export_relevance"),
                solution.relevance_score * 100.0
            ));
            lines.push(format!(
                "{} {}",
                tr(lang, "export_examples"),
                solution.examples.join(", ")
            ));
            lines.push("-".repeat(30));
        }
        lines.join("\n")
    }

    fn resolve_principle_reference(&self, reference: &str) -> Option<u8> {
        let trimmed = reference.trim();
        if let Ok(id) = trimmed.parse::<u8>() {
            return self.knowledge.principle(id).map(|p| p.id);
        }
        let lowered = trimmed.to_lowercase();
        self.knowledge
            .principles()
            .iter()
            .find(|p| p.name.zh == trimmed || p.name.en.to_lowercase() == lowered)
            .map(|p| p.id)
    }

    fn persist_history(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save_history(&self.history) {
                warn!("failed to save history: {err:#}");
            }
        }
    }

    fn persist_favorites(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save_favorites(&self.favorites) {
                warn!("failed to save favorites: {err:#}");
            }
        }
    }

    fn persist_config(&self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save_config(&self.config) {
                warn!("failed to save config: {err:#}");
            }
        }
    }
}

/// Descending by combined score; stable, so equal scores keep their
/// candidate order.
fn sort_by_combined_score(solutions: &mut [Solution]) {
    solutions.sort_by(|a, b| {
        b.combined_score()
            .partial_cmp(&a.combined_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn calculate_confidence(principle: &Principle, lowered_problem: &str, improving: &str, worsening: &str) -> f64 {
    let keyword_hits = principle
        .keywords
        .iter()
        .filter(|kw| lowered_problem.contains(&kw.to_lowercase()))
        .count();
    let keyword_bonus = (0.1 * keyword_hits as f64).min(0.3);

    // Deliberately loose: the parameter is matched as a substring of
    // the debug rendering of the keyword list, not as a member of it.
    let rendered = format!("{:?}", principle.keywords).to_lowercase();
    let param_bonus = if (!improving.is_empty() && rendered.contains(improving))
        || (!worsening.is_empty() && rendered.contains(worsening))
    {
        0.1
    } else {
        0.0
    };

    (0.6 + keyword_bonus + param_bonus).min(0.95)
}

fn calculate_relevance(principle: &Principle, lowered_problem: &str) -> f64 {
    let keyword_hits = principle
        .keywords
        .iter()
        .filter(|kw| lowered_problem.contains(&kw.to_lowercase()))
        .count();
    let example_hits = principle
        .examples
        .iter()
        .filter(|example| {
            [example.zh.as_str(), example.en.as_str()].iter().any(|text| {
                let lowered = text.to_lowercase();
                lowered
                    .split_whitespace()
                    .any(|word| lowered_problem.contains(word))
            })
        })
        .count();
    (keyword_hits as f64 * 0.2 + example_hits as f64 * 0.1).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{CategoryKeywords, MatrixEntry, ParameterKeywords};
    use crate::types::LocalizedText;
    use crate::types::PrincipleCategory;

    fn setup_engine() -> TrizEngine {
        TrizEngine::new(EngineConfig::default())
    }

    fn setup_engine_with(config: EngineConfig) -> TrizEngine {
        TrizEngine::new(config)
    }

    fn minimal_principle(id: u8, zh: &str, en: &str) -> Principle {
        Principle {
            id,
            name: LocalizedText::new(zh, en),
            description: LocalizedText::new("描述", "description"),
            detailed_explanation: LocalizedText::new("详情", "details"),
            examples: vec![LocalizedText::new("示例", "example")],
            category: PrincipleCategory::Structure,
            keywords: vec!["kw".to_string()],
        }
    }

    #[test]
    fn resolver_always_returns_candidates() {
        let engine = setup_engine();
        let ids = engine.resolve_principles("", "", "");
        assert_eq!(ids, vec![1, 2, 15, 27, 35]);
    }

    #[test]
    fn detection_reports_parameters_in_table_order() {
        let engine = setup_engine();
        // strength keyword appears first in the text; weight still
        // comes first because the detection table drives the order
        let detected = engine.detect_parameters("强度不够而且重量太大");
        assert_eq!(detected, vec!["weight".to_string(), "strength".to_string()]);
    }

    #[test]
    fn classification_first_match_wins() {
        let engine = setup_engine();
        // matches both Technical (系统) and Design (设计, 布局)
        assert_eq!(engine.classify_problem("设计系统的布局"), ProblemCategory::Technical);
        assert_eq!(engine.classify_problem("外观造型不够好"), ProblemCategory::Design);
        assert_eq!(engine.classify_problem("qqq zzz"), ProblemCategory::General);
    }

    #[test]
    fn single_detected_parameter_defaults_the_worsening_side() {
        let engine = setup_engine();
        let (improving, worsening) = engine.resolve_parameters("减轻产品重量", "", "");
        assert_eq!(improving, "weight");
        assert_eq!(worsening, "complexity");
    }

    #[test]
    fn supplied_parameters_are_canonicalized() {
        let engine = setup_engine();
        let (improving, worsening) = engine.resolve_parameters("", "重量", "强度");
        assert_eq!(improving, "weight");
        assert_eq!(worsening, "strength");
        let ids = engine.resolve_principles("", "重量", "强度");
        assert_eq!(ids, vec![1, 8, 15, 40]);
    }

    #[test]
    fn weight_strength_problem_uses_the_matrix_row() {
        let mut engine = setup_engine();
        let solutions = engine.analyze_problem("设备重量太大但强度必须保持", "", "");
        assert_eq!(solutions.len(), 4);
        for solution in &solutions {
            assert!([1u8, 8, 15, 40].contains(&solution.principle_id));
        }
        for pair in solutions.windows(2) {
            assert!(pair[0].combined_score() >= pair[1].combined_score());
        }
    }

    #[test]
    fn analyze_caps_candidates_before_scoring() {
        let config = EngineConfig {
            max_solutions: 2,
            ..EngineConfig::default()
        };
        let mut engine = setup_engine_with(config);
        let solutions = engine.analyze_problem("设备重量太大但强度必须保持", "", "");
        // matrix row is [1, 8, 15, 40]; the cap keeps the first two ids
        // rather than the two best-scoring ones
        let mut ids: Vec<u8> = solutions.iter().map(|s| s.principle_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 8]);
    }

    #[test]
    fn zero_match_problem_scores_base_confidence_exactly() {
        let mut engine = setup_engine();
        let solutions = engine.analyze_problem("qqq zzz", "", "");
        assert_eq!(solutions.len(), 5);
        let mut ids: Vec<u8> = solutions.iter().map(|s| s.principle_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 15, 27, 35]);
        for solution in &solutions {
            assert_eq!(solution.confidence, 0.6);
            assert_eq!(solution.relevance_score, 0.0);
        }
    }

    #[test]
    fn confidence_and_relevance_hit_their_caps() {
        let mut engine = setup_engine();
        // five keyword hits for principle 1 plus a parameter bonus
        let solutions = engine.analyze_problem("模块 组件 分离 独立 拆分", "independent", "");
        let segmentation = solutions
            .iter()
            .find(|s| s.principle_id == 1)
            .unwrap();
        assert_eq!(segmentation.confidence, 0.95);
        assert_eq!(segmentation.relevance_score, 1.0);
    }

    #[test]
    fn param_bonus_matches_inside_rendered_keyword_list() {
        let mut engine = setup_engine();
        let solutions = engine.analyze_problem("重量必须减轻但强度不能降低", "", "");
        // principle 8 carries a "weight" keyword, so the improving
        // parameter lands the 0.1 bonus; principle 1 does not
        let counterweight = solutions.iter().find(|s| s.principle_id == 8).unwrap();
        let segmentation = solutions.iter().find(|s| s.principle_id == 1).unwrap();
        assert!((counterweight.confidence - 0.7).abs() < 1e-9);
        assert_eq!(segmentation.confidence, 0.6);
        assert_eq!(solutions[0].principle_id, 8);
    }

    #[test]
    fn analysis_is_idempotent() {
        let mut engine = setup_engine();
        let first = engine.analyze_problem("软件系统太复杂", "", "");
        let second = engine.analyze_problem("软件系统太复杂", "", "");
        let ids = |list: &[Solution]| list.iter().map(|s| s.principle_id).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.confidence, b.confidence);
            assert_eq!(a.relevance_score, b.relevance_score);
        }
    }

    #[test]
    fn reversed_matrix_pair_is_a_fallback() {
        let knowledge = KnowledgeBase::new(
            vec![minimal_principle(1, "一", "One"), minimal_principle(2, "二", "Two")],
            vec![MatrixEntry::new("a", "b", &[1, 2])],
            Vec::<ParameterKeywords>::new(),
            Vec::<CategoryKeywords>::new(),
        );
        let engine = TrizEngine::with_knowledge(knowledge, EngineConfig::default());
        assert_eq!(engine.resolve_principles("", "a", "b"), vec![1, 2]);
        assert_eq!(engine.resolve_principles("", "b", "a"), vec![1, 2]);
    }

    #[test]
    fn direct_matrix_entry_beats_the_reversed_one() {
        let engine = setup_engine();
        assert_eq!(engine.resolve_principles("", "weight", "strength"), vec![1, 8, 15, 40]);
        assert_eq!(engine.resolve_principles("", "strength", "weight"), vec![1, 8, 36, 40]);
    }

    #[test]
    fn missing_principles_are_skipped_not_errors() {
        let knowledge = KnowledgeBase::new(
            vec![minimal_principle(1, "一", "One")],
            vec![MatrixEntry::new("a", "b", &[1, 7, 9])],
            Vec::<ParameterKeywords>::new(),
            Vec::<CategoryKeywords>::new(),
        );
        let mut engine = TrizEngine::with_knowledge(knowledge, EngineConfig::default());
        let solutions = engine.analyze_problem("anything", "a", "b");
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].principle_id, 1);
    }

    #[test]
    fn brainstorm_returns_requested_count_with_empty_params() {
        let engine = setup_engine();
        let solutions = engine.brainstorm("some problem", Some(3));
        assert_eq!(solutions.len(), 3);
        for solution in &solutions {
            assert!(solution.description.contains("some problem"));
        }
    }

    #[test]
    fn brainstorm_scores_all_candidates_before_truncating() {
        let engine = setup_engine();
        // principle 27 sits fourth in the General default list but
        // outscores the rest; a post-ranking cut must surface it
        let solutions = engine.brainstorm("swap it for a cheap replacement version", Some(1));
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].principle_id, 27);
    }

    #[test]
    fn brainstorm_records_no_history() {
        let engine = setup_engine();
        let _ = engine.brainstorm("some problem", None);
        assert_eq!(engine.get_statistics().total_sessions, 0);
    }

    #[test]
    fn analyze_records_history_when_enabled() {
        let mut engine = setup_engine();
        engine.analyze_problem("设备重量太大但强度必须保持", "", "");
        assert_eq!(engine.history().len(), 1);
        let session = &engine.history()[0];
        assert_eq!(session.improving_param, "weight");
        assert_eq!(session.worsening_param, "strength");
        assert_eq!(session.solutions.len(), 4);

        let rows = engine.get_history(10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].solution_count, 4);
        assert_eq!(rows[0].timestamp.len(), "2026-01-01 00:00".len());
    }

    #[test]
    fn disabled_history_records_nothing() {
        let config = EngineConfig {
            enable_history: false,
            ..EngineConfig::default()
        };
        let mut engine = setup_engine_with(config);
        engine.analyze_problem("设备重量太大", "", "");
        assert!(engine.history().is_empty());
    }

    #[test]
    fn history_rows_come_back_newest_first() {
        let mut engine = setup_engine();
        engine.analyze_problem("first problem about weight 重量", "", "");
        engine.analyze_problem("second problem about cost 成本", "", "");
        let rows = engine.get_history(1);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].problem.starts_with("second"));
    }

    #[test]
    fn rating_flow_updates_statistics() {
        let mut engine = setup_engine();
        engine.analyze_problem("重量 vs 强度", "", "");
        let session_id = engine.history()[0].session_id.clone();

        assert!(!engine.rate_session(&session_id, 0));
        assert!(!engine.rate_session(&session_id, 6));
        assert!(!engine.rate_session("nope1234", 4));
        assert!(engine.rate_session(&session_id, 4));

        let stats = engine.get_statistics();
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.rated_sessions, 1);
        assert!((stats.average_rating - 4.0).abs() < 1e-9);
    }

    #[test]
    fn favorites_are_keyed_by_id_across_languages() {
        let mut engine = setup_engine();
        assert!(engine.add_to_favorites("分割"));
        assert!(engine.add_to_favorites("Segmentation"));
        assert_eq!(engine.favorites().len(), 1);
        assert!(engine.is_favorite(1));

        assert!(engine.add_to_favorites("3"));
        assert_eq!(engine.favorites().len(), 2);
        assert!(!engine.add_to_favorites("41"));
        assert!(!engine.add_to_favorites("no-such-principle"));

        assert!(engine.remove_from_favorites("1"));
        assert!(!engine.remove_from_favorites("1"));
        assert_eq!(engine.favorites(), vec![(3, "Local quality".to_string())]);
    }

    #[test]
    fn export_json_round_trips() {
        let mut engine = setup_engine();
        let solutions = engine.analyze_problem("设备重量太大但强度必须保持", "", "");
        let exported = engine
            .export_solutions(&solutions, Some(ExportFormat::Json))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(value["solutionCount"], solutions.len());
        let exported_ids: Vec<u8> = value["solutions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["principleId"].as_u64().unwrap() as u8)
            .collect();
        let input_ids: Vec<u8> = solutions.iter().map(|s| s.principle_id).collect();
        assert_eq!(exported_ids, input_ids);
    }

    #[test]
    fn export_text_report_is_localized() {
        let mut engine = setup_engine();
        let solutions = engine.analyze_problem("qqq zzz", "", "");
        let report = engine
            .export_solutions(&solutions, Some(ExportFormat::Text))
            .unwrap();
        assert!(report.contains("TRIZ Innovation Solutions Report"));
        assert!(report.contains("Solution 1:"));
        assert!(report.contains("Confidence: 60.0%"));

        let config = EngineConfig {
            language: Language::Zh,
            ..EngineConfig::default()
        };
        let mut zh_engine = setup_engine_with(config);
        let zh_solutions = zh_engine.analyze_problem("qqq zzz", "", "");
        let zh_report = zh_engine
            .export_solutions(&zh_solutions, Some(ExportFormat::Text))
            .unwrap();
        assert!(zh_report.contains("TRIZ创新解决方案报告"));
        assert!(zh_report.contains("方案 1:"));
        assert!(zh_report.contains("置信度: 60.0%"));
    }

    #[test]
    fn export_default_format_comes_from_config() {
        let mut engine = setup_engine();
        let solutions = engine.analyze_problem("qqq zzz", "", "");
        let exported = engine.export_solutions(&solutions, None).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&exported).is_ok());
    }

    #[test]
    fn search_matches_both_languages() {
        let engine = setup_engine();
        let hits = engine.search_principles("模块");
        assert!(!hits.is_empty());
        assert_eq!(hits[0].id, 1);

        let hits = engine.search_principles("feedback");
        assert!(hits.iter().any(|h| h.id == 23));

        assert!(engine.search_principles("zzzzzz").is_empty());
        assert!(engine.search_principles("   ").is_empty());
    }

    #[test]
    fn language_toggle_localizes_output() {
        let mut engine = setup_engine();
        let en = engine.analyze_problem("software system too complex", "", "");
        assert!(en.iter().any(|s| s.principle_name == "Segmentation"));

        assert_eq!(engine.toggle_language(), Language::Zh);
        let zh = engine.analyze_problem("software system too complex", "", "");
        assert!(zh.iter().any(|s| s.principle_name == "分割"));
        assert!(zh[0].description.contains("复杂性") || zh[0].description.contains("解决"));
    }

    #[test]
    fn config_is_clamped_on_construction() {
        let config = EngineConfig {
            max_solutions: 99,
            ..EngineConfig::default()
        };
        let engine = setup_engine_with(config);
        assert_eq!(engine.config().max_solutions, 10);
    }
}
