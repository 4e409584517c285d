//! Request and response shapes for the JSON API, plus the handler
//! behind each route.
//!
//! The socket loop in main.rs owns framing and routing; handlers here
//! translate between wire shapes and engine calls.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::engine::TrizEngine;
use crate::i18n::tr;
use crate::types::Solution;

/// Error carried back to the socket loop as a status code plus a
/// `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: 400,
            message: message.to_string(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            status: 404,
            message: message.to_string(),
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            status: 500,
            message: message.to_string(),
        }
    }

    pub fn body(&self) -> Value {
        json!({ "error": self.message })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub problem: String,
    pub improving: String,
    pub worsening: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub problem: String,
    pub improving_param: String,
    pub worsening_param: String,
    pub solutions: Vec<Solution>,
    pub timestamp: String,
    pub solution_count: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrainstormRequest {
    pub problem: String,
    #[serde(alias = "num_solutions")]
    pub num_solutions: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrainstormResponse {
    pub problem: String,
    pub solutions: Vec<Solution>,
    pub timestamp: String,
    pub solution_count: usize,
    pub mode: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub principle_id: u8,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FavoriteRequest {
    pub principle: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/analyze. Reports the contradiction the engine actually
/// analyzed, not the raw request hints.
pub fn analyze(engine: &mut TrizEngine, req: AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
    if req.problem.trim().is_empty() {
        return Err(ApiError::bad_request(tr(engine.language(), "api_empty_problem")));
    }

    let (improving_param, worsening_param) =
        engine.resolve_parameters(&req.problem, &req.improving, &req.worsening);
    let solutions = engine.analyze_problem(&req.problem, &req.improving, &req.worsening);
    let solution_count = solutions.len();

    Ok(AnalyzeResponse {
        problem: req.problem,
        improving_param,
        worsening_param,
        solutions,
        timestamp: Utc::now().to_rfc3339(),
        solution_count,
    })
}

/// POST /api/brainstorm.
pub fn brainstorm(
    engine: &TrizEngine,
    req: BrainstormRequest,
) -> Result<BrainstormResponse, ApiError> {
    if req.problem.trim().is_empty() {
        return Err(ApiError::bad_request(tr(engine.language(), "api_empty_problem")));
    }

    let solutions = engine.brainstorm(&req.problem, req.num_solutions);
    let solution_count = solutions.len();

    Ok(BrainstormResponse {
        problem: req.problem,
        solutions,
        timestamp: Utc::now().to_rfc3339(),
        solution_count,
        mode: "brainstorm",
    })
}

/// GET /api/health.
pub fn health() -> HealthResponse {
    HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// GET /api/favorites.
pub fn list_favorites(engine: &TrizEngine) -> FavoritesResponse {
    let favorites = engine
        .favorites()
        .into_iter()
        .map(|(principle_id, name)| FavoriteEntry { principle_id, name })
        .collect();
    FavoritesResponse { favorites }
}

/// POST /api/favorites. `principle` may be a numeric id or a name in
/// either language.
pub fn add_favorite(
    engine: &mut TrizEngine,
    req: FavoriteRequest,
) -> Result<MessageResponse, ApiError> {
    let lang = engine.language();
    let reference = req.principle.trim();
    if reference.is_empty() {
        return Err(ApiError::bad_request(tr(lang, "api_empty_principle")));
    }
    if !engine.add_to_favorites(reference) {
        return Err(ApiError::not_found(tr(lang, "msg_not_found")));
    }
    Ok(MessageResponse {
        message: format!("{}: {}", tr(lang, "msg_added_favorite"), reference),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EngineConfig, Language};

    fn setup_engine() -> TrizEngine {
        TrizEngine::new(EngineConfig::default())
    }

    #[test]
    fn analyze_rejects_blank_problems_in_the_engine_language() {
        let mut engine = setup_engine();
        let err = analyze(&mut engine, AnalyzeRequest::default()).unwrap_err();
        assert_eq!(err.status, 400);
        assert_eq!(err.message, "Problem description must not be empty");

        engine.set_language(Language::Zh);
        let req = AnalyzeRequest {
            problem: "   ".to_string(),
            ..Default::default()
        };
        let err = analyze(&mut engine, req).unwrap_err();
        assert_eq!(err.status, 400);
        assert_eq!(err.message, "问题描述不能为空");
        assert_eq!(err.body(), json!({ "error": "问题描述不能为空" }));
    }

    #[test]
    fn analyze_echoes_the_resolved_contradiction() {
        let mut engine = setup_engine();
        let req = AnalyzeRequest {
            problem: "设备重量太大但强度必须保持".to_string(),
            ..Default::default()
        };
        let resp = analyze(&mut engine, req).unwrap();

        assert_eq!(resp.improving_param, "weight");
        assert_eq!(resp.worsening_param, "strength");
        assert_eq!(resp.solution_count, resp.solutions.len());
        assert!(resp.solution_count > 0);

        let value = serde_json::to_value(&resp).unwrap();
        assert!(value.get("improvingParam").is_some());
        assert!(value.get("solutionCount").is_some());
        assert!(value["solutions"][0].get("principleId").is_some());
    }

    #[test]
    fn brainstorm_tags_its_mode() {
        let engine = setup_engine();
        let req = BrainstormRequest {
            problem: "make the assembly line cheaper".to_string(),
            num_solutions: Some(3),
        };
        let resp = brainstorm(&engine, req).unwrap();

        assert_eq!(resp.mode, "brainstorm");
        assert_eq!(resp.solutions.len(), 3);
        assert_eq!(resp.solution_count, 3);
    }

    #[test]
    fn brainstorm_request_accepts_both_key_spellings() {
        let snake: BrainstormRequest =
            serde_json::from_value(json!({ "problem": "x", "num_solutions": 3 })).unwrap();
        assert_eq!(snake.num_solutions, Some(3));

        let camel: BrainstormRequest =
            serde_json::from_value(json!({ "problem": "x", "numSolutions": 2 })).unwrap();
        assert_eq!(camel.num_solutions, Some(2));

        let bare: BrainstormRequest = serde_json::from_value(json!({ "problem": "x" })).unwrap();
        assert_eq!(bare.num_solutions, None);

        let empty: AnalyzeRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.problem, "");
    }

    #[test]
    fn favorites_round_trip_through_the_handlers() {
        let mut engine = setup_engine();
        assert!(list_favorites(&engine).favorites.is_empty());

        let ok = add_favorite(
            &mut engine,
            FavoriteRequest {
                principle: "分割".to_string(),
            },
        )
        .unwrap();
        assert!(ok.message.contains("分割"));

        let listed = list_favorites(&engine);
        assert_eq!(listed.favorites.len(), 1);
        assert_eq!(listed.favorites[0].principle_id, 1);
        assert_eq!(listed.favorites[0].name, "Segmentation");

        let value = serde_json::to_value(&listed).unwrap();
        assert!(value["favorites"][0].get("principleId").is_some());
    }

    #[test]
    fn unknown_favorite_references_are_404() {
        let mut engine = setup_engine();
        let err = add_favorite(
            &mut engine,
            FavoriteRequest {
                principle: "not a principle".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.status, 404);

        let err = add_favorite(&mut engine, FavoriteRequest::default()).unwrap_err();
        assert_eq!(err.status, 400);
    }

    #[test]
    fn health_reports_the_package_version() {
        let resp = health();
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }
}
