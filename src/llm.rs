//! Optional LLM-backed enhancement over the OpenRouter chat API.
//!
//! Two operations: extract a parameter pair from a problem statement,
//! and rewrite one solution's prose. Both send a single prompt, scan
//! the reply for a trailing JSON object and fall back to the
//! unenhanced path on any failure. One attempt, no retries: the model
//! output is untrusted garnish, never load-bearing.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use crate::types::{Language, ParameterExtraction, Solution};

const REFERER: &str = "https://github.com/zeststream/triz-advisor";
const TITLE: &str = "TRIZ Advisor";

/// Configuration for the enhancement client
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Chat-completions endpoint
    pub api_url: String,

    /// API key (from environment)
    pub api_key: String,

    pub model: String,

    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key: std::env::var("OPENROUTER_API_KEY").unwrap_or_default(),
            model: "tngtech/deepseek-r1t2-chimera:free".to_string(),
            temperature: 0.3,
        }
    }
}

pub struct LlmEnhancer {
    config: LlmConfig,
    client: reqwest::Client,
}

impl LlmEnhancer {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("building HTTP client")?;
        Ok(Self { config, client })
    }

    /// Enhancer from the environment, or `None` when no credential is
    /// configured. Callers treat `None` as "run without enhancement".
    pub fn from_env() -> Option<Self> {
        let config = LlmConfig::default();
        if config.api_key.is_empty() {
            return None;
        }
        Self::new(config).ok()
    }

    /// Ask the model for an (improving, worsening) pair. Any failure
    /// comes back as the default record with `success: false`.
    pub async fn extract_parameters(&self, problem: &str, lang: Language) -> ParameterExtraction {
        let prompt = match lang {
            Language::Zh => format!(
                r#"分析以下技术问题，提取TRIZ参数。

问题：{problem}

请以JSON格式返回：
{{"improving_param": "需要改善的参数", "worsening_param": "可能恶化的参数", "enhanced_description": "问题的更清晰描述", "success": true}}

只返回JSON，不要其他文字。"#
            ),
            Language::En => format!(
                r#"Analyze this technical problem and extract its TRIZ parameters.

Problem: {problem}

Reply with JSON only:
{{"improving_param": "parameter to improve", "worsening_param": "parameter that may worsen", "enhanced_description": "a clearer restatement of the problem", "success": true}}

Return the JSON object and nothing else."#
            ),
        };

        let reply = match self.chat(&prompt, 500).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("parameter extraction failed: {err:#}");
                return ParameterExtraction::default();
            }
        };
        let Extracted::Parsed(value) = extract_trailing_json(&reply) else {
            warn!("extraction reply carried no parseable JSON");
            return ParameterExtraction::default();
        };
        ParameterExtraction {
            improving_param: value["improving_param"].as_str().unwrap_or_default().to_string(),
            worsening_param: value["worsening_param"].as_str().unwrap_or_default().to_string(),
            enhanced_description: value["enhanced_description"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            success: value["success"].as_bool().unwrap_or(false),
        }
    }

    /// Rewrite one solution's prose. Returns the input unchanged on any
    /// failure or a `success: false` reply.
    pub async fn enhance_solution(&self, solution: &Solution, problem: &str, lang: Language) -> Solution {
        let prompt = match lang {
            Language::Zh => format!(
                r#"基于TRIZ原理"{name}"，为以下问题生成更具体的解决方案描述。

问题：{problem}
当前描述：{description}

请以JSON格式返回：
{{"description": "更具体的一句话方案描述", "detailed_explanation": "两三句话的实施说明", "success": true}}

只返回JSON，不要其他文字。"#,
                name = solution.principle_name,
                description = solution.description,
            ),
            Language::En => format!(
                r#"Using the TRIZ principle "{name}", write a more concrete solution for this problem.

Problem: {problem}
Current description: {description}

Reply with JSON only:
{{"description": "one concrete sentence", "detailed_explanation": "two or three sentences on how to apply it", "success": true}}

Return the JSON object and nothing else."#,
                name = solution.principle_name,
                description = solution.description,
            ),
        };

        let reply = match self.chat(&prompt, 500).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("solution enhancement failed: {err:#}");
                return solution.clone();
            }
        };
        let Extracted::Parsed(value) = extract_trailing_json(&reply) else {
            warn!("enhancement reply carried no parseable JSON");
            return solution.clone();
        };
        if !value["success"].as_bool().unwrap_or(false) {
            return solution.clone();
        }

        let mut enhanced = solution.clone();
        if let Some(description) = value["description"].as_str() {
            if !description.is_empty() {
                enhanced.description = description.to_string();
            }
        }
        if let Some(detail) = value["detailed_explanation"].as_str() {
            if !detail.is_empty() {
                enhanced.detailed_explanation = detail.to_string();
            }
        }
        enhanced
    }

    async fn chat(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request_body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": self.config.temperature,
            "max_tokens": max_tokens,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("API error {status}: {error_text}"));
        }

        let reply: Value = response.json().await?;
        let content = reply["choices"][0]["message"]["content"]
            .as_str()
            .context("reply carried no message content")?;
        Ok(content.to_string())
    }
}

/// Result of scanning free-form model output for a JSON object.
#[derive(Debug)]
pub enum Extracted {
    Parsed(Value),
    Unparsed,
}

/// Best-effort JSON recovery: take the span from the first `{` to the
/// last `}` and attempt exactly one parse.
pub fn extract_trailing_json(text: &str) -> Extracted {
    let Some(start) = text.find('{') else {
        return Extracted::Unparsed;
    };
    let Some(end) = text.rfind('}') else {
        return Extracted::Unparsed;
    };
    if end < start {
        return Extracted::Unparsed;
    }
    match serde_json::from_str(&text[start..=end]) {
        Ok(value) => Extracted::Parsed(value),
        Err(_) => Extracted::Unparsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_wrapped_in_prose() {
        let reply = r#"Sure! Here is the result:
```json
{"improving_param": "weight", "success": true}
```
Hope that helps."#;
        match extract_trailing_json(reply) {
            Extracted::Parsed(value) => {
                assert_eq!(value["improving_param"], "weight");
                assert_eq!(value["success"], true);
            }
            Extracted::Unparsed => panic!("expected a parsed object"),
        }
    }

    #[test]
    fn plain_json_object_parses() {
        match extract_trailing_json(r#"{"success": false}"#) {
            Extracted::Parsed(value) => assert_eq!(value["success"], false),
            Extracted::Unparsed => panic!("expected a parsed object"),
        }
    }

    #[test]
    fn garbage_replies_are_unparsed() {
        assert!(matches!(extract_trailing_json("no json here"), Extracted::Unparsed));
        assert!(matches!(extract_trailing_json("} backwards {"), Extracted::Unparsed));
        assert!(matches!(
            extract_trailing_json("{not valid json}"),
            Extracted::Unparsed
        ));
        assert!(matches!(extract_trailing_json(""), Extracted::Unparsed));
    }

    #[test]
    fn default_extraction_reports_failure() {
        let extraction = ParameterExtraction::default();
        assert!(!extraction.success);
        assert!(extraction.improving_param.is_empty());
    }

    #[test]
    fn enhancer_builds_without_a_key() {
        let config = LlmConfig {
            api_key: String::new(),
            ..LlmConfig::default()
        };
        assert!(LlmEnhancer::new(config).is_ok());
    }
}
