use serde::{Deserialize, Serialize};

use crate::emotion::prompts::{direct_prompt, persona_prompt};

pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_length: u32,
    pub temperature: f32,
    pub do_sample: bool,
    pub top_p: f32,
    pub repetition_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_full_text: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    // Persona instruction, context framing and role labels
    Persona,
    // Single-line request quoting the user message
    Direct,
}

/// One upstream text-generation endpoint, tried in list order.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub url: String,
    pub style: PromptStyle,
    pub parameters: GenerationParameters,
}

impl Candidate {
    pub fn request(&self, context_prompt: &str, message: &str) -> GenerationRequest {
        let inputs = match self.style {
            PromptStyle::Persona => persona_prompt(context_prompt, message),
            PromptStyle::Direct => direct_prompt(message),
        };
        GenerationRequest {
            endpoint: self.url.clone(),
            inputs,
            parameters: self.parameters.clone(),
        }
    }
}

pub fn default_candidates(base_url: &str) -> Vec<Candidate> {
    let base = base_url.trim_end_matches('/');
    vec![
        Candidate {
            url: format!("{}/microsoft/DialoGPT-spanish", base),
            style: PromptStyle::Persona,
            parameters: GenerationParameters {
                max_length: 200,
                temperature: 0.8,
                do_sample: true,
                top_p: 0.9,
                repetition_penalty: 1.2,
                return_full_text: Some(false),
            },
        },
        Candidate {
            url: format!("{}/microsoft/DialoGPT-medium", base),
            style: PromptStyle::Direct,
            parameters: GenerationParameters {
                max_length: 200,
                temperature: 0.7,
                do_sample: true,
                top_p: 0.9,
                repetition_penalty: 1.1,
                return_full_text: None,
            },
        },
    ]
}

// Built per call, never retained
#[derive(Debug, Serialize)]
pub struct GenerationRequest {
    #[serde(skip)]
    pub endpoint: String,
    pub inputs: String,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidates_follow_base_url() {
        let candidates = default_candidates("http://localhost:9000/models/");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url, "http://localhost:9000/models/microsoft/DialoGPT-spanish");
        assert_eq!(candidates[1].url, "http://localhost:9000/models/microsoft/DialoGPT-medium");
    }

    #[test]
    fn request_body_omits_endpoint_and_unset_flags() {
        let candidates = default_candidates(DEFAULT_INFERENCE_BASE_URL);
        let body = serde_json::to_value(candidates[1].request("ctx", "hola")).unwrap();
        assert!(body.get("endpoint").is_none());
        assert!(body["parameters"].get("return_full_text").is_none());
        assert_eq!(body["parameters"]["max_length"], json!(200));
        assert_eq!(body["parameters"]["do_sample"], json!(true));
    }

    #[test]
    fn persona_candidate_sets_return_full_text() {
        let candidates = default_candidates(DEFAULT_INFERENCE_BASE_URL);
        let request = candidates[0].request("ctx", "hola");
        assert!(request.inputs.ends_with("ctx\n\nUsuario: hola\nFreuda:"));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["parameters"]["return_full_text"], json!(false));
    }
}
