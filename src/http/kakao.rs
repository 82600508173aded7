//! Kakao skill payload and response types.
//!
//! # Responsibilities
//! - Deserialize the skill webhook payload (leniently: unknown fields and
//!   missing sections are the norm)
//! - Select the utterance source: the skill parameter `usrtext` wins over
//!   the raw `userRequest.utterance`
//! - Serialize the fixed 2.0 response template (simpleText only)

use serde::{Deserialize, Serialize};

/// Incoming skill webhook payload. Only the fields the gateway reads are
/// modeled; everything else in the Kakao envelope is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillPayload {
    pub user_request: Option<UserRequest>,
    pub action: Option<Action>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub utterance: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Action {
    pub params: Params,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
    pub usrtext: Option<String>,
}

/// The selected utterance plus which field supplied it.
#[derive(Debug)]
pub struct Utterance {
    /// Trimmed text; empty when the payload carried no usable utterance.
    pub text: String,
    /// Payload field the text came from.
    pub source: &'static str,
}

impl SkillPayload {
    /// Raw `action.params.usrtext`, if present.
    pub fn usrtext(&self) -> Option<&str> {
        self.action.as_ref()?.params.usrtext.as_deref()
    }

    /// Raw `userRequest.utterance`, if present.
    pub fn raw_utterance(&self) -> Option<&str> {
        self.user_request.as_ref()?.utterance.as_deref()
    }

    /// Select and trim the utterance. A non-empty `usrtext` takes
    /// precedence; otherwise the raw utterance is used.
    pub fn utterance(&self) -> Utterance {
        match self.usrtext() {
            Some(text) if !text.is_empty() => Utterance {
                text: text.trim().to_string(),
                source: "action.params.usrtext",
            },
            _ => Utterance {
                text: self.raw_utterance().unwrap_or("").trim().to_string(),
                source: "userRequest.utterance",
            },
        }
    }
}

/// Outgoing skill response, version 2.0 template with a single simpleText
/// output. Serialized as UTF-8 so Korean text passes through verbatim.
#[derive(Debug, Serialize)]
pub struct SkillResponse {
    version: &'static str,
    template: Template,
}

#[derive(Debug, Serialize)]
struct Template {
    outputs: Vec<Output>,
}

#[derive(Debug, Serialize)]
struct Output {
    #[serde(rename = "simpleText")]
    simple_text: SimpleText,
}

#[derive(Debug, Serialize)]
struct SimpleText {
    text: String,
}

/// Build a simpleText response.
pub fn simple_text(text: impl Into<String>) -> SkillResponse {
    SkillResponse {
        version: "2.0",
        template: Template {
            outputs: vec![Output {
                simple_text: SimpleText { text: text.into() },
            }],
        },
    }
}
