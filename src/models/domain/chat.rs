use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single conversation with the model.
///
/// `history` is append-only: turns are only ever added at the end, never
/// edited, reordered or removed. The first turn is always the opening user
/// turn created by [`Chat::new`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Chat {
    pub id: String,
    pub user_id: String,
    pub history: Vec<Turn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TurnPart {
    pub text: String,
}

/// One message in a conversation.
///
/// `img` is an opaque reference to an externally hosted asset and may only
/// appear on user turns; the constructors are the only way to build a turn,
/// so a model turn can never carry one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Turn {
    pub role: TurnRole,
    pub parts: Vec<TurnPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: TurnRole::User,
            parts: vec![TurnPart { text: text.into() }],
            img: None,
        }
    }

    pub fn user_with_attachment(text: impl Into<String>, img: impl Into<String>) -> Self {
        Turn {
            role: TurnRole::User,
            parts: vec![TurnPart { text: text.into() }],
            img: Some(img.into()),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Turn {
            role: TurnRole::Model,
            parts: vec![TurnPart { text: text.into() }],
            img: None,
        }
    }

    /// The turn text as a single string. Multi-part turns are joined with
    /// newlines.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Chat {
    pub fn new(user_id: &str, initial_text: &str) -> Self {
        Chat {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            history: vec![Turn::user(initial_text)],
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}
