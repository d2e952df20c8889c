use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::PantryError;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// A participant's answers to the dietary form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietaryInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

impl DietaryInfo {
    pub fn validate(&self) -> Result<(), PantryError> {
        if self.name.trim().is_empty() {
            return Err(PantryError::InvalidInput("Name is required".into()));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(PantryError::InvalidInput("Email is required".into()));
        }
        if !EMAIL.is_match(email) {
            return Err(PantryError::InvalidInput("Invalid email format".into()));
        }
        Ok(())
    }
}

/// One persisted dietary submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyEntry {
    pub lobby_id: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub info: DietaryInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lobby {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLobby {
    pub name: String,
    pub date: NaiveDate,
}

impl CreateLobby {
    pub fn into_lobby(self, id: String) -> Result<Lobby, PantryError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PantryError::InvalidInput("Lobby name is required".into()));
        }
        Ok(Lobby {
            link: dietary_form_link(&id),
            id,
            name: name.to_string(),
            date: self.date,
            created_at: Utc::now(),
        })
    }
}

/// Frontend route where guests fill in their preferences.
pub fn dietary_form_link(lobby_id: &str) -> String {
    format!("/dietary-form/{lobby_id}")
}

/// Everything known about a lobby: its definition (when it was created
/// through the API) and the union of its participants' answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbySummary {
    pub id: String,
    pub lobby: Option<Lobby>,
    pub participants: Vec<String>,
    pub allergies: Vec<String>,
    pub dietary_restrictions: Vec<String>,
}

impl LobbySummary {
    pub fn collect(id: &str, lobby: Option<Lobby>, entries: &[LobbyEntry]) -> Self {
        let mut participants: Vec<String> = Vec::new();
        let mut allergies = BTreeSet::new();
        let mut restrictions = BTreeSet::new();

        for entry in entries.iter().filter(|e| e.lobby_id == id) {
            if !participants.contains(&entry.info.name) {
                participants.push(entry.info.name.clone());
            }
            allergies.extend(entry.info.allergies.iter().cloned());
            restrictions.extend(entry.info.dietary_restrictions.iter().cloned());
        }

        Self {
            id: id.to_string(),
            lobby,
            participants,
            allergies: allergies.into_iter().collect(),
            dietary_restrictions: restrictions.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lobby.is_none() && self.participants.is_empty()
    }
}

/// Distinct participant names across all lobbies, in submission order.
pub fn user_names(entries: &[LobbyEntry]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        if !names.contains(&entry.info.name) {
            names.push(entry.info.name.clone());
        }
    }
    names
}

/// The most recent submission made under `name`.
pub fn latest_for<'a>(entries: &'a [LobbyEntry], name: &str) -> Option<&'a LobbyEntry> {
    entries.iter().rev().find(|e| e.info.name == name)
}
