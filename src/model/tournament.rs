use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Date format used by the site's `data-date` attributes and by the
/// warehouse loader when reading artifacts.
const ARTIFACT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub(crate) fn parse_site_date(raw: &str) -> Result<DateTime<Utc>> {
    Ok(NaiveDateTime::parse_from_str(raw, ARTIFACT_DATE_FORMAT)?.and_utc())
}

mod artifact_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_site_date, ARTIFACT_DATE_FORMAT};

    pub fn serialize<S: Serializer>(
        date: &DateTime<Utc>,
        ser: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        ser.serialize_str(&date.format(ARTIFACT_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(de)?;
        parse_site_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// One page of the completed-tournaments listing.
#[derive(Debug, Clone)]
pub struct TournamentPage {
    pub tournaments: Vec<TournamentSummary>,
    pub current_page: u32,
    pub max_page: u32,
}

/// A tournament row as it appears on the listing page, before any
/// standings or pairings have been fetched.
#[derive(Debug, Clone)]
pub struct TournamentSummary {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub organizer: String,
    pub format: String,
    pub nb_players: u32,
}

/// A fully assembled tournament, persisted as one JSON artifact keyed by
/// its id. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    #[serde(with = "artifact_date")]
    pub date: DateTime<Utc>,
    pub organizer: String,
    pub format: String,
    pub nb_players: u32,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
}

/// A participant with a decklist. Players without a decklist link on the
/// standings page never become `Player` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub placing: Option<u32>,
    pub country: Option<String>,
    pub decklist: Vec<DeckListItem>,
}

/// One card entry of a player's decklist, in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckListItem {
    #[serde(rename = "type")]
    pub card_type: String,
    pub url: String,
    pub name: String,
    pub count: u32,
}

/// One played match. Bracket matches may carry more than two results;
/// byes contribute no `Match` at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub match_results: Vec<MatchResult>,
}

/// One participant's outcome within a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub player_id: String,
    pub score: i32,
}

/// A standings row before decklist filtering.
#[derive(Debug, Clone)]
pub struct StandingsRow {
    pub id: String,
    pub name: String,
    pub placing: Option<u32>,
    pub country: Option<String>,
    pub has_decklist: bool,
}
