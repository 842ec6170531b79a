use serde::{Deserialize, Serialize};

/// Win/loss record of one deck instance, keyed by deck signature
/// (tournament id + normalized player id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckStats {
    pub deck_signature: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Percentage of games won, rounded to two decimals.
    pub winrate: f64,
}

/// Synthesized name and card list of one deck instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckName {
    pub deck_signature: String,
    /// `Name:count` entries joined with commas, in decklist order.
    pub formatted_cards: String,
    /// The deck's final-evolution Pokémon, cleaned and joined with `" - "`.
    pub deck_name: String,
}
