//! Derived deck statistics, mirroring the quantities the warehouse
//! computes downstream: per-deck win/loss records and synthesized deck
//! names built from final-evolution Pokémon.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{base_name, Card, DeckName, DeckStats, Tournament};

/// A win is a 2-0 set, a loss a 0-2; a score of 1 is a tie and counts for
/// neither, but the game is still played.
const WINNING_SCORE: i32 = 2;
const LOSING_SCORE: i32 = 0;

static PAREN_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(.*?\)").expect("static pattern"));
static TRAILING_EX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*ex\s*$").expect("static pattern"));

/// Lowercase a site-assigned player id and keep only `[a-z0-9]`.
pub fn normalize_player_id(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Key identifying one player's deck instance for statistics.
pub fn deck_signature(tournament_id: &str, player_id: &str) -> String {
    format!("{tournament_id}_{}", normalize_player_id(player_id))
}

/// Per-deck win/loss records over every match of every tournament.
pub fn compute_deck_stats(tournaments: &[Tournament]) -> Vec<DeckStats> {
    #[derive(Default)]
    struct Tally {
        games: u32,
        wins: u32,
        losses: u32,
    }

    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    for tournament in tournaments {
        for result in tournament
            .matches
            .iter()
            .flat_map(|m| &m.match_results)
        {
            let tally = tallies
                .entry(deck_signature(&tournament.id, &result.player_id))
                .or_default();
            tally.games += 1;
            if result.score == WINNING_SCORE {
                tally.wins += 1;
            } else if result.score == LOSING_SCORE {
                tally.losses += 1;
            }
        }
    }

    tallies
        .into_iter()
        .map(|(deck_signature, tally)| DeckStats {
            deck_signature,
            games_played: tally.games,
            wins: tally.wins,
            losses: tally.losses,
            winrate: round2(f64::from(tally.wins) * 100.0 / f64::from(tally.games)),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Synthesize a name and card list for every deck.
///
/// The name concatenates the deck's final-evolution Pokémon; decklist
/// entries are matched against catalog cards by base name, since decklists
/// carry no set suffix.
pub fn derive_deck_names(tournaments: &[Tournament], catalog: &[Card]) -> Vec<DeckName> {
    let final_evolutions: BTreeSet<&str> = catalog
        .iter()
        .filter(|card| card.is_final_evolution)
        .map(Card::base_name)
        .collect();

    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for tournament in tournaments {
        for player in &tournament.players {
            let signature = deck_signature(&tournament.id, &player.id);
            if !seen.insert(signature.clone()) {
                continue;
            }

            let formatted_cards = player
                .decklist
                .iter()
                .map(|item| format!("{}:{}", item.name, item.count))
                .join(",");

            let deck_name = player
                .decklist
                .iter()
                .map(|item| base_name(&item.name))
                .filter(|name| final_evolutions.contains(name))
                .unique()
                .map(clean_pokemon_name)
                .join(" - ");

            names.push(DeckName {
                deck_signature: signature,
                formatted_cards,
                deck_name,
            });
        }
    }
    names
}

/// Strip parenthetical suffixes and a trailing `ex` from a Pokémon name.
pub fn clean_pokemon_name(name: &str) -> String {
    let without_paren = PAREN_SUFFIX.replace_all(name, "");
    TRAILING_EX.replace(&without_paren, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeckListItem, Match, MatchResult, Player, Rarity};
    use chrono::{TimeZone, Utc};

    fn match_between(winner: &str, loser: &str) -> Match {
        Match {
            match_results: vec![
                MatchResult {
                    player_id: winner.to_string(),
                    score: 2,
                },
                MatchResult {
                    player_id: loser.to_string(),
                    score: 0,
                },
            ],
        }
    }

    fn tournament(id: &str, players: Vec<Player>, matches: Vec<Match>) -> Tournament {
        Tournament {
            id: id.to_string(),
            name: "Weekly".into(),
            date: Utc.with_ymd_and_hms(2025, 3, 1, 18, 30, 0).unwrap(),
            organizer: "Org".into(),
            format: "STANDARD".into(),
            nb_players: players.len() as u32,
            players,
            matches,
        }
    }

    #[test]
    fn normalization_keeps_lowercase_alphanumerics_only() {
        assert_eq!(normalize_player_id("Player_One"), "playerone");
        assert_eq!(normalize_player_id("abc123"), "abc123");
    }

    #[test]
    fn winrate_is_rounded_to_two_decimals() {
        // 10 games: 7 wins, 3 losses.
        let mut matches: Vec<Match> = (0..7).map(|i| match_between("alice", &format!("op{i}"))).collect();
        matches.extend((0..3).map(|i| match_between(&format!("op{i}"), "alice")));

        let stats = compute_deck_stats(&[tournament("t1", vec![], matches)]);
        let alice = stats
            .iter()
            .find(|s| s.deck_signature == "t1_alice")
            .unwrap();
        assert_eq!(alice.games_played, 10);
        assert_eq!(alice.wins, 7);
        assert_eq!(alice.losses, 3);
        assert_eq!(alice.winrate, 70.0);
    }

    #[test]
    fn thirds_round_to_two_decimals() {
        let matches = vec![
            match_between("alice", "bob"),
            match_between("alice", "bob"),
            match_between("bob", "alice"),
        ];
        let stats = compute_deck_stats(&[tournament("t1", vec![], matches)]);
        let alice = stats
            .iter()
            .find(|s| s.deck_signature == "t1_alice")
            .unwrap();
        assert_eq!(alice.winrate, 66.67);
    }

    #[test]
    fn deck_names_come_from_final_evolutions() {
        let catalog = vec![
            Card {
                name: "Charizard ex (A1-36)".into(),
                element_type: Some("Fire".into()),
                evolution_stage: Some("Stage 2".into()),
                hp: Some(180),
                rarity: Rarity::UltraRare,
                url: String::new(),
                image_url: None,
                evolves_from: Some("Charmeleon".into()),
                is_final_evolution: true,
            },
            Card {
                name: "Charmander (A1-33)".into(),
                element_type: Some("Fire".into()),
                evolution_stage: Some("Basic".into()),
                hp: Some(60),
                rarity: Rarity::Common,
                url: String::new(),
                image_url: None,
                evolves_from: None,
                is_final_evolution: false,
            },
        ];

        let player = Player {
            id: "Alice_42".into(),
            name: "Alice".into(),
            placing: Some(1),
            country: None,
            decklist: vec![
                DeckListItem {
                    card_type: "Pokémon".into(),
                    url: String::new(),
                    name: "Charmander".into(),
                    count: 4,
                },
                DeckListItem {
                    card_type: "Pokémon".into(),
                    url: String::new(),
                    name: "Charizard ex".into(),
                    count: 2,
                },
            ],
        };

        let names = derive_deck_names(&[tournament("t1", vec![player], vec![])], &catalog);
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].deck_signature, "t1_alice42");
        assert_eq!(names[0].formatted_cards, "Charmander:4,Charizard ex:2");
        assert_eq!(names[0].deck_name, "Charizard");
    }

    #[test]
    fn cleaning_strips_suffixes() {
        assert_eq!(clean_pokemon_name("Charizard ex"), "Charizard");
        assert_eq!(clean_pokemon_name("Charizard ex (A1-36)"), "Charizard");
        assert_eq!(clean_pokemon_name("Mewtwo"), "Mewtwo");
    }
}
