use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

/// Rarity labels printed on card pages.
///
/// Detection scans the page text for these labels in
/// [`Rarity::DETECTION_ORDER`]; a page matching none of them is `Unknown`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString,
    strum_macros::Display,
)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    #[strum(serialize = "Holo Rare")]
    #[serde(rename = "Holo Rare")]
    HoloRare,
    #[strum(serialize = "Ultra Rare")]
    #[serde(rename = "Ultra Rare")]
    UltraRare,
    #[strum(serialize = "Secret Rare")]
    #[serde(rename = "Secret Rare")]
    SecretRare,
    #[strum(serialize = "Rainbow Rare")]
    #[serde(rename = "Rainbow Rare")]
    RainbowRare,
    Promo,
    #[default]
    Unknown,
}

impl Rarity {
    /// Fixed scan order; the first label found in the page text wins.
    pub const DETECTION_ORDER: [Rarity; 8] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::HoloRare,
        Rarity::UltraRare,
        Rarity::SecretRare,
        Rarity::RainbowRare,
        Rarity::Promo,
    ];
}

/// One card of the catalog.
///
/// `name` is disambiguated with a `(SET-NUMBER)` suffix since the same
/// Pokémon appears in several sets. `is_final_evolution` is derived over
/// the whole catalog at assembly time, not per card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub element_type: Option<String>,
    pub evolution_stage: Option<String>,
    pub hp: Option<u32>,
    pub rarity: Rarity,
    pub url: String,
    pub image_url: Option<String>,
    pub evolves_from: Option<String>,
    pub is_final_evolution: bool,
}

impl Card {
    /// Card name with the `(SET-NUMBER)` suffix stripped.
    pub fn base_name(&self) -> &str {
        base_name(&self.name)
    }
}

/// Strip the parenthetical set suffix from a disambiguated card name.
pub fn base_name(name: &str) -> &str {
    name.split(" (").next().unwrap_or(name).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_the_set_suffix() {
        assert_eq!(base_name("Charizard ex (A1-036)"), "Charizard ex");
        assert_eq!(base_name("Charmander"), "Charmander");
    }

    #[test]
    fn rarity_labels_round_trip_through_display() {
        assert_eq!(Rarity::HoloRare.to_string(), "Holo Rare");
        assert_eq!("Ultra Rare".parse::<Rarity>().unwrap(), Rarity::UltraRare);
    }

    #[test]
    fn rarity_serializes_as_its_label() {
        let json = serde_json::to_string(&Rarity::RainbowRare).unwrap();
        assert_eq!(json, "\"Rainbow Rare\"");
    }
}
