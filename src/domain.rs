use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PokedexError;

/// Canonical stat names as reported by the catalog, in Pokedex column order.
/// Lookups always resolve by name; the wire ordering is never relied on.
pub const STAT_NAMES: [&str; 6] = [
    "hp",
    "attack",
    "defense",
    "special-attack",
    "special-defense",
    "speed",
];

/// Minimal list-view record prior to enrichment. Exists only transiently
/// between the list fetch and the detail fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntrySummary {
    pub id: u32,
    pub name: String,
    pub detail_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatValue {
    pub name: String,
    pub base_value: u32,
}

/// Binary sprite resource fetched alongside a detail record.
#[derive(Clone, PartialEq, Eq)]
pub struct SpriteHandle {
    pub url: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for SpriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpriteHandle")
            .field("url", &self.url)
            .field("content_type", &self.content_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Fully enriched per-entry record used for display and sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntryDetail {
    pub id: u32,
    pub name: String,
    pub sprite_url: Option<String>,
    pub artwork_url: Option<String>,
    pub types: Vec<String>,
    pub stats: Vec<StatValue>,
    pub abilities: Vec<String>,
    pub height_decimeters: u32,
    pub weight_hectograms: u32,
    pub base_experience: Option<u32>,
    pub species_url: String,
    #[serde(skip)]
    pub sprite: Option<SpriteHandle>,
}

impl CatalogEntryDetail {
    /// Base value of the named stat; a missing stat reads as 0.
    pub fn stat(&self, name: &str) -> u32 {
        self.stats
            .iter()
            .find(|stat| stat.name == name)
            .map(|stat| stat.base_value)
            .unwrap_or(0)
    }

    pub fn stat_total(&self) -> u32 {
        self.stats.iter().map(|stat| stat.base_value).sum()
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|name| name == type_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Genus {
    pub language: String,
    pub genus: String,
}

/// Taxonomic metadata fetched lazily for the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeciesMetadata {
    pub id: u32,
    pub capture_rate: u32,
    pub base_happiness: Option<u32>,
    pub gender_rate: i32,
    pub hatch_counter_steps: Option<u32>,
    pub growth_rate: String,
    pub genera: Vec<Genus>,
    pub egg_groups: Vec<String>,
    pub evolution_chain_url: String,
}

impl SpeciesMetadata {
    pub fn english_genus(&self) -> Option<&str> {
        self.genera
            .iter()
            .find(|genus| genus.language == "en")
            .map(|genus| genus.genus.as_str())
    }

    /// Male/female percentage split. `gender_rate` counts female eighths;
    /// -1 means genderless and yields `None`.
    pub fn gender_split(&self) -> Option<(f64, f64)> {
        if self.gender_rate < 0 {
            return None;
        }
        let female = f64::from(self.gender_rate) * 12.5;
        Some((100.0 - female, female))
    }

    /// Egg cycles expressed in steps (one cycle is 255 steps).
    pub fn hatch_steps(&self) -> Option<u32> {
        self.hatch_counter_steps.map(|cycles| cycles * 255)
    }
}

/// One node of the evolution tree. `min_level_to_evolve` is the level at
/// which this species evolves into its first child, when level-gated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionNode {
    pub species_name: String,
    pub min_level_to_evolve: Option<u32>,
    pub children: Vec<EvolutionNode>,
}

/// One step of the single-path lineage walk, with its sprite resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionStage {
    pub species_name: String,
    pub sprite_url: Option<String>,
    pub min_level_to_evolve: Option<u32>,
}

/// Joined display model for a single selected entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedDetail {
    pub detail: CatalogEntryDetail,
    pub species: SpeciesMetadata,
    pub lineage: Vec<EvolutionStage>,
}

/// Catalog identifier accepted by the detail endpoint: a numeric id or a
/// lowercase species name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokemonIdentifier(String);

impl PokemonIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PokemonIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PokemonIdentifier {
    type Err = PokedexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        let is_valid = !normalized.is_empty()
            && normalized
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
        if !is_valid {
            return Err(PokedexError::InvalidIdentifier(value.to_string()));
        }
        Ok(Self(normalized))
    }
}
