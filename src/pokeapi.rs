use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{
    CatalogEntryDetail, CatalogEntrySummary, EvolutionNode, Genus, PokemonIdentifier,
    SpeciesMetadata, SpriteHandle, StatValue,
};
use crate::error::PokedexError;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Remote catalog client. One HTTP GET per call, no retries; retry policy,
/// if any, belongs to the caller.
#[allow(async_fn_in_trait)]
pub trait CatalogClient: Send + Sync {
    async fn list_summaries(&self, limit: u32) -> Result<Vec<CatalogEntrySummary>, PokedexError>;
    async fn get_detail(&self, url: &str) -> Result<CatalogEntryDetail, PokedexError>;
    async fn get_detail_by_identifier(
        &self,
        identifier: &PokemonIdentifier,
    ) -> Result<CatalogEntryDetail, PokedexError>;
    async fn get_species(&self, url: &str) -> Result<SpeciesMetadata, PokedexError>;
    async fn get_evolution_chain(&self, url: &str) -> Result<EvolutionNode, PokedexError>;
    async fn get_sprite(&self, url: &str) -> Result<SpriteHandle, PokedexError>;
}

#[derive(Clone)]
pub struct PokeApiHttpClient {
    client: Client,
    base_url: String,
}

impl PokeApiHttpClient {
    pub fn new() -> Result<Self, PokedexError> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Result<Self, PokedexError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("pokedex/{}", env!("CARGO_PKG_VERSION"))).map_err(
                |err| PokedexError::Network {
                    url: base_url.clone(),
                    message: err.to_string(),
                },
            )?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| PokedexError::Network {
                url: base_url.clone(),
                message: err.to_string(),
            })?;
        Ok(Self { client, base_url })
    }

    async fn get_bytes(&self, url: &str) -> Result<(Option<String>, Vec<u8>), PokedexError> {
        tracing::debug!(url, "catalog GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| PokedexError::Network {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(PokedexError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let body = response
            .bytes()
            .await
            .map_err(|err| PokedexError::Network {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        Ok((content_type, body.to_vec()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, PokedexError> {
        let (_, body) = self.get_bytes(url).await?;
        serde_json::from_slice(&body).map_err(|err| PokedexError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

impl CatalogClient for PokeApiHttpClient {
    async fn list_summaries(&self, limit: u32) -> Result<Vec<CatalogEntrySummary>, PokedexError> {
        let url = format!("{}/pokemon?limit={limit}", self.base_url);
        let response: ListResponse = self.get_json(&url).await?;
        decode_summaries(response, &url)
    }

    async fn get_detail(&self, url: &str) -> Result<CatalogEntryDetail, PokedexError> {
        let response: PokemonResponse = self.get_json(url).await?;
        Ok(decode_detail(response))
    }

    async fn get_detail_by_identifier(
        &self,
        identifier: &PokemonIdentifier,
    ) -> Result<CatalogEntryDetail, PokedexError> {
        let url = format!("{}/pokemon/{}", self.base_url, identifier);
        self.get_detail(&url).await
    }

    async fn get_species(&self, url: &str) -> Result<SpeciesMetadata, PokedexError> {
        let response: SpeciesResponse = self.get_json(url).await?;
        Ok(decode_species(response))
    }

    async fn get_evolution_chain(&self, url: &str) -> Result<EvolutionNode, PokedexError> {
        let response: EvolutionChainResponse = self.get_json(url).await?;
        Ok(decode_chain_link(response.chain))
    }

    async fn get_sprite(&self, url: &str) -> Result<SpriteHandle, PokedexError> {
        let (content_type, bytes) = self.get_bytes(url).await?;
        Ok(SpriteHandle {
            url: url.to_string(),
            content_type,
            bytes,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub results: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ListEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NamedUrlRef {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    pub sprites: SpritesResponse,
    pub types: Vec<TypeSlotResponse>,
    pub stats: Vec<StatResponse>,
    pub abilities: Vec<AbilitySlotResponse>,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub species: NamedUrlRef,
}

#[derive(Debug, Deserialize)]
pub struct SpritesResponse {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSpritesResponse>,
}

#[derive(Debug, Deserialize)]
pub struct OtherSpritesResponse {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkResponse>,
}

#[derive(Debug, Deserialize)]
pub struct ArtworkResponse {
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlotResponse {
    #[serde(rename = "type")]
    pub type_ref: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct StatResponse {
    pub base_stat: u32,
    pub stat: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct AbilitySlotResponse {
    pub ability: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct SpeciesResponse {
    pub id: u32,
    pub capture_rate: u32,
    pub base_happiness: Option<u32>,
    pub gender_rate: i32,
    pub hatch_counter: Option<u32>,
    pub growth_rate: NamedRef,
    #[serde(default)]
    pub genera: Vec<GenusResponse>,
    #[serde(default)]
    pub egg_groups: Vec<NamedRef>,
    pub evolution_chain: NamedUrlRef,
}

#[derive(Debug, Deserialize)]
pub struct GenusResponse {
    pub genus: String,
    pub language: NamedRef,
}

#[derive(Debug, Deserialize)]
pub struct EvolutionChainResponse {
    pub chain: ChainLinkResponse,
}

#[derive(Debug, Deserialize)]
pub struct ChainLinkResponse {
    pub species: NamedRef,
    #[serde(default)]
    pub evolves_to: Vec<ChainLinkResponse>,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetailResponse>,
}

#[derive(Debug, Deserialize)]
pub struct EvolutionDetailResponse {
    pub min_level: Option<u32>,
}

pub fn decode_summaries(
    response: ListResponse,
    request_url: &str,
) -> Result<Vec<CatalogEntrySummary>, PokedexError> {
    response
        .results
        .into_iter()
        .map(|entry| {
            let id = id_from_url(&entry.url).ok_or_else(|| PokedexError::Decode {
                url: request_url.to_string(),
                message: format!("list entry url carries no numeric id: {}", entry.url),
            })?;
            Ok(CatalogEntrySummary {
                id,
                name: entry.name,
                detail_url: entry.url,
            })
        })
        .collect()
}

pub fn decode_detail(response: PokemonResponse) -> CatalogEntryDetail {
    let artwork_url = response
        .sprites
        .other
        .and_then(|other| other.official_artwork)
        .and_then(|artwork| artwork.front_default);
    CatalogEntryDetail {
        id: response.id,
        name: response.name,
        sprite_url: response.sprites.front_default,
        artwork_url,
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_ref.name)
            .collect(),
        stats: response
            .stats
            .into_iter()
            .map(|stat| StatValue {
                name: stat.stat.name,
                base_value: stat.base_stat,
            })
            .collect(),
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        height_decimeters: response.height,
        weight_hectograms: response.weight,
        base_experience: response.base_experience,
        species_url: response.species.url,
        sprite: None,
    }
}

pub fn decode_species(response: SpeciesResponse) -> SpeciesMetadata {
    SpeciesMetadata {
        id: response.id,
        capture_rate: response.capture_rate,
        base_happiness: response.base_happiness,
        gender_rate: response.gender_rate,
        hatch_counter_steps: response.hatch_counter,
        growth_rate: response.growth_rate.name,
        genera: response
            .genera
            .into_iter()
            .map(|genus| Genus {
                language: genus.language.name,
                genus: genus.genus,
            })
            .collect(),
        egg_groups: response
            .egg_groups
            .into_iter()
            .map(|group| group.name)
            .collect(),
        evolution_chain_url: response.evolution_chain.url,
    }
}

/// Converts a wire chain link into the domain tree. A node's
/// `min_level_to_evolve` is taken from the first evolution detail of its
/// first child, matching the single-branch lineage walk downstream.
pub fn decode_chain_link(link: ChainLinkResponse) -> EvolutionNode {
    let min_level_to_evolve = link
        .evolves_to
        .first()
        .and_then(|child| child.evolution_details.first())
        .and_then(|detail| detail.min_level);
    EvolutionNode {
        species_name: link.species.name,
        min_level_to_evolve,
        children: link.evolves_to.into_iter().map(decode_chain_link).collect(),
    }
}

/// Trailing numeric path segment of a catalog resource URL.
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}
