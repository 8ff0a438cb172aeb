use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{AggregatedDetail, EvolutionNode, EvolutionStage, PokemonIdentifier};
use crate::error::{AggregationStage, PokedexError};
use crate::pokeapi::CatalogClient;

/// Joins the base record, its species metadata and its lineage into one
/// display model for a single selected entry.
///
/// The three fetches are strictly sequential: the detail carries the
/// species URL, the species carries the evolution-chain URL. Any stage
/// failure aborts the aggregate; no partial value is returned.
pub async fn get_full_detail<C: CatalogClient>(
    client: &C,
    identifier: &PokemonIdentifier,
) -> Result<AggregatedDetail, PokedexError> {
    debug!(%identifier, "aggregating full detail");
    let detail = client
        .get_detail_by_identifier(identifier)
        .await
        .map_err(|err| err.into_aggregation(AggregationStage::Detail))?;
    let species = client
        .get_species(&detail.species_url)
        .await
        .map_err(|err| err.into_aggregation(AggregationStage::Species))?;
    let chain = client
        .get_evolution_chain(&species.evolution_chain_url)
        .await
        .map_err(|err| err.into_aggregation(AggregationStage::EvolutionChain))?;
    let lineage = resolve_stages(client, &chain).await;
    Ok(AggregatedDetail {
        detail,
        species,
        lineage,
    })
}

/// Single-path walk of the evolution tree: only the first child is
/// followed at each branch, so alternate evolutions are dropped. This is a
/// deliberate, documented limitation carried over from the original
/// display behavior.
pub fn lineage_path(root: &EvolutionNode) -> Vec<&EvolutionNode> {
    let mut path = Vec::new();
    let mut node = root;
    loop {
        path.push(node);
        match node.children.first() {
            Some(child) => node = child,
            None => break,
        }
    }
    path
}

/// Resolves each lineage stage's sprite URL with one detail lookup per
/// stage. A failed lookup leaves the stage without a sprite rather than
/// failing the aggregate.
async fn resolve_stages<C: CatalogClient>(
    client: &C,
    root: &EvolutionNode,
) -> Vec<EvolutionStage> {
    let lookups = lineage_path(root).into_iter().map(|node| async move {
        let sprite_url = match node.species_name.parse::<PokemonIdentifier>() {
            Ok(identifier) => match client.get_detail_by_identifier(&identifier).await {
                Ok(detail) => detail.sprite_url,
                Err(err) => {
                    warn!(species = %node.species_name, error = %err, "lineage sprite lookup failed");
                    None
                }
            },
            Err(err) => {
                warn!(species = %node.species_name, error = %err, "lineage species name not addressable");
                None
            }
        };
        EvolutionStage {
            species_name: node.species_name.clone(),
            sprite_url,
            min_level_to_evolve: node.min_level_to_evolve,
        }
    });
    join_all(lookups).await
}
