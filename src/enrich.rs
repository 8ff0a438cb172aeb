use futures::future::try_join_all;
use tracing::debug;

use crate::domain::{CatalogEntryDetail, CatalogEntrySummary};
use crate::error::PokedexError;
use crate::pokeapi::CatalogClient;

/// Detail enrichment fan-out: one detail fetch per summary, all issued
/// concurrently without a cap, joined on completion. The result preserves
/// the input order and the whole batch fails on the first error.
///
/// When a detail names a front sprite, its blob is fetched as part of the
/// same per-summary future and attached to the record.
pub async fn enrich<C: CatalogClient>(
    client: &C,
    summaries: &[CatalogEntrySummary],
) -> Result<Vec<CatalogEntryDetail>, PokedexError> {
    debug!(count = summaries.len(), "enriching catalog summaries");
    let futures = summaries.iter().map(|summary| async move {
        let mut detail = client.get_detail(&summary.detail_url).await?;
        if let Some(sprite_url) = detail.sprite_url.clone() {
            detail.sprite = Some(client.get_sprite(&sprite_url).await?);
        }
        Ok::<_, PokedexError>(detail)
    });
    try_join_all(futures).await
}
