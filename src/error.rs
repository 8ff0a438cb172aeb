use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Aggregation stage that failed while assembling a full detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationStage {
    Detail,
    Species,
    EvolutionChain,
}

impl fmt::Display for AggregationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationStage::Detail => write!(f, "detail"),
            AggregationStage::Species => write!(f, "species"),
            AggregationStage::EvolutionChain => write!(f, "evolution chain"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum PokedexError {
    #[error("invalid catalog identifier: {0}")]
    InvalidIdentifier(String),

    #[error("catalog request failed for {url}: {message}")]
    Network { url: String, message: String },

    #[error("catalog returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode catalog response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("{stage} stage failed during detail aggregation")]
    Aggregation {
        stage: AggregationStage,
        #[source]
        source: Box<PokedexError>,
    },
}

impl PokedexError {
    pub fn into_aggregation(self, stage: AggregationStage) -> PokedexError {
        PokedexError::Aggregation {
            stage,
            source: Box::new(self),
        }
    }
}
