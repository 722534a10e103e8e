//! Head-to-head player comparison.
//!
//! A request moves through three shapes: [`CompareRequest`] as received,
//! [`PlayerPair`] once both ids are present, and [`ComparisonResult`] once the
//! records are fetched and the metrics computed. Nothing is cached between
//! requests.

pub mod insights;
pub mod lookup;
pub mod trend;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::db::models::Player;
use crate::db::{PlayerStore, StoreError};

pub use insights::generate_insights;
pub use lookup::lookup_pair;
pub use trend::Trend;

#[derive(Debug, Error)]
pub enum CompareError {
    /// Missing or malformed identifiers
    #[error("{0}")]
    Validation(String),

    /// The lookup did not return exactly two records
    #[error("One or both players not found")]
    NotFound { found: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Raw `{player1Id, player2Id}` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub player1_id: Option<String>,
    pub player2_id: Option<String>,
}

/// Two present, non-empty ids. Distinctness is not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPair {
    pub player1_id: String,
    pub player2_id: String,
}

impl CompareRequest {
    pub fn validate(self) -> Result<PlayerPair, CompareError> {
        let present = |id: Option<String>| {
            id.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        match (present(self.player1_id), present(self.player2_id)) {
            (Some(player1_id), Some(player2_id)) => Ok(PlayerPair {
                player1_id,
                player2_id,
            }),
            _ => Err(CompareError::Validation(
                "Both player1Id and player2Id are required".to_string(),
            )),
        }
    }
}

/// Public stat fields echoed back in the comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub matches: u32,
    pub score: u32,
    pub assists: u32,
    pub rebounds: u32,
    pub wins: u32,
}

impl From<&Player> for PlayerSummary {
    fn from(p: &Player) -> Self {
        PlayerSummary {
            name: p.name.clone(),
            matches: p.matches,
            score: p.score,
            assists: p.assists,
            rebounds: p.rebounds,
            wins: p.wins,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sides<T> {
    pub player1: T,
    pub player2: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub comparison: Sides<PlayerSummary>,
    pub trends: Sides<Trend>,
    pub insights: Vec<String>,
}

impl ComparisonResult {
    /// Pure computation over two already-fetched records.
    pub fn build(p1: &Player, p2: &Player) -> Self {
        ComparisonResult {
            comparison: Sides {
                player1: PlayerSummary::from(p1),
                player2: PlayerSummary::from(p2),
            },
            trends: Sides {
                player1: Trend::for_player(p1),
                player2: Trend::for_player(p2),
            },
            insights: generate_insights(p1, p2),
        }
    }
}

/// Fetch both players and compute the comparison. All-or-nothing.
pub async fn compare_players<S: PlayerStore + ?Sized>(
    store: &S,
    pair: &PlayerPair,
) -> Result<ComparisonResult, CompareError> {
    let (p1, p2) = lookup_pair(store, &pair.player1_id, &pair.player2_id).await?;
    let result = ComparisonResult::build(&p1, &p2);
    info!(
        "Compared {} vs {} ({} insight(s))",
        p1.name,
        p2.name,
        result.insights.len()
    );
    Ok(result)
}
