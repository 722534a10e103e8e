use tracing::{debug, warn};

use crate::db::models::Player;
use crate::db::PlayerStore;

use super::CompareError;

/// Resolve two ids to their records, returned in request order.
///
/// Anything other than exactly two rows is a `NotFound`, whether an id is
/// missing or the same id was sent twice. Store failures pass through as-is.
pub async fn lookup_pair<S: PlayerStore + ?Sized>(
    store: &S,
    player1_id: &str,
    player2_id: &str,
) -> Result<(Player, Player), CompareError> {
    let mut players = store.find_by_ids(&[player1_id, player2_id]).await?;
    debug!("Player lookup returned {} row(s)", players.len());

    if players.len() != 2 {
        warn!(
            "Lookup for {} / {} returned {} row(s), expected 2",
            player1_id,
            player2_id,
            players.len()
        );
        return Err(CompareError::NotFound {
            found: players.len(),
        });
    }

    // Two rows that don't line up with the requested ids.
    let first = players
        .iter()
        .position(|p| p.id == player1_id)
        .ok_or(CompareError::NotFound { found: 2 })?;
    let player1 = players.swap_remove(first);
    let player2 = players
        .pop()
        .filter(|p| p.id == player2_id)
        .ok_or(CompareError::NotFound { found: 2 })?;

    Ok((player1, player2))
}
