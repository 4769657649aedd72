use sqlx::PgConnection;
use uuid::Uuid;

use crate::error::Result;

const LOCK_SQL: &str = "SELECT pg_advisory_xact_lock($1)";

/// Serializes the read-arbitrate-write sequence per round. Two submissions
/// racing on the same round would otherwise each arbitrate over a stale
/// snapshot.
///
/// The lock is transaction-scoped and must be taken on the transaction that
/// carries the guarded writes: commit, rollback and a dropped (cancelled)
/// request all release it, so an abandoned request can never wedge the round.
pub(crate) async fn lock_round(conn: &mut PgConnection, game_id: Uuid) -> Result<()> {
    sqlx::query(LOCK_SQL)
        .bind(lock_key(game_id))
        .execute(conn)
        .await?;

    Ok(())
}

fn lock_key(game_id: Uuid) -> i64 {
    let bits = game_id.as_u128();
    ((bits >> 64) ^ bits) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_is_transaction_scoped() {
        // A session-level pg_advisory_lock outlives a cancelled request when
        // its connection returns to the pool; the xact variant dies with the
        // transaction.
        assert_eq!(LOCK_SQL, "SELECT pg_advisory_xact_lock($1)");
    }

    #[test]
    fn test_lock_key_is_stable() {
        let id = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);
        assert_eq!(lock_key(id), lock_key(id));
    }

    #[test]
    fn test_lock_key_differs_across_rounds() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        assert_ne!(lock_key(a), lock_key(b));
    }
}
