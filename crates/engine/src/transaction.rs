//! The lootbox open-transaction
//!
//! One call is one independent spend attempt: affordability is checked
//! against the balance the caller passes in, before any side effect, and
//! there is no implicit retry. The engine never holds the balance itself;
//! the caller owns its cached copy and re-renders from the returned
//! outcome.

use miniloot_core::{Error, Lootbox, OpenOutcome, Result, UserBalance};
use miniloot_networking::MiniAppClient;
use rand::Rng;
use tracing::{debug, info};

/// Executes open-transactions against the backend, or locally when no
/// backend is configured (the offline degraded mode).
pub struct TransactionEngine {
    client: Option<MiniAppClient>,
}

impl TransactionEngine {
    /// Engine backed by the HTTP client; the backend arbitrates every spend
    pub fn online(client: MiniAppClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Engine with no backend; spends are simulated against the caller's
    /// cached balance so the widget stays interactive during an outage
    pub fn offline() -> Self {
        Self { client: None }
    }

    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    /// Spend `lootbox.cost_xp` from `balance` and draw one prize.
    ///
    /// Fails with `InsufficientFunds` exactly when the cached balance cannot
    /// cover the cost, before anything is sent or mutated. In online mode
    /// the backend re-checks against its authoritative balance (the cached
    /// copy may be stale) and its `remaining_xp` wins; in offline mode the
    /// result is computed locally with the same arithmetic.
    pub async fn open_lootbox(
        &self,
        lootbox: &Lootbox,
        balance: &UserBalance,
    ) -> Result<OpenOutcome> {
        if balance.xp < lootbox.cost_xp {
            return Err(Error::insufficient_funds(lootbox.cost_xp, balance.xp));
        }
        if lootbox.prize_pool.is_empty() {
            return Err(Error::EmptyPrizePool);
        }

        match &self.client {
            Some(client) => {
                let outcome = client.open_lootbox(&lootbox.id).await?;
                info!(
                    "Opened {}: won '{}', {} XP remaining",
                    lootbox.id, outcome.prize, outcome.remaining_xp
                );
                Ok(outcome)
            }
            None => self.open_locally(lootbox, balance),
        }
    }

    /// Offline spend: uniform draw over the prize pool, remaining balance by
    /// the same subtraction the backend applies.
    fn open_locally(&self, lootbox: &Lootbox, balance: &UserBalance) -> Result<OpenOutcome> {
        let remaining_xp = balance
            .xp
            .checked_sub(lootbox.cost_xp)
            .ok_or_else(|| Error::insufficient_funds(lootbox.cost_xp, balance.xp))?;

        let index = rand::thread_rng().gen_range(0..lootbox.prize_pool.len());
        let prize = lootbox.prize_pool[index].clone();

        debug!(
            "Local draw for {}: '{}' ({} XP remaining)",
            lootbox.id, prize, remaining_xp
        );

        Ok(OpenOutcome { prize, remaining_xp })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniloot_core::{UserId, Xp};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("miniloot_engine=debug")
            .try_init();
    }

    fn balance(xp: u64) -> UserBalance {
        UserBalance::new(UserId::new("7"), Xp::new(xp))
    }

    fn demo_box() -> Lootbox {
        Lootbox::new("lb-demo", "Demo Box", 200, vec!["Sticker".to_string()])
    }

    #[tokio::test]
    async fn test_open_single_prize_pool_is_deterministic() {
        init_tracing();
        let engine = TransactionEngine::offline();

        let outcome = engine.open_lootbox(&demo_box(), &balance(500)).await.unwrap();

        assert_eq!(outcome.prize, "Sticker");
        assert_eq!(outcome.remaining_xp, Xp::new(300));
    }

    #[tokio::test]
    async fn test_exact_cost_then_second_open_fails() {
        let engine = TransactionEngine::offline();
        let lootbox = Lootbox::new("lb-1000", "Gold Box", 1000, vec!["Battery".to_string()]);

        let outcome = engine.open_lootbox(&lootbox, &balance(1000)).await.unwrap();
        assert_eq!(outcome.remaining_xp, Xp::new(0));

        // the caller re-renders from the outcome, then tries again
        let updated = balance(1000).with_xp(outcome.remaining_xp);
        let err = engine.open_lootbox(&lootbox, &updated).await.unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds(_)));
    }

    #[tokio::test]
    async fn test_insufficient_funds_reports_amounts() {
        let engine = TransactionEngine::offline();

        let err = engine.open_lootbox(&demo_box(), &balance(150)).await.unwrap_err();

        match err {
            Error::InsufficientFunds(detail) => {
                assert!(detail.contains("200"));
                assert!(detail.contains("150"));
            }
            other => panic!("expected InsufficientFunds, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_prize_pool_rejected() {
        let engine = TransactionEngine::offline();
        let empty = Lootbox::new("lb-empty", "Hollow Box", 100, Vec::new());

        let err = engine.open_lootbox(&empty, &balance(500)).await.unwrap_err();
        assert!(matches!(err, Error::EmptyPrizePool));
    }

    #[tokio::test]
    async fn test_unaffordable_empty_box_fails_on_funds_first() {
        // affordability decides before the pool is even looked at
        let engine = TransactionEngine::offline();
        let empty = Lootbox::new("lb-empty", "Hollow Box", 100, Vec::new());

        let err = engine.open_lootbox(&empty, &balance(50)).await.unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds(_)));
    }

    #[tokio::test]
    async fn test_prize_always_drawn_from_pool() {
        let engine = TransactionEngine::offline();
        let lootbox = Lootbox::new(
            "lb-3",
            "Bronze Box",
            10,
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
        );

        for _ in 0..50 {
            let outcome = engine.open_lootbox(&lootbox, &balance(1000)).await.unwrap();
            assert!(lootbox.prize_pool.contains(&outcome.prize));
            assert_eq!(outcome.remaining_xp, Xp::new(990));
        }
    }

    #[tokio::test]
    async fn test_spends_are_independent() {
        // two opens against the same passed-in balance both succeed with the
        // same arithmetic: the engine holds no state between calls
        let engine = TransactionEngine::offline();
        let lootbox = demo_box();
        let cached = balance(500);

        let first = engine.open_lootbox(&lootbox, &cached).await.unwrap();
        let second = engine.open_lootbox(&lootbox, &cached).await.unwrap();

        assert_eq!(first.remaining_xp, Xp::new(300));
        assert_eq!(second.remaining_xp, Xp::new(300));
    }
}
