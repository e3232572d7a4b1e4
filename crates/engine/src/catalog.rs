//! Lootbox catalog listing with the static fallback

use miniloot_core::{Lootbox, Result};
use miniloot_networking::MiniAppClient;
use tracing::warn;

/// The documented fallback catalog.
///
/// Substituted whenever the backend cannot produce a catalog, so the
/// presentation layer always has something renderable. Stable across calls.
pub fn fallback_catalog() -> Vec<Lootbox> {
    vec![
        Lootbox::new(
            "lb-demo-1",
            "Bronze Box",
            200,
            vec![
                "Small Coil".to_string(),
                "Sticker".to_string(),
                "5% off".to_string(),
            ],
        ),
        Lootbox::new(
            "lb-demo-2",
            "Silver Box",
            500,
            vec![
                "Pod".to_string(),
                "E-liquid 10ml".to_string(),
                "10% off".to_string(),
            ],
        ),
        Lootbox::new(
            "lb-demo-3",
            "Gold Box",
            1000,
            vec![
                "Battery".to_string(),
                "E-liquid 50ml".to_string(),
                "20% off".to_string(),
            ],
        ),
    ]
}

/// Fetch the lootbox catalog.
///
/// With no client configured, or when the fetch fails, the fallback catalog
/// is substituted instead of failing the caller. An empty catalog from a
/// healthy backend is substituted too, so the result is never empty.
pub async fn list_lootboxes(client: Option<&MiniAppClient>) -> Result<Vec<Lootbox>> {
    let Some(client) = client else {
        return Ok(fallback_catalog());
    };

    match client.get_lootboxes().await {
        Ok(catalog) if !catalog.is_empty() => Ok(catalog),
        Ok(_) => {
            warn!("Backend returned an empty catalog, substituting fallback");
            Ok(fallback_catalog())
        }
        Err(e) => {
            warn!("Catalog fetch failed, substituting fallback: {}", e);
            Ok(fallback_catalog())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniloot_core::CallerIdentity;

    #[test]
    fn test_fallback_catalog_is_renderable() {
        let catalog = fallback_catalog();
        assert!(!catalog.is_empty());
        for lootbox in &catalog {
            assert!(!lootbox.prize_pool.is_empty());
            assert!(lootbox.cost_xp.as_u64() > 0);
        }
    }

    #[test]
    fn test_fallback_catalog_stable_across_calls() {
        assert_eq!(fallback_catalog(), fallback_catalog());
    }

    #[tokio::test]
    async fn test_no_client_yields_fallback() {
        let catalog = list_lootboxes(None).await.unwrap();
        assert_eq!(catalog, fallback_catalog());
    }

    #[tokio::test]
    async fn test_unreachable_backend_yields_fallback() {
        // nothing listens on port 9; the fetch fails fast
        let client = MiniAppClient::new("http://127.0.0.1:9", CallerIdentity::anonymous());
        let catalog = list_lootboxes(Some(&client)).await.unwrap();
        assert_eq!(catalog, fallback_catalog());
    }
}
