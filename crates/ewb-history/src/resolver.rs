//! Cached, concurrent lookup of referenced entities

use crate::entity::ReferenceKind;
use crate::source::HistorySource;
use futures::future::join_all;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Display form of a referenced entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedReference {
    /// Primary key from the snapshot
    pub pk: String,
    /// Resolved name or the kind's placeholder
    pub display_name: String,
    /// False when the placeholder was used
    pub found: bool,
}

impl ResolvedReference {
    /// Placeholder for an unresolvable entity
    #[must_use]
    pub fn placeholder(kind: ReferenceKind, pk: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            display_name: kind.placeholder().to_string(),
            found: false,
        }
    }
}

/// Resolves primary keys to display names for one render pass
///
/// Lookups are cached by `(kind, pk)`; concurrent requests for the same key
/// share one backend call. Failures never propagate, they fall back to the
/// kind's placeholder.
#[derive(Clone)]
pub struct ReferenceResolver {
    source: Arc<dyn HistorySource>,
    cache: Cache<(ReferenceKind, String), ResolvedReference>,
}

impl ReferenceResolver {
    /// Create resolver with its own cache
    #[must_use]
    pub fn new(source: Arc<dyn HistorySource>, capacity: u64) -> Self {
        Self {
            source,
            cache: Cache::new(capacity),
        }
    }

    /// Resolve one entity
    pub async fn resolve(&self, kind: ReferenceKind, pk: &str) -> ResolvedReference {
        let source = Arc::clone(&self.source);
        self.cache
            .get_with((kind, pk.to_string()), async move {
                match source.resolve_reference(kind, pk).await {
                    Ok(Some(entity)) => ResolvedReference {
                        pk: pk.to_string(),
                        display_name: entity.display_name,
                        found: true,
                    },
                    Ok(None) => {
                        debug!(?kind, pk, "Referenced entity not found");
                        ResolvedReference::placeholder(kind, pk)
                    }
                    Err(e) => {
                        warn!(?kind, pk, error = %e, "Reference lookup failed");
                        ResolvedReference::placeholder(kind, pk)
                    }
                }
            })
            .await
    }

    /// Resolve many entities concurrently; output keeps input order
    pub async fn resolve_all<'a, I>(&self, kind: ReferenceKind, pks: I) -> Vec<ResolvedReference>
    where
        I: IntoIterator<Item = &'a str>,
    {
        join_all(pks.into_iter().map(|pk| self.resolve(kind, pk))).await
    }
}

impl fmt::Debug for ReferenceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceResolver")
            .field("cached", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}
