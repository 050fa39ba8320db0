//! Material resolution against the catalog.
//!
//! Each extracted material is matched to its best-scoring catalog candidate.
//! Resolution never fails a task: missing candidates, missing prices,
//! upstream errors, and timeouts all degrade to an unresolved price, which
//! the confidence score accounts for.

use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::MaterialCatalog;

use super::extract::ExtractedMaterial;
use super::types::{Material, UnitPrice};

/// Candidates requested from the catalog per material.
const CANDIDATE_COUNT: usize = 3;

/// Resolves extracted materials to priced catalog entries.
pub struct MaterialResolver {
    catalog: Arc<dyn MaterialCatalog>,
    concurrency: usize,
    timeout: Duration,
}

impl MaterialResolver {
    /// Create a resolver with a concurrency bound and per-call timeout.
    pub fn new(catalog: Arc<dyn MaterialCatalog>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            catalog,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    /// Resolve all materials of a task concurrently, preserving input order.
    pub async fn resolve_all(&self, wanted: &[ExtractedMaterial]) -> Vec<Material> {
        futures::stream::iter(wanted.iter().cloned().map(|w| {
            let catalog = Arc::clone(&self.catalog);
            let timeout = self.timeout;
            Self::resolve_one(catalog, timeout, w)
        }))
        .buffered(self.concurrency)
        .collect()
        .await
    }

    /// Resolve a single material to its best catalog match.
    async fn resolve_one(
        catalog: Arc<dyn MaterialCatalog>,
        timeout: Duration,
        wanted: ExtractedMaterial,
    ) -> Material {
        let search = catalog.search(&wanted.name, CANDIDATE_COUNT);

        let unit_price = match tokio::time::timeout(timeout, search).await {
            Ok(Ok(candidates)) => match candidates.first().and_then(|c| c.price) {
                Some(price) => UnitPrice::Resolved(price),
                None => {
                    tracing::debug!("No priced catalog match for {:?}", wanted.name);
                    UnitPrice::Unresolved
                }
            },
            Ok(Err(e)) => {
                tracing::warn!("Catalog search failed for {:?}: {:#}", wanted.name, e);
                UnitPrice::Unresolved
            }
            Err(_) => {
                tracing::warn!(
                    "Catalog search for {:?} timed out after {:?}",
                    wanted.name,
                    timeout
                );
                UnitPrice::Unresolved
            }
        };

        Material {
            name: wanted.name.clone(),
            quantity: wanted.quantity,
            unit: wanted.unit.clone(),
            unit_price,
        }
    }
}
