//! Fan-out/fan-in across audit domains.
//!
//! Every requested domain gets its own task and its own time budget; no
//! domain's failure (or panic) keeps the others from reporting, and the merge
//! step is the single writer into the final result sequence. Results come
//! back in request order so the report shape is stable across runs.

use std::time::Duration;

use log::{debug, warn};

use crate::collect::{collector_for, Collector, CollectorContext};
use crate::error_handling::CollectorError;
use crate::models::{AuditDomain, CollectionResult};

/// Runs all requested domains concurrently and merges their results.
///
/// Always returns exactly one result per domain, in the order requested;
/// a consumer can rely on every domain appearing even when it failed.
pub async fn collect_all(
    domains: &[AuditDomain],
    ctx: &CollectorContext,
    domain_budget: Duration,
) -> Vec<CollectionResult> {
    let handles: Vec<_> = domains
        .iter()
        .map(|&domain| {
            let ctx = ctx.clone();
            (
                domain,
                tokio::spawn(async move { run_domain(domain, &ctx, domain_budget).await }),
            )
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (domain, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(join_error) => {
                warn!("{domain} collector task panicked: {join_error}");
                CollectionResult::failure(
                    domain,
                    &ctx.os,
                    format!("collector task panicked: {join_error}"),
                )
            }
        };
        results.push(result);
    }
    results
}

async fn run_domain(
    domain: AuditDomain,
    ctx: &CollectorContext,
    domain_budget: Duration,
) -> CollectionResult {
    debug!("collecting {domain} on {}", ctx.os);
    let collector = match collector_for(domain, &ctx.os) {
        Ok(collector) => collector,
        Err(error) => return CollectionResult::failure(domain, &ctx.os, error),
    };
    run_collector(collector, ctx, domain_budget).await
}

/// Runs one collector under the domain's overall budget. A stalled collector
/// degrades to a timeout error result, never a crash.
async fn run_collector(
    collector: Box<dyn Collector>,
    ctx: &CollectorContext,
    domain_budget: Duration,
) -> CollectionResult {
    let domain = collector.domain();
    match tokio::time::timeout(domain_budget, collector.collect(ctx)).await {
        Ok(result) => result,
        Err(_) => CollectionResult::failure(
            domain,
            &ctx.os,
            CollectorError::DomainTimeout {
                domain,
                seconds: domain_budget.as_secs(),
            },
        ),
    }
}
