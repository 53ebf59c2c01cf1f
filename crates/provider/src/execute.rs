//! Plan execution against a discovered API root.

use futures_util::future::try_join_all;
use halbridge_api::Navigator;
use halbridge_types::{Reference, ResultEnvelope};
use halbridge_util::QueryMap;
use tracing::{debug, warn};

use crate::{
    NavigationPlan, ProviderError, Target, ensure_success, normalize_collection, normalize_record, read_total, with_requested_id,
};

const SELF_REL: &str = "self";

/// Perform `plan` starting from the API root `entry`.
///
/// Each navigation's status is checked before the next one is issued, so the
/// first failing step aborts the operation and no partial result is returned.
pub async fn execute_plan(entry: &Navigator, plan: NavigationPlan) -> Result<ResultEnvelope, ProviderError> {
    match plan {
        NavigationPlan::Collection {
            target,
            query,
            embedded,
            total,
        } => {
            let page = match &target {
                Target::Relation(rel) => entry.get(rel, &query).await?,
                Target::Url(url) => entry.get_url(url, &query).await?,
            };
            let page = ensure_success(page)?;
            let records = normalize_collection(page.resource(), &embedded);
            let total = read_total(page.resource(), &total).unwrap_or_else(|| {
                warn!(
                    url = %page.url(),
                    source = ?total,
                    "collection total missing; using record count"
                );
                records.len() as u64
            });
            debug!(embedded = %embedded, records = records.len(), total, "collection normalized");
            Ok(ResultEnvelope::list(records, total))
        }
        NavigationPlan::Single { url } => {
            let resource = fetch_one(entry, &url).await?;
            Ok(ResultEnvelope::single(normalize_record(resource.resource())))
        }
        NavigationPlan::Batch { urls } => {
            let fetches = urls.iter().map(|url| async move {
                let resource = fetch_one(entry, url).await?;
                Ok::<_, ProviderError>(with_requested_id(normalize_record(resource.resource()), url))
            });
            let records = try_join_all(fetches).await?;
            let total = records.len() as u64;
            Ok(ResultEnvelope::list(records, total))
        }
        NavigationPlan::Create { relation, body } => {
            let created = ensure_success(entry.post(&relation, &body).await?)?;
            if let Some(location) = created.location() {
                debug!(%location, relation = %relation, "resource created");
            }
            Ok(ResultEnvelope::single(normalize_record(created.resource())))
        }
        NavigationPlan::Update { url, body } => {
            let updated = ensure_success(entry.put_url(&url, &body).await?)?;
            Ok(ResultEnvelope::single(normalize_record(updated.resource())))
        }
        NavigationPlan::Delete { resource, url } => {
            let current = fetch_one(entry, &url).await?;
            let record = normalize_record(current.resource());
            ensure_success(current.delete(SELF_REL).await?)?;
            debug!(resource = %resource, url = %url, "resource deleted");
            Ok(ResultEnvelope::single(record))
        }
    }
}

async fn fetch_one(entry: &Navigator, url: &Reference) -> Result<Navigator, ProviderError> {
    ensure_success(entry.get_url(url, &QueryMap::new()).await?)
}
