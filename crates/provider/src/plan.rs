//! Operation dispatch: each operation type maps to a declarative plan.
//!
//! Planning is pure. It decides which relation or URL is followed, with
//! which query or body, and where the result's records and total come from;
//! [`execute_plan`](crate::execute_plan) performs it.

use halbridge_types::{
    CreateParams, DeleteParams, GetManyParams, GetManyReferenceParams, GetOneParams, ID_FIELD, ListParams, Operation, OperationKind,
    Reference, Request, UpdateParams, record_id,
};
use halbridge_util::{QueryMap, build_list_query, capitalize_first, singularize};
use serde_json::Value;

use crate::ProviderError;

/// Where a collection navigation starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// A relation advertised by the API root.
    Relation(String),
    /// An explicit URL.
    Url(String),
}

/// Where a collection response reports its total.
///
/// Resource collections and association endpoints follow different server
/// conventions, so both forms are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum TotalSource {
    /// `page.totalElements`
    PageTotalElements,
    /// A top-level numeric property, e.g. `totalBooks`.
    Property(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationPlan {
    /// Fetch a page of resources embedded under `embedded`.
    Collection {
        target: Target,
        query: QueryMap,
        embedded: String,
        total: TotalSource,
    },
    /// Fetch one resource by reference.
    Single { url: Reference },
    /// Fetch each reference concurrently; records keep the requested ids.
    Batch { urls: Vec<Reference> },
    /// POST `body` to the root's `relation`.
    Create { relation: String, body: Value },
    /// PUT `body` to `url`.
    Update { url: String, body: Value },
    /// Fetch `url`, then DELETE its `self` link, returning the fetched record.
    Delete { resource: String, url: Reference },
}

/// Produces the navigation plan for one operation's params.
pub trait PlanOperation {
    const KIND: OperationKind;

    fn plan(&self, resource: &str) -> Result<NavigationPlan, ProviderError>;
}

/// Plan any request by dispatching on its operation.
pub fn plan_request(request: &Request) -> Result<NavigationPlan, ProviderError> {
    let resource = request.resource.as_str();
    match &request.operation {
        Operation::GetList(params) => params.plan(resource),
        Operation::GetOne(params) => params.plan(resource),
        Operation::GetMany(params) => params.plan(resource),
        Operation::GetManyReference(params) => params.plan(resource),
        Operation::Create(params) => params.plan(resource),
        Operation::Update(params) => params.plan(resource),
        Operation::Delete(params) => params.plan(resource),
    }
}

impl PlanOperation for ListParams {
    const KIND: OperationKind = OperationKind::GetList;

    fn plan(&self, resource: &str) -> Result<NavigationPlan, ProviderError> {
        Ok(NavigationPlan::Collection {
            target: Target::Relation(resource.to_string()),
            query: build_list_query(self),
            embedded: resource.to_string(),
            total: TotalSource::PageTotalElements,
        })
    }
}

impl PlanOperation for GetOneParams {
    const KIND: OperationKind = OperationKind::GetOne;

    fn plan(&self, _resource: &str) -> Result<NavigationPlan, ProviderError> {
        Ok(NavigationPlan::Single { url: self.id.clone() })
    }
}

impl PlanOperation for GetManyParams {
    const KIND: OperationKind = OperationKind::GetMany;

    fn plan(&self, _resource: &str) -> Result<NavigationPlan, ProviderError> {
        Ok(NavigationPlan::Batch { urls: self.ids.clone() })
    }
}

impl PlanOperation for GetManyReferenceParams {
    const KIND: OperationKind = OperationKind::GetManyReference;

    fn plan(&self, resource: &str) -> Result<NavigationPlan, ProviderError> {
        if self.target.is_empty() {
            return Err(ProviderError::invalid_params(Self::KIND, resource, "target must not be empty"));
        }
        let mut query = build_list_query(&self.list);
        query.insert(self.target.clone(), self.id.to_value());

        Ok(NavigationPlan::Collection {
            target: Target::Url(self.id.to_string()),
            query,
            embedded: resource.to_string(),
            total: TotalSource::Property(format!("total{}", capitalize_first(resource))),
        })
    }
}

impl PlanOperation for CreateParams {
    const KIND: OperationKind = OperationKind::Create;

    fn plan(&self, resource: &str) -> Result<NavigationPlan, ProviderError> {
        Ok(NavigationPlan::Create {
            relation: resource.to_string(),
            body: Value::Object(self.data.clone()),
        })
    }
}

impl PlanOperation for UpdateParams {
    const KIND: OperationKind = OperationKind::Update;

    /// The target is the record's own self link, falling back to `params.id`.
    /// The body is the full record with `id` kept from the record itself.
    fn plan(&self, resource: &str) -> Result<NavigationPlan, ProviderError> {
        let url = self_href(&self.data)
            .map(str::to_string)
            .or_else(|| self.id.as_ref().map(Reference::to_string))
            .ok_or_else(|| ProviderError::invalid_params(Self::KIND, resource, "data has no self link and no id was given"))?;

        let mut body = self.data.clone();
        let id = record_id(&self.data)
            .cloned()
            .or_else(|| self.id.as_ref().map(Reference::to_value));
        if let Some(id) = id {
            body.insert(ID_FIELD.to_string(), id);
        }

        Ok(NavigationPlan::Update {
            url,
            body: Value::Object(body),
        })
    }
}

impl PlanOperation for DeleteParams {
    const KIND: OperationKind = OperationKind::Delete;

    fn plan(&self, resource: &str) -> Result<NavigationPlan, ProviderError> {
        Ok(NavigationPlan::Delete {
            resource: singularize(resource),
            url: self.id.clone(),
        })
    }
}

fn self_href(data: &serde_json::Map<String, Value>) -> Option<&str> {
    data.get("_links")?.get("self")?.get("href")?.as_str()
}
