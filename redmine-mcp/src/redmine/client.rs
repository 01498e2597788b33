//! Resource adapter for the Redmine REST API
//!
//! Every method performs exactly one call through the transport and either
//! returns the reshaped payload or an error annotated with the operation and
//! the ids involved. Nothing is retried and nothing is cached.

use crate::config::RedmineConfig;
use crate::error::{RedmineMcpError, Result};
use crate::redmine::transport::{HttpTransport, RedmineTransport, RemoteRequest};
use crate::redmine::types::{
    CreateIssueParams, IssuePatch, ListIssuesParams, ListTimeEntriesParams, LogTimeParams,
    MembershipPage, OperationOutcome, Pagination, ProjectUserList, SearchIssuesParams,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Expanded detail requested for single issues
pub const ISSUE_INCLUDES: &str = "journals,attachments,relations";

/// Client for the subset of the Redmine API exposed as tools
#[derive(Clone)]
pub struct RedmineClient {
    transport: Arc<dyn RedmineTransport>,
}

impl std::fmt::Debug for RedmineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedmineClient").finish_non_exhaustive()
    }
}

impl RedmineClient {
    /// Create a client over any transport
    pub fn new(transport: Arc<dyn RedmineTransport>) -> Self {
        Self { transport }
    }

    /// Create a client that talks HTTP to the configured instance
    pub fn from_config(config: &RedmineConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    async fn call(&self, operation: String, request: RemoteRequest) -> Result<Value> {
        self.transport.send(request).await.map_err(|e| {
            let err = e.in_operation(operation);
            tracing::warn!("{}", err);
            err
        })
    }

    /// Like [`Self::call`], but a 404 means the project does not exist
    async fn call_for_project(
        &self,
        operation: String,
        project_id: u64,
        request: RemoteRequest,
    ) -> Result<Value> {
        match self.transport.send(request).await {
            Err(e) if e.remote_status() == Some(404) => {
                let err = RedmineMcpError::NotFound {
                    resource: "project",
                    id: project_id,
                };
                tracing::warn!("{}: {}", operation, err);
                Err(err)
            }
            result => result.map_err(|e| {
                let err = e.in_operation(operation);
                tracing::warn!("{}", err);
                err
            }),
        }
    }

    fn paginate(request: RemoteRequest, page: &Pagination) -> RemoteRequest {
        request
            .query("limit", page.limit())
            .query("offset", page.offset())
    }

    /// List issues, forwarding only the filters that were supplied
    pub async fn list_issues(&self, params: &ListIssuesParams) -> Result<Value> {
        let request = RemoteRequest::get("/issues.json")
            .query_opt("project_id", params.project_id)
            .query_opt("status_id", params.status_id)
            .query_opt("assigned_to_id", params.assigned_to_id);
        let request = Self::paginate(request, &params.page);
        self.call("get_issues".to_string(), request).await
    }

    /// Fetch one issue with journals, attachments and relations
    pub async fn get_issue(&self, issue_id: u64) -> Result<Value> {
        let request = RemoteRequest::get(format!("/issues/{issue_id}.json"))
            .query("include", ISSUE_INCLUDES);
        let operation = format!("get_issue (issue {issue_id})");
        let response = self.call(operation.clone(), request).await?;
        take_envelope(response, "issue", &operation)
    }

    /// Substring match on issue subjects
    ///
    /// Redmine has no relevance search on this endpoint; the query becomes a
    /// `subject=~{query}` contains filter.
    pub async fn search_issues(&self, params: &SearchIssuesParams) -> Result<Value> {
        let request =
            RemoteRequest::get("/issues.json").query("subject", format!("~{}", params.query));
        let request = Self::paginate(request, &params.page);
        self.call("search_issues".to_string(), request).await
    }

    /// List projects
    pub async fn list_projects(&self, page: &Pagination) -> Result<Value> {
        let request = Self::paginate(RemoteRequest::get("/projects.json"), page);
        self.call("get_projects".to_string(), request).await
    }

    /// Fetch one project
    pub async fn get_project(&self, project_id: u64) -> Result<Value> {
        let operation = format!("get_project (project {project_id})");
        let request = RemoteRequest::get(format!("/projects/{project_id}.json"));
        let response = self
            .call_for_project(operation.clone(), project_id, request)
            .await?;
        take_envelope(response, "project", &operation)
    }

    /// Raw membership records of a project
    pub async fn list_project_members(&self, project_id: u64, page: &Pagination) -> Result<Value> {
        let request = Self::paginate(
            RemoteRequest::get(format!("/projects/{project_id}/memberships.json")),
            page,
        );
        self.call_for_project(
            format!("get_project_members (project {project_id})"),
            project_id,
            request,
        )
        .await
    }

    /// Versions (milestones) of a project
    pub async fn list_project_versions(&self, project_id: u64) -> Result<Value> {
        let operation = format!("get_project_versions (project {project_id})");
        let request = RemoteRequest::get(format!("/projects/{project_id}/versions.json"));
        let response = self
            .call_for_project(operation.clone(), project_id, request)
            .await?;
        let versions = take_envelope(response, "versions", &operation)?;
        let total_count = versions.as_array().map(Vec::len).unwrap_or(0);
        Ok(json!({ "versions": versions, "total_count": total_count }))
    }

    /// Users of a project, derived from its memberships
    ///
    /// Group memberships carry no user and are skipped.
    pub async fn list_project_users(
        &self,
        project_id: u64,
        page: &Pagination,
    ) -> Result<ProjectUserList> {
        let operation = format!("get_users (project {project_id})");
        let request = Self::paginate(
            RemoteRequest::get(format!("/projects/{project_id}/memberships.json")),
            page,
        );
        let response = self
            .call_for_project(operation.clone(), project_id, request)
            .await?;

        let page_data: MembershipPage = serde_json::from_value(response)
            .map_err(|e| RedmineMcpError::from(e).in_operation(operation))?;
        let total_count = page_data
            .total_count
            .unwrap_or(page_data.memberships.len() as u64);
        let users = page_data
            .memberships
            .into_iter()
            .filter_map(|membership| membership.into_user())
            .collect();

        Ok(ProjectUserList {
            users,
            total_count,
            limit: page.limit(),
            offset: page.offset(),
        })
    }

    /// List time entries, forwarding only the filters that were supplied
    pub async fn list_time_entries(&self, params: &ListTimeEntriesParams) -> Result<Value> {
        let request = RemoteRequest::get("/time_entries.json")
            .query_opt("project_id", params.project_id)
            .query_opt("user_id", params.user_id)
            .query_opt("from", params.from.as_deref())
            .query_opt("to", params.to.as_deref());
        let request = Self::paginate(request, &params.page);
        self.call("get_time_entries".to_string(), request).await
    }

    /// Create an issue and return it as stored by Redmine
    pub async fn create_issue(&self, params: &CreateIssueParams) -> Result<Value> {
        let operation = format!("create_issue (project {})", params.project_id);
        let request = RemoteRequest::post("/issues.json", json!({ "issue": params }));
        let response = self.call(operation.clone(), request).await?;
        let issue = take_envelope(response, "issue", &operation)?;
        tracing::info!(
            "Created issue {} in project {}",
            &issue["id"],
            params.project_id
        );
        Ok(issue)
    }

    /// Apply a sparse patch to an issue
    pub async fn update_issue(&self, issue_id: u64, patch: &IssuePatch) -> Result<OperationOutcome> {
        let request =
            RemoteRequest::put(format!("/issues/{issue_id}.json"), json!({ "issue": patch }));
        self.call(format!("update_issue (issue {issue_id})"), request)
            .await?;
        tracing::info!("Updated issue {}", issue_id);
        Ok(OperationOutcome::ok(format!(
            "Issue {issue_id} updated successfully"
        )))
    }

    /// Add a journal note without touching any other field
    pub async fn add_comment(&self, issue_id: u64, notes: &str) -> Result<OperationOutcome> {
        let patch = IssuePatch::notes_only(notes);
        let request =
            RemoteRequest::put(format!("/issues/{issue_id}.json"), json!({ "issue": patch }));
        self.call(format!("add_comment (issue {issue_id})"), request)
            .await?;
        tracing::info!("Added comment to issue {} ({} chars)", issue_id, notes.len());
        Ok(OperationOutcome::ok(format!(
            "Comment added to issue {issue_id}"
        )))
    }

    /// Delete an issue; this cannot be undone
    pub async fn delete_issue(&self, issue_id: u64) -> Result<OperationOutcome> {
        let request = RemoteRequest::delete(format!("/issues/{issue_id}.json"));
        self.call(format!("delete_issue (issue {issue_id})"), request)
            .await?;
        tracing::info!("Deleted issue {}", issue_id);
        Ok(OperationOutcome::ok(format!(
            "Issue {issue_id} deleted successfully"
        )))
    }

    /// Log spent time against an issue or a project
    pub async fn log_time(&self, params: &LogTimeParams) -> Result<Value> {
        let operation = match (params.issue_id, params.project_id) {
            (Some(issue_id), _) => format!("log_time (issue {issue_id})"),
            (None, Some(project_id)) => format!("log_time (project {project_id})"),
            (None, None) => "log_time".to_string(),
        };
        let request = RemoteRequest::post("/time_entries.json", json!({ "time_entry": params }));
        let response = self.call(operation.clone(), request).await?;
        take_envelope(response, "time_entry", &operation)
    }

    /// Time entry activities (Design, Development, ...)
    pub async fn list_time_entry_activities(&self) -> Result<Value> {
        let request = RemoteRequest::get("/enumerations/time_entry_activities.json");
        self.call("get_time_entry_activities".to_string(), request)
            .await
    }
}

fn take_envelope(response: Value, key: &str, operation: &str) -> Result<Value> {
    match response {
        Value::Object(mut map) => map.remove(key),
        _ => None,
    }
    .ok_or_else(|| {
        RedmineMcpError::Transport(format!("Response has no '{key}' field"))
            .in_operation(operation)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redmine::mock_transport::MockTransport;
    use crate::redmine::types::StatusFilter;
    use reqwest::Method;

    fn client_with_mock() -> (RedmineClient, MockTransport) {
        let transport = MockTransport::new();
        (RedmineClient::new(Arc::new(transport.clone())), transport)
    }

    fn query_of(request: &RemoteRequest) -> Vec<(&str, &str)> {
        request
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[tokio::test]
    async fn test_list_issues_sends_only_supplied_filters() {
        let (client, transport) = client_with_mock();
        let params = ListIssuesParams {
            status_id: Some(StatusFilter::Id(2)),
            ..Default::default()
        };

        client.list_issues(&params).await.unwrap();

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/issues.json");
        assert_eq!(
            query_of(&request),
            vec![("status_id", "2"), ("limit", "25"), ("offset", "0")]
        );
    }

    #[tokio::test]
    async fn test_get_issue_requests_expanded_detail_and_unwraps() {
        let (client, transport) = client_with_mock();
        transport
            .push_json(json!({"issue": {"id": 5, "subject": "Crash"}}))
            .await;

        let issue = client.get_issue(5).await.unwrap();
        assert_eq!(issue, json!({"id": 5, "subject": "Crash"}));

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.path, "/issues/5.json");
        assert_eq!(
            request.query_value("include"),
            Some("journals,attachments,relations")
        );
    }

    #[tokio::test]
    async fn test_remote_error_is_annotated() {
        let (client, transport) = client_with_mock();
        transport.push_status(500, "Internal error").await;

        let err = client.get_issue(5).await.unwrap_err();
        assert_eq!(err.remote_status(), Some(500));
        assert!(err.to_string().contains("get_issue (issue 5)"));
        assert!(err.to_string().contains("Internal error"));
    }

    #[tokio::test]
    async fn test_issue_404_is_not_translated() {
        let (client, transport) = client_with_mock();
        transport.push_status(404, "").await;

        let err = client.get_issue(8).await.unwrap_err();
        assert_eq!(err.remote_status(), Some(404));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_project_404_becomes_not_found() {
        let (client, transport) = client_with_mock();
        transport.push_status(404, "").await;

        let err = client.get_project(99).await.unwrap_err();
        assert!(matches!(
            err,
            RedmineMcpError::NotFound {
                resource: "project",
                id: 99
            }
        ));
        assert!(err.to_string().contains("99"));
    }

    #[tokio::test]
    async fn test_project_users_from_memberships() {
        let (client, transport) = client_with_mock();
        transport
            .push_json(json!({
                "memberships": [
                    {"id": 11, "user": {"id": 7, "name": "Jane Doe"},
                     "roles": [{"id": 3, "name": "Developer"}]}
                ],
                "total_count": 1, "offset": 0, "limit": 25
            }))
            .await;

        let list = client
            .list_project_users(1, &Pagination::default())
            .await
            .unwrap();

        assert_eq!(list.users.len(), 1);
        assert_eq!(list.users[0].id, 7);
        assert_eq!(list.users[0].membership_id, 11);
        assert_eq!(list.users[0].roles, vec![json!({"id": 3, "name": "Developer"})]);

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.path, "/projects/1/memberships.json");
    }

    #[tokio::test]
    async fn test_project_users_404() {
        let (client, transport) = client_with_mock();
        transport.push_status(404, "").await;

        let err = client
            .list_project_users(42, &Pagination::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Project 42 not found");
    }

    #[tokio::test]
    async fn test_versions_total_count_is_computed() {
        let (client, transport) = client_with_mock();
        transport
            .push_json(json!({"versions": [{"id": 1}, {"id": 2}], "total_count": 10}))
            .await;

        let result = client.list_project_versions(3).await.unwrap();
        assert_eq!(result["total_count"], json!(2));
        assert_eq!(result["versions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_issue_omits_absent_fields() {
        let (client, transport) = client_with_mock();
        transport
            .push_json(json!({"issue": {"id": 100, "subject": "New"}}))
            .await;

        let params: CreateIssueParams =
            serde_json::from_value(json!({"project_id": 1, "subject": "New", "priority_id": 4}))
                .unwrap();
        let issue = client.create_issue(&params).await.unwrap();
        assert_eq!(issue["id"], json!(100));

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.body,
            Some(json!({"issue": {"project_id": 1, "subject": "New", "priority_id": 4}}))
        );
    }

    #[tokio::test]
    async fn test_update_issue_sends_sparse_patch() {
        let (client, transport) = client_with_mock();
        transport.push_json(Value::Null).await;

        let patch = IssuePatch {
            done_ratio: Some(0),
            ..Default::default()
        };
        let outcome = client.update_issue(3, &patch).await.unwrap();
        assert_eq!(outcome.message, "Issue 3 updated successfully");

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.body, Some(json!({"issue": {"done_ratio": 0}})));
    }

    #[tokio::test]
    async fn test_add_comment_sends_only_notes() {
        let (client, transport) = client_with_mock();

        let outcome = client.add_comment(1, "hello").await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.message, "Comment added to issue 1");

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.body, Some(json!({"issue": {"notes": "hello"}})));
    }

    #[tokio::test]
    async fn test_delete_issue() {
        let (client, transport) = client_with_mock();

        let outcome = client.delete_issue(9).await.unwrap();
        assert_eq!(outcome.message, "Issue 9 deleted successfully");

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "/issues/9.json");
    }

    #[tokio::test]
    async fn test_log_time_propagates_remote_validation() {
        let (client, transport) = client_with_mock();
        transport
            .push_status(422, r#"{"errors":["Issue is invalid"]}"#)
            .await;

        let params: LogTimeParams = serde_json::from_value(json!({"hours": 2})).unwrap();
        let err = client.log_time(&params).await.unwrap_err();
        assert_eq!(err.remote_status(), Some(422));
        assert!(err.to_string().contains("Issue is invalid"));

        let request = transport.last_request().await.unwrap();
        assert_eq!(request.body, Some(json!({"time_entry": {"hours": 2.0}})));
    }

    #[tokio::test]
    async fn test_missing_envelope_is_an_error() {
        let (client, transport) = client_with_mock();
        transport.push_json(json!({"unexpected": true})).await;

        let err = client.get_issue(1).await.unwrap_err();
        assert!(err.to_string().contains("'issue'"));
    }
}
