//! Parameter and result types for Redmine operations
//!
//! Each operation accepts one parameter struct. The same struct is
//! deserialized from the raw MCP arguments, checked with [`Validate`], and
//! used to derive the JSON schema advertised to callers, so the schema and the
//! validator cannot drift apart.
//!
//! Optional fields are `Option`s: a field the caller left out (or sent as
//! `null`) is `None` and is never forwarded to Redmine.

use crate::error::{RedmineMcpError, Result};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, NumberValidation, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Page size used when the caller does not supply `limit`
pub const DEFAULT_LIMIT: i64 = 25;
/// Largest page size accepted
pub const MAX_LIMIT: i64 = 100;
/// Offset used when the caller does not supply `offset`
pub const DEFAULT_OFFSET: i64 = 0;

/// Local checks that serde cannot express
pub trait Validate {
    /// Check bounds and preconditions, naming the offending field on failure
    fn validate(&self, _operation: &str) -> Result<()> {
        Ok(())
    }
}

fn require_non_empty(operation: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RedmineMcpError::validation(
            operation,
            format!("{field} cannot be empty"),
        ));
    }
    Ok(())
}

/// A number strictly greater than zero
fn positive_number_schema(_gen: &mut SchemaGenerator) -> Schema {
    SchemaObject {
        instance_type: Some(InstanceType::Number.into()),
        number: Some(Box::new(NumberValidation {
            exclusive_minimum: Some(0.0),
            ..Default::default()
        })),
        ..Default::default()
    }
    .into()
}

fn require_percentage(operation: &str, field: &str, value: Option<i64>) -> Result<()> {
    match value {
        Some(v) if !(0..=100).contains(&v) => Err(RedmineMcpError::validation(
            operation,
            format!("{field} must be between 0 and 100, got {v}"),
        )),
        _ => Ok(()),
    }
}

/// Pagination shared by every list operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Pagination {
    /// Number of results to return (1-100, default: 25)
    #[schemars(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    /// Offset for pagination (default: 0)
    #[schemars(range(min = 0))]
    pub offset: Option<i64>,
}

impl Pagination {
    /// Pagination with explicit values
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// The page size that will be sent
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// The offset that will be sent
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(DEFAULT_OFFSET)
    }
}

impl Validate for Pagination {
    fn validate(&self, operation: &str) -> Result<()> {
        if let Some(limit) = self.limit {
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err(RedmineMcpError::validation(
                    operation,
                    format!("limit must be between 1 and {MAX_LIMIT}, got {limit}"),
                ));
            }
        }
        if let Some(offset) = self.offset {
            if offset < 0 {
                return Err(RedmineMcpError::validation(
                    operation,
                    format!("offset must be greater than or equal to 0, got {offset}"),
                ));
            }
        }
        Ok(())
    }
}

/// Status keywords understood by the issue listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
pub enum StatusKeyword {
    /// Only open issues
    #[schemars(rename = "open")]
    Open,
    /// Only closed issues
    #[schemars(rename = "closed")]
    Closed,
    /// Issues in any status
    #[schemars(rename = "*")]
    Any,
}

/// Issue status filter: a numeric status id or a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[schemars(untagged)]
pub enum StatusFilter {
    /// A specific status id
    Id(u64),
    /// `open`, `closed` or `*`
    Keyword(StatusKeyword),
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::Id(id) => write!(f, "{id}"),
            StatusFilter::Keyword(StatusKeyword::Open) => f.write_str("open"),
            StatusFilter::Keyword(StatusKeyword::Closed) => f.write_str("closed"),
            StatusFilter::Keyword(StatusKeyword::Any) => f.write_str("*"),
        }
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StatusFilterVisitor;

        impl Visitor<'_> for StatusFilterVisitor {
            type Value = StatusFilter;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(r#"status_id as a status id or one of "open", "closed", "*""#)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<StatusFilter, E> {
                Ok(StatusFilter::Id(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<StatusFilter, E> {
                u64::try_from(v)
                    .map(StatusFilter::Id)
                    .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<StatusFilter, E> {
                match v {
                    "open" => Ok(StatusFilter::Keyword(StatusKeyword::Open)),
                    "closed" => Ok(StatusFilter::Keyword(StatusKeyword::Closed)),
                    "*" => Ok(StatusFilter::Keyword(StatusKeyword::Any)),
                    other => Err(E::invalid_value(Unexpected::Str(other), &self)),
                }
            }
        }

        deserializer.deserialize_any(StatusFilterVisitor)
    }
}

/// Arguments for listing issues
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListIssuesParams {
    /// Filter issues by project ID
    pub project_id: Option<u64>,
    /// Filter by status ID, or use "open", "closed", or "*" for all
    pub status_id: Option<StatusFilter>,
    /// Filter issues assigned to specific user ID
    pub assigned_to_id: Option<u64>,
    /// Page selection
    #[serde(flatten)]
    pub page: Pagination,
}

impl Validate for ListIssuesParams {
    fn validate(&self, operation: &str) -> Result<()> {
        self.page.validate(operation)
    }
}

/// Arguments identifying a single issue
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IssueIdParams {
    /// The ID of the issue
    pub issue_id: u64,
}

impl Validate for IssueIdParams {}

/// Arguments for the subject search
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchIssuesParams {
    /// Text to look for inside issue subjects
    #[schemars(length(min = 1))]
    pub query: String,
    /// Page selection
    #[serde(flatten)]
    pub page: Pagination,
}

impl Validate for SearchIssuesParams {
    fn validate(&self, operation: &str) -> Result<()> {
        require_non_empty(operation, "query", &self.query)?;
        self.page.validate(operation)
    }
}

/// Arguments for list operations that only paginate
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PageParams {
    /// Page selection
    #[serde(flatten)]
    pub page: Pagination,
}

impl Validate for PageParams {
    fn validate(&self, operation: &str) -> Result<()> {
        self.page.validate(operation)
    }
}

/// Arguments identifying a single project
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProjectIdParams {
    /// The ID of the project
    pub project_id: u64,
}

impl Validate for ProjectIdParams {}

/// Arguments for project-scoped paginated listings
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProjectPageParams {
    /// The ID of the project (required)
    pub project_id: u64,
    /// Page selection
    #[serde(flatten)]
    pub page: Pagination,
}

impl Validate for ProjectPageParams {
    fn validate(&self, operation: &str) -> Result<()> {
        self.page.validate(operation)
    }
}

/// Arguments for listing time entries
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListTimeEntriesParams {
    /// Filter by project ID
    pub project_id: Option<u64>,
    /// Filter by user ID
    pub user_id: Option<u64>,
    /// Start date in YYYY-MM-DD format
    pub from: Option<String>,
    /// End date in YYYY-MM-DD format
    pub to: Option<String>,
    /// Page selection
    #[serde(flatten)]
    pub page: Pagination,
}

impl Validate for ListTimeEntriesParams {
    fn validate(&self, operation: &str) -> Result<()> {
        self.page.validate(operation)
    }
}

/// Arguments for creating an issue
///
/// Serialized as the body of the `issue` envelope; absent fields are omitted
/// so Redmine applies its own defaults.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct CreateIssueParams {
    /// The ID of the project to create the issue in
    pub project_id: u64,
    /// The title/subject of the issue
    #[schemars(length(min = 1))]
    pub subject: String,
    /// Detailed description of the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The tracker type ID (e.g., Bug, Feature, Support)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_id: Option<u64>,
    /// The status ID (e.g., New, In Progress, Resolved)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    /// The priority ID (e.g., Low, Normal, High, Urgent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,
    /// The user ID to assign the issue to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
    /// Start date in YYYY-MM-DD format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Due date in YYYY-MM-DD format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Percentage of completion (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 100))]
    pub done_ratio: Option<i64>,
}

impl Validate for CreateIssueParams {
    fn validate(&self, operation: &str) -> Result<()> {
        require_non_empty(operation, "subject", &self.subject)?;
        require_percentage(operation, "done_ratio", self.done_ratio)
    }
}

/// Sparse update for an existing issue
///
/// Only fields the caller supplied are serialized, so `done_ratio: 0` is
/// sent while an omitted `done_ratio` leaves the remote value untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct IssuePatch {
    /// Move issue to a different project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    /// Update the title/subject of the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Update the detailed description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Change the tracker type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_id: Option<u64>,
    /// Change the status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    /// Change the priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,
    /// Reassign the issue to a different user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
    /// Update start date in YYYY-MM-DD format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Update due date in YYYY-MM-DD format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Update percentage of completion (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 100))]
    pub done_ratio: Option<i64>,
    /// Add notes/comments about this update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl IssuePatch {
    /// A patch that only adds a journal note
    pub fn notes_only(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }
}

/// Arguments for updating an issue
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateIssueParams {
    /// The ID of the issue to update
    pub issue_id: u64,
    /// Fields to change
    #[serde(flatten)]
    pub patch: IssuePatch,
}

impl Validate for UpdateIssueParams {
    fn validate(&self, operation: &str) -> Result<()> {
        require_percentage(operation, "done_ratio", self.patch.done_ratio)
    }
}

/// Arguments for adding a comment
///
/// Any other field in the raw arguments is discarded during deserialization.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddCommentParams {
    /// The ID of the issue to comment on
    pub issue_id: u64,
    /// The comment text to add
    #[schemars(length(min = 1))]
    pub notes: String,
}

impl Validate for AddCommentParams {
    fn validate(&self, operation: &str) -> Result<()> {
        require_non_empty(operation, "notes", &self.notes)
    }
}

/// Arguments for logging time
///
/// Serialized as the body of the `time_entry` envelope. Redmine requires an
/// issue or a project and reports its own validation error when both are
/// missing.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct LogTimeParams {
    /// The ID of the issue to log time for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<u64>,
    /// The ID of the project to log time for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    /// The number of hours to log
    #[schemars(schema_with = "positive_number_schema")]
    pub hours: f64,
    /// The ID of the activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<u64>,
    /// Short comment for the time entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Date the time was spent (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent_on: Option<String>,
}

impl Validate for LogTimeParams {
    fn validate(&self, operation: &str) -> Result<()> {
        if !self.hours.is_finite() || self.hours <= 0.0 {
            return Err(RedmineMcpError::validation(
                operation,
                format!("hours must be a positive number, got {}", self.hours),
            ));
        }
        Ok(())
    }
}

/// Arguments for operations that take none
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

impl Validate for NoParams {}

/// Result of a write that returns no resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationOutcome {
    /// Always true; failures are reported as errors
    pub success: bool,
    /// Human-readable summary
    pub message: String,
}

impl OperationOutcome {
    /// A successful outcome with a message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// A `{id, name}` reference embedded in Redmine records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    /// Record id
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// A project membership as returned by `/projects/{id}/memberships.json`
#[derive(Debug, Clone, Deserialize)]
pub struct Membership {
    /// Membership id
    pub id: u64,
    /// Member user, absent for group memberships
    pub user: Option<NamedRef>,
    /// Member group, absent for user memberships
    pub group: Option<NamedRef>,
    /// Roles granted by this membership
    #[serde(default)]
    pub roles: Vec<Value>,
}

/// One page of project memberships
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipPage {
    /// Memberships on this page
    #[serde(default)]
    pub memberships: Vec<Membership>,
    /// Number of memberships in the project
    pub total_count: Option<u64>,
}

/// A user derived from a project membership
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectUser {
    /// User id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Membership the user was derived from
    pub membership_id: u64,
    /// Roles the user holds in the project
    pub roles: Vec<Value>,
}

/// Users of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectUserList {
    /// Users on this page of memberships
    pub users: Vec<ProjectUser>,
    /// Number of memberships in the project, including group memberships
    pub total_count: u64,
    /// Page size used
    pub limit: i64,
    /// Offset used
    pub offset: i64,
}

impl Membership {
    /// The member user with this membership's roles, `None` for groups
    pub fn into_user(self) -> Option<ProjectUser> {
        let user = self.user?;
        Some(ProjectUser {
            id: user.id,
            name: user.name,
            membership_id: self.id,
            roles: self.roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_pagination_defaults() {
        let page = Pagination::default();
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 0);
        assert!(page.validate("get_issues").is_ok());
    }

    #[test]
    fn test_pagination_error_names_field() {
        let err = Pagination::new(0, 0).validate("get_projects").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid arguments for get_projects: limit must be between 1 and 100, got 0"
        );

        let err = Pagination::new(10, -1).validate("get_projects").unwrap_err();
        assert!(err.to_string().contains("offset"));
    }

    proptest! {
        #[test]
        fn test_limit_accepted_exactly_within_bounds(limit in -1000i64..1000) {
            let page = Pagination { limit: Some(limit), offset: None };
            prop_assert_eq!(page.validate("get_issues").is_ok(), (1..=100).contains(&limit));
        }

        #[test]
        fn test_offset_accepted_when_non_negative(offset in -1000i64..1000) {
            let page = Pagination { limit: None, offset: Some(offset) };
            prop_assert_eq!(page.validate("get_issues").is_ok(), offset >= 0);
        }
    }

    #[test]
    fn test_status_filter_accepts_ids_and_keywords() {
        let parse = |v: Value| serde_json::from_value::<StatusFilter>(v);

        assert_eq!(parse(json!(3)).unwrap(), StatusFilter::Id(3));
        assert_eq!(parse(json!("open")).unwrap().to_string(), "open");
        assert_eq!(parse(json!("closed")).unwrap().to_string(), "closed");
        assert_eq!(parse(json!("*")).unwrap().to_string(), "*");
        assert!(parse(json!("pending")).is_err());
        assert!(parse(json!(-2)).is_err());
        assert!(parse(json!(true)).is_err());
    }

    #[test]
    fn test_status_filter_inside_flattened_params() {
        let params: ListIssuesParams =
            serde_json::from_value(json!({"status_id": "*", "limit": 10})).unwrap();
        assert_eq!(
            params.status_id,
            Some(StatusFilter::Keyword(StatusKeyword::Any))
        );
        assert_eq!(params.page.limit(), 10);

        let err = serde_json::from_value::<ListIssuesParams>(json!({"status_id": "nope"}))
            .unwrap_err();
        assert!(err.to_string().contains("status_id"));
    }

    #[test]
    fn test_null_is_treated_as_absent() {
        let params: ListIssuesParams =
            serde_json::from_value(json!({"project_id": null, "limit": null})).unwrap();
        assert_eq!(params.project_id, None);
        assert_eq!(params.page.limit(), 25);
    }

    #[test]
    fn test_issue_patch_keeps_zero_done_ratio() {
        let params: UpdateIssueParams =
            serde_json::from_value(json!({"issue_id": 4, "done_ratio": 0})).unwrap();
        assert_eq!(
            serde_json::to_value(&params.patch).unwrap(),
            json!({"done_ratio": 0})
        );
    }

    #[test]
    fn test_done_ratio_bounds() {
        let params: UpdateIssueParams =
            serde_json::from_value(json!({"issue_id": 4, "done_ratio": 101})).unwrap();
        let err = params.validate("update_issue").unwrap_err();
        assert!(err.to_string().contains("done_ratio"));
    }

    #[test]
    fn test_add_comment_drops_stray_fields() {
        let params: AddCommentParams = serde_json::from_value(
            json!({"issue_id": 1, "notes": "hello", "status_id": 5, "assigned_to_id": 2}),
        )
        .unwrap();
        assert_eq!(params.issue_id, 1);
        assert_eq!(params.notes, "hello");
    }

    #[test]
    fn test_empty_strings_rejected() {
        let comment = AddCommentParams {
            issue_id: 1,
            notes: "   ".to_string(),
        };
        assert!(comment.validate("add_comment").is_err());

        let search = SearchIssuesParams {
            query: String::new(),
            page: Pagination::default(),
        };
        assert!(search.validate("search_issues").is_err());
    }

    #[test]
    fn test_hours_must_be_positive() {
        let mut params: LogTimeParams =
            serde_json::from_value(json!({"issue_id": 1, "hours": 1.5})).unwrap();
        assert!(params.validate("log_time").is_ok());

        params.hours = 0.0;
        assert!(params.validate("log_time").is_err());
        params.hours = -2.0;
        assert!(params.validate("log_time").is_err());
    }

    #[test]
    fn test_membership_projection() {
        let page: MembershipPage = serde_json::from_value(json!({
            "memberships": [
                {"id": 1, "project": {"id": 1, "name": "P"}, "user": {"id": 7, "name": "Jane"},
                 "roles": [{"id": 3, "name": "Developer"}]},
                {"id": 2, "project": {"id": 1, "name": "P"}, "group": {"id": 9, "name": "Ops"},
                 "roles": [{"id": 4, "name": "Reporter"}]}
            ],
            "total_count": 2
        }))
        .unwrap();

        let users: Vec<ProjectUser> = page
            .memberships
            .into_iter()
            .filter_map(Membership::into_user)
            .collect();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, 7);
        assert_eq!(users[0].roles, vec![json!({"id": 3, "name": "Developer"})]);
    }
}
