//! GraphQL payloads for inserting oplog entries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entry::LogEntry;

/// Mutation used to insert a single oplog entry
pub const INSERT_OPLOG_ENTRY_MUTATION: &str = r#"
mutation InsertMythicSyncLog (
    $oplog: bigint!, $startDate: timestamptz!, $sourceIp: String!,
    $tool: String!, $userContext: String!, $command: String!,
    $description: String!, $comments: String!, $operatorName: String!,
    $entry_identifier: String!, $extraFields: jsonb!
) {
    insert_oplogEntry(objects: {
        oplog: $oplog,
        startDate: $startDate,
        sourceIp: $sourceIp,
        tool: $tool,
        userContext: $userContext,
        command: $command,
        description: $description,
        comments: $comments,
        operatorName: $operatorName,
        entryIdentifier: $entry_identifier,
        extraFields: $extraFields
    }) {
        returning {
            id
        }
    }
}
"#;

/// Body of a GraphQL POST
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

/// Variables for [`INSERT_OPLOG_ENTRY_MUTATION`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOplogEntryVariables {
    pub oplog: i64,
    pub start_date: String,
    pub source_ip: String,
    pub tool: String,
    pub user_context: String,
    pub command: String,
    pub description: String,
    pub comments: String,
    pub operator_name: String,
    #[serde(rename = "entry_identifier")]
    pub entry_identifier: String,
    pub extra_fields: Map<String, Value>,
}

impl InsertOplogEntryVariables {
    pub fn from_entry(entry: &LogEntry, operator_name: &str) -> Self {
        Self {
            oplog: entry.oplog,
            start_date: entry.start_date_string(),
            source_ip: entry.source_ip.clone(),
            tool: entry.tool.clone(),
            user_context: entry.user_context.clone(),
            command: entry.command.clone(),
            description: entry.description.clone(),
            comments: entry.comments.clone().unwrap_or_default(),
            operator_name: operator_name.to_string(),
            entry_identifier: entry.entry_identifier.clone(),
            extra_fields: entry.extra_fields.clone(),
        }
    }
}

impl GraphqlRequest<InsertOplogEntryVariables> {
    /// Builds the insert mutation request for one entry
    pub fn insert_oplog_entry(entry: &LogEntry, operator_name: &str) -> Self {
        Self {
            query: INSERT_OPLOG_ENTRY_MUTATION,
            variables: InsertOplogEntryVariables::from_entry(entry, operator_name),
        }
    }
}

/// Parsed GraphQL response body
///
/// Ghostwriter (Hasura) may answer `200 OK` with an `errors` list, so the
/// presence of that key is what marks a failed mutation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub errors: Option<Value>,
}

/// Keeps `"errors": null` distinguishable from a missing key
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl GraphqlResponse {
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    /// Ids under `data.insert_oplogEntry.returning[*].id`
    pub fn returned_ids(&self) -> Vec<i64> {
        self.data
            .as_ref()
            .and_then(|data| data.pointer("/insert_oplogEntry/returning"))
            .and_then(Value::as_array)
            .map(|rows| {
                rows.iter()
                    .filter_map(|row| row.get("id").and_then(Value::as_i64))
                    .collect()
            })
            .unwrap_or_default()
    }
}
