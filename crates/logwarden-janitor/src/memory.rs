//! In-memory logging service
//!
//! Deterministic stand-in for the remote service: paginates with key-based cursors,
//! applies mutations to its own state, records every call, and fails on demand.
//! Used by the test suites and for offline runs of the binary.

use async_trait::async_trait;
use logwarden_domain::{LogGroup, LogService, LogStream, Page, StreamOrder};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Error returned by [`InMemoryLogService`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct MemoryServiceError(pub String);

/// A call received by the in-memory service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    /// `list_log_groups`
    ListGroups {
        /// Cursor passed in
        cursor: Option<String>,
    },
    /// `list_log_streams`
    ListStreams {
        /// Group listed
        group: String,
        /// Cursor passed in
        cursor: Option<String>,
        /// Requested order
        order: StreamOrder,
    },
    /// `put_retention_policy`
    PutRetention {
        /// Group updated
        group: String,
        /// Retention requested
        days: i32,
    },
    /// `delete_log_stream`
    DeleteStream {
        /// Owning group
        group: String,
        /// Stream deleted
        stream: String,
    },
    /// `delete_log_group`
    DeleteGroup {
        /// Group deleted
        group: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Fault {
    ListGroups,
    ListStreams(String),
    PutRetention(String),
    DeleteStream(String, String),
    DeleteGroup(String),
}

#[derive(Debug, Default)]
struct GroupRecord {
    retention: Option<i32>,
    streams: Vec<LogStream>,
}

#[derive(Debug, Default)]
struct State {
    groups: BTreeMap<String, GroupRecord>,
    faults: HashSet<Fault>,
    calls: Vec<ServiceCall>,
}

/// Logging service held entirely in memory
///
/// # Examples
///
/// ```
/// use logwarden_janitor::InMemoryLogService;
/// use logwarden_domain::{LogService, LogStream};
///
/// # #[tokio::main]
/// # async fn main() {
/// let service = InMemoryLogService::new()
///     .with_group("/aws/lambda/api", None, vec![LogStream::new("2024/01/01", Some(0))]);
///
/// let page = service.list_log_groups(None, 50).await.unwrap();
/// assert_eq!(page.items.len(), 1);
/// assert!(page.next_cursor.is_none());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLogService {
    state: Mutex<State>,
}

impl InMemoryLogService {
    /// Create an empty account
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group with the given retention and streams
    pub fn with_group(self, name: &str, retention: Option<i32>, streams: Vec<LogStream>) -> Self {
        self.lock()
            .groups
            .insert(name.to_string(), GroupRecord { retention, streams });
        self
    }

    /// Make the group listing fail
    pub fn fail_list_groups(self) -> Self {
        self.lock().faults.insert(Fault::ListGroups);
        self
    }

    /// Make stream listings of `group` fail
    pub fn fail_list_streams(self, group: &str) -> Self {
        self.lock().faults.insert(Fault::ListStreams(group.to_string()));
        self
    }

    /// Make retention updates of `group` fail
    pub fn fail_put_retention(self, group: &str) -> Self {
        self.lock().faults.insert(Fault::PutRetention(group.to_string()));
        self
    }

    /// Make deletion of one stream fail
    pub fn fail_delete_stream(self, group: &str, stream: &str) -> Self {
        self.lock()
            .faults
            .insert(Fault::DeleteStream(group.to_string(), stream.to_string()));
        self
    }

    /// Make deletion of `group` fail
    pub fn fail_delete_group(self, group: &str) -> Self {
        self.lock().faults.insert(Fault::DeleteGroup(group.to_string()));
        self
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.clone()
    }

    /// Forget recorded calls (state and faults are kept)
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Retention updates received, as `(group, days)`
    pub fn retention_updates(&self) -> Vec<(String, i32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ServiceCall::PutRetention { group, days } => Some((group, days)),
                _ => None,
            })
            .collect()
    }

    /// Stream deletions received, as `(group, stream)`
    pub fn stream_deletions(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ServiceCall::DeleteStream { group, stream } => Some((group, stream)),
                _ => None,
            })
            .collect()
    }

    /// Group deletions received
    pub fn group_deletions(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ServiceCall::DeleteGroup { group } => Some(group),
                _ => None,
            })
            .collect()
    }

    /// Current retention of `group` (`None` if unset or the group is gone)
    pub fn retention_of(&self, group: &str) -> Option<i32> {
        self.lock().groups.get(group).and_then(|g| g.retention)
    }

    /// Whether `group` still exists
    pub fn has_group(&self, group: &str) -> bool {
        self.lock().groups.contains_key(group)
    }

    /// Names of the streams still in `group`
    pub fn stream_names(&self, group: &str) -> Vec<String> {
        self.lock()
            .groups
            .get(group)
            .map(|g| g.streams.iter().map(|s| s.name.clone()).collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Page of `items` (already sorted by `key`) resuming after the `cursor` key
///
/// Cursors name the last item handed out rather than an offset, so deleting
/// items between two page requests never makes the listing skip anything.
fn page_of<T: Clone>(
    items: &[T],
    cursor: Option<&str>,
    page_size: i32,
    key: impl Fn(&T) -> String,
) -> Page<T> {
    let start = match cursor {
        None => 0,
        Some(after) => items
            .iter()
            .position(|item| key(item).as_str() > after)
            .unwrap_or(items.len()),
    };
    let size = usize::try_from(page_size.max(1)).unwrap_or(1);
    let end = (start + size).min(items.len());
    let slice = items[start..end].to_vec();
    let next_cursor = match slice.last() {
        Some(last) if end < items.len() => Some(key(last)),
        _ => None,
    };
    Page::new(slice, next_cursor)
}

fn group_key(group: &LogGroup) -> String {
    group.name.clone()
}

fn name_key(stream: &LogStream) -> String {
    stream.name.clone()
}

/// Sorts most recent first, ties broken by name
fn recency_key(stream: &LogStream) -> String {
    let age = i64::MAX - stream.last_ingestion_or_epoch().max(0);
    format!("{:020}|{}", age, stream.name)
}

#[async_trait]
impl LogService for InMemoryLogService {
    type Error = MemoryServiceError;

    async fn list_log_groups(
        &self,
        cursor: Option<String>,
        page_size: i32,
    ) -> Result<Page<LogGroup>, Self::Error> {
        let mut state = self.lock();
        state.calls.push(ServiceCall::ListGroups {
            cursor: cursor.clone(),
        });
        if state.faults.contains(&Fault::ListGroups) {
            return Err(MemoryServiceError("ServiceUnavailableException".to_string()));
        }

        let groups: Vec<LogGroup> = state
            .groups
            .iter()
            .map(|(name, record)| LogGroup::new(name.clone(), record.retention))
            .collect();
        Ok(page_of(&groups, cursor.as_deref(), page_size, group_key))
    }

    async fn list_log_streams(
        &self,
        group: &str,
        cursor: Option<String>,
        page_size: i32,
        order: StreamOrder,
    ) -> Result<Page<LogStream>, Self::Error> {
        let mut state = self.lock();
        state.calls.push(ServiceCall::ListStreams {
            group: group.to_string(),
            cursor: cursor.clone(),
            order,
        });
        if state.faults.contains(&Fault::ListStreams(group.to_string())) {
            return Err(MemoryServiceError("ThrottlingException".to_string()));
        }

        let record = state.groups.get(group).ok_or_else(|| {
            MemoryServiceError(format!("ResourceNotFoundException: {}", group))
        })?;

        let key: fn(&LogStream) -> String = match order {
            StreamOrder::Unordered => name_key,
            StreamOrder::NewestFirst => recency_key,
        };
        let mut streams = record.streams.clone();
        streams.sort_by_key(key);
        Ok(page_of(&streams, cursor.as_deref(), page_size, key))
    }

    async fn put_retention_policy(&self, group: &str, days: i32) -> Result<(), Self::Error> {
        let mut state = self.lock();
        state.calls.push(ServiceCall::PutRetention {
            group: group.to_string(),
            days,
        });
        if state.faults.contains(&Fault::PutRetention(group.to_string())) {
            return Err(MemoryServiceError("AccessDeniedException".to_string()));
        }

        let record = state.groups.get_mut(group).ok_or_else(|| {
            MemoryServiceError(format!("ResourceNotFoundException: {}", group))
        })?;
        record.retention = Some(days);
        Ok(())
    }

    async fn delete_log_stream(&self, group: &str, stream: &str) -> Result<(), Self::Error> {
        let mut state = self.lock();
        state.calls.push(ServiceCall::DeleteStream {
            group: group.to_string(),
            stream: stream.to_string(),
        });
        if state
            .faults
            .contains(&Fault::DeleteStream(group.to_string(), stream.to_string()))
        {
            return Err(MemoryServiceError("OperationAbortedException".to_string()));
        }

        let record = state.groups.get_mut(group).ok_or_else(|| {
            MemoryServiceError(format!("ResourceNotFoundException: {}", group))
        })?;
        let before = record.streams.len();
        record.streams.retain(|s| s.name != stream);
        if record.streams.len() == before {
            return Err(MemoryServiceError(format!(
                "ResourceNotFoundException: {}/{}",
                group, stream
            )));
        }
        Ok(())
    }

    async fn delete_log_group(&self, group: &str) -> Result<(), Self::Error> {
        let mut state = self.lock();
        state.calls.push(ServiceCall::DeleteGroup {
            group: group.to_string(),
        });
        if state.faults.contains(&Fault::DeleteGroup(group.to_string())) {
            return Err(MemoryServiceError("OperationAbortedException".to_string()));
        }

        state
            .groups
            .remove(group)
            .map(|_| ())
            .ok_or_else(|| MemoryServiceError(format!("ResourceNotFoundException: {}", group)))
    }
}
