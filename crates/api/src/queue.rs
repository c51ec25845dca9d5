//! Queue status monitoring via Redis Streams.
//!
//! The episode-processing workers consume per-group streams named
//! `graphiti:queue:<group_id>`. This module reads consumer-group metadata
//! (`XINFO GROUPS`) for every active stream and reduces it to a single
//! "is work in flight" signal for the dashboard. It never writes to Redis.

use std::collections::HashMap;
use std::sync::Arc;

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::Serialize;
use tokio::sync::OnceCell;

/// Key prefix for work-queue streams, one stream per group id
pub const STREAM_PREFIX: &str = "graphiti:queue:";

/// Suffix marking dead-letter streams, excluded from active-work accounting
pub const DLQ_SUFFIX: &str = ":dlq";

/// Returns true if the key names a live work-queue stream (not a DLQ)
pub fn is_queue_stream(key: &str) -> bool {
    key.starts_with(STREAM_PREFIX) && !key.ends_with(DLQ_SUFFIX)
}

/// Per consumer-group counters read from `XINFO GROUPS`.
///
/// `pending` = delivered but unacknowledged (currently being processed),
/// `lag` = not yet delivered to any consumer (waiting in queue).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupCounters {
    pub pending: i64,
    pub lag: i64,
}

/// Aggregated queue status, point-in-time snapshot
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct QueueStatus {
    pub success: bool,
    pub processing: bool,
    pub pending_count: i64,
    pub processing_count: i64,
    pub active_streams: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueueStatus {
    fn failed(message: String) -> Self {
        Self {
            success: false,
            error: Some(message),
            ..Self::default()
        }
    }
}

/// Reduce per-stream group counters into the aggregate status.
///
/// A group contributes only while it has nonzero pending or lag; each
/// contributing group counts as one active stream entry.
fn aggregate(streams: &[Vec<GroupCounters>]) -> QueueStatus {
    let mut pending_total = 0;
    let mut processing_total = 0;
    let mut active_streams = 0;

    for groups in streams {
        for group in groups {
            if group.pending > 0 || group.lag > 0 {
                processing_total += group.pending;
                pending_total += group.lag;
                active_streams += 1;
            }
        }
    }

    QueueStatus {
        success: true,
        processing: pending_total + processing_total > 0,
        pending_count: pending_total,
        processing_count: processing_total,
        active_streams,
        error: None,
    }
}

/// Extract pending/lag counters from one `XINFO GROUPS` entry.
///
/// `lag` can be nil when the stream's entries-read tracking was lost
/// (e.g. after XSETID); treat that as zero.
fn group_counters(fields: &HashMap<String, redis::Value>) -> GroupCounters {
    let read = |name: &str| -> i64 {
        fields
            .get(name)
            .and_then(|v| redis::from_redis_value::<Option<i64>>(v).ok())
            .flatten()
            .unwrap_or(0)
    };

    GroupCounters {
        pending: read("pending"),
        lag: read("lag"),
    }
}

/// Read-only monitor over the Redis work-queue streams
#[derive(Clone)]
pub struct QueueMonitor {
    client: redis::Client,
    manager: Arc<OnceCell<ConnectionManager>>,
}

impl QueueMonitor {
    pub fn new(redis_url: &str) -> Result<Self, redis::RedisError> {
        Ok(Self {
            client: redis::Client::open(redis_url)?,
            manager: Arc::new(OnceCell::new()),
        })
    }

    /// Get or lazily create the shared connection
    async fn connection(&self) -> Result<ConnectionManager, redis::RedisError> {
        let manager = self
            .manager
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(manager.clone())
    }

    /// Get the current queue processing status.
    ///
    /// This is a monitoring signal, not a critical path: any connection-level
    /// failure degrades to a zero-valued `success=false` result instead of
    /// surfacing an error to the caller.
    pub async fn get_status(&self) -> QueueStatus {
        match self.collect().await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(error = %e, "Error getting queue status");
                QueueStatus::failed(e.to_string())
            }
        }
    }

    async fn collect(&self) -> Result<QueueStatus, redis::RedisError> {
        let mut conn = self.connection().await?;

        let keys: Vec<String> = conn.keys(format!("{STREAM_PREFIX}*")).await?;

        let mut streams = Vec::new();
        for key in keys.iter().filter(|k| is_queue_stream(k)) {
            // A stream (or its groups) may be deleted between KEYS and XINFO
            // by an external consumer; that is no data, not an error.
            match stream_groups(&mut conn, key).await {
                Ok(groups) => streams.push(groups),
                Err(e) => {
                    tracing::debug!(stream = %key, error = %e, "Skipping stream without group info");
                }
            }
        }

        Ok(aggregate(&streams))
    }
}

async fn stream_groups(
    conn: &mut ConnectionManager,
    key: &str,
) -> Result<Vec<GroupCounters>, redis::RedisError> {
    let raw: Vec<HashMap<String, redis::Value>> = redis::cmd("XINFO")
        .arg("GROUPS")
        .arg(key)
        .query_async(conn)
        .await?;

    Ok(raw.iter().map(group_counters).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(pending: i64, lag: i64) -> GroupCounters {
        GroupCounters { pending, lag }
    }

    #[test]
    fn test_queue_stream_filter() {
        assert!(is_queue_stream("graphiti:queue:main"));
        assert!(is_queue_stream("graphiti:queue:project-42"));
        assert!(!is_queue_stream("graphiti:queue:main:dlq"));
        assert!(!is_queue_stream("telemetry{shard}"));
        assert!(!is_queue_stream("graphiti"));
    }

    #[test]
    fn test_aggregate_empty() {
        let status = aggregate(&[]);
        assert!(status.success);
        assert!(!status.processing);
        assert_eq!(status.pending_count, 0);
        assert_eq!(status.processing_count, 0);
        assert_eq!(status.active_streams, 0);
        assert_eq!(status.error, None);
    }

    #[test]
    fn test_aggregate_idle_groups_do_not_count() {
        // pending=0 AND lag=0 must not increment active_streams nor totals
        let status = aggregate(&[vec![group(0, 0), group(0, 0)], vec![group(0, 0)]]);
        assert!(!status.processing);
        assert_eq!(status.pending_count, 0);
        assert_eq!(status.processing_count, 0);
        assert_eq!(status.active_streams, 0);
    }

    #[test]
    fn test_aggregate_sums_lag_and_pending_separately() {
        let streams = vec![
            vec![group(2, 5), group(0, 0)],
            vec![group(1, 0)],
            vec![group(0, 3)],
        ];
        let status = aggregate(&streams);

        assert!(status.success);
        assert!(status.processing);
        // pending_count = sum of lag over contributing groups
        assert_eq!(status.pending_count, 8);
        // processing_count = sum of pending over contributing groups
        assert_eq!(status.processing_count, 3);
        // idle group does not count
        assert_eq!(status.active_streams, 3);
    }

    #[test]
    fn test_aggregate_single_sided_counters_still_active() {
        // lag-only and pending-only groups both count as active
        let status = aggregate(&[vec![group(0, 7)], vec![group(4, 0)]]);
        assert_eq!(status.pending_count, 7);
        assert_eq!(status.processing_count, 4);
        assert_eq!(status.active_streams, 2);
        assert!(status.processing);
    }

    #[test]
    fn test_group_counters_parsing() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), redis::Value::BulkString(b"workers".to_vec()));
        fields.insert("pending".to_string(), redis::Value::Int(4));
        fields.insert("lag".to_string(), redis::Value::Int(9));

        assert_eq!(group_counters(&fields), GroupCounters { pending: 4, lag: 9 });
    }

    #[test]
    fn test_group_counters_nil_lag() {
        let mut fields = HashMap::new();
        fields.insert("pending".to_string(), redis::Value::Int(2));
        fields.insert("lag".to_string(), redis::Value::Nil);

        assert_eq!(group_counters(&fields), GroupCounters { pending: 2, lag: 0 });
    }

    #[test]
    fn test_failed_status_is_zeroed() {
        let status = QueueStatus::failed("connection refused".to_string());
        assert!(!status.success);
        assert!(!status.processing);
        assert_eq!(status.pending_count, 0);
        assert_eq!(status.active_streams, 0);
        assert_eq!(status.error.as_deref(), Some("connection refused"));
    }
}
