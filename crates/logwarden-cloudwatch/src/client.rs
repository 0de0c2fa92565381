//! CloudWatch Logs implementation of [`LogService`].

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::types::{LogGroup as CwLogGroup, LogStream as CwLogStream, OrderBy};
use aws_sdk_cloudwatchlogs::Client;
use logwarden_domain::{LogGroup, LogService, LogStream, Page, StreamOrder};

use crate::{CloudWatchConfig, CloudWatchError};

/// Largest page DescribeLogGroups and DescribeLogStreams accept
const MAX_LIMIT: i32 = 50;

/// CloudWatch Logs client
pub struct CloudWatchLogService {
    client: Client,
}

impl CloudWatchLogService {
    /// Create a client from the environment's credentials and the given settings.
    pub async fn new(config: &CloudWatchConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts.max(1)));

        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }

        let sdk_config = loader.load().await;

        let mut logs_config = aws_sdk_cloudwatchlogs::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            logs_config = logs_config.endpoint_url(endpoint_url);
        }

        tracing::debug!(
            region = ?sdk_config.region(),
            endpoint = ?config.endpoint_url,
            "CloudWatch Logs client configured"
        );

        Self::from_client(Client::from_conf(logs_config.build()))
    }

    /// Wrap an already configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogService for CloudWatchLogService {
    type Error = CloudWatchError;

    async fn list_log_groups(
        &self,
        cursor: Option<String>,
        page_size: i32,
    ) -> Result<Page<LogGroup>, Self::Error> {
        let output = self
            .client
            .describe_log_groups()
            .set_next_token(cursor)
            .limit(clamp_limit(page_size))
            .send()
            .await
            .map_err(|e| CloudWatchError::DescribeLogGroups(DisplayErrorContext(e).to_string()))?;

        let items = output.log_groups().iter().filter_map(to_log_group).collect();
        Ok(Page::new(items, output.next_token().map(str::to_string)))
    }

    async fn list_log_streams(
        &self,
        group: &str,
        cursor: Option<String>,
        page_size: i32,
        order: StreamOrder,
    ) -> Result<Page<LogStream>, Self::Error> {
        let mut request = self
            .client
            .describe_log_streams()
            .log_group_name(group)
            .set_next_token(cursor)
            .limit(clamp_limit(page_size));

        if order == StreamOrder::NewestFirst {
            request = request.order_by(OrderBy::LastEventTime).descending(true);
        }

        let output = request.send().await.map_err(|e| {
            CloudWatchError::DescribeLogStreams(DisplayErrorContext(e).to_string())
        })?;

        let items = output.log_streams().iter().filter_map(to_log_stream).collect();
        Ok(Page::new(items, output.next_token().map(str::to_string)))
    }

    async fn put_retention_policy(&self, group: &str, days: i32) -> Result<(), Self::Error> {
        self.client
            .put_retention_policy()
            .log_group_name(group)
            .retention_in_days(days)
            .send()
            .await
            .map_err(|e| CloudWatchError::PutRetentionPolicy(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }

    async fn delete_log_stream(&self, group: &str, stream: &str) -> Result<(), Self::Error> {
        self.client
            .delete_log_stream()
            .log_group_name(group)
            .log_stream_name(stream)
            .send()
            .await
            .map_err(|e| CloudWatchError::DeleteLogStream(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }

    async fn delete_log_group(&self, group: &str) -> Result<(), Self::Error> {
        self.client
            .delete_log_group()
            .log_group_name(group)
            .send()
            .await
            .map_err(|e| CloudWatchError::DeleteLogGroup(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }
}

fn clamp_limit(page_size: i32) -> i32 {
    page_size.clamp(1, MAX_LIMIT)
}

fn to_log_group(group: &CwLogGroup) -> Option<LogGroup> {
    match group.log_group_name() {
        Some(name) if !name.is_empty() => Some(LogGroup::new(name, group.retention_in_days())),
        _ => {
            tracing::debug!(arn = ?group.arn(), "Dropping log group without a name");
            None
        }
    }
}

fn to_log_stream(stream: &CwLogStream) -> Option<LogStream> {
    match stream.log_stream_name() {
        Some(name) if !name.is_empty() => Some(LogStream::new(name, stream.last_ingestion_time())),
        _ => {
            tracing::debug!(arn = ?stream.arn(), "Dropping log stream without a name");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-3), 1);
        assert_eq!(clamp_limit(25), 25);
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(500), 50);
    }

    #[test]
    fn test_group_conversion() {
        let sdk = CwLogGroup::builder()
            .log_group_name("/aws/lambda/orders")
            .retention_in_days(30)
            .build();
        let group = to_log_group(&sdk).unwrap();
        assert_eq!(group.name, "/aws/lambda/orders");
        assert_eq!(group.retention_in_days, Some(30));

        let no_retention = CwLogGroup::builder().log_group_name("app").build();
        assert_eq!(to_log_group(&no_retention).unwrap().retention_in_days, None);
    }

    #[test]
    fn test_nameless_items_dropped() {
        assert!(to_log_group(&CwLogGroup::builder().build()).is_none());
        assert!(to_log_group(&CwLogGroup::builder().log_group_name("").build()).is_none());
        assert!(to_log_stream(&CwLogStream::builder().last_ingestion_time(5).build()).is_none());
    }

    #[test]
    fn test_stream_conversion() {
        let sdk = CwLogStream::builder()
            .log_stream_name("2024/01/01/[$LATEST]abc")
            .last_ingestion_time(1_700_000_000_000)
            .build();
        let stream = to_log_stream(&sdk).unwrap();
        assert_eq!(stream.name, "2024/01/01/[$LATEST]abc");
        assert_eq!(stream.last_ingestion_time, Some(1_700_000_000_000));

        let never = CwLogStream::builder().log_stream_name("idle").build();
        assert_eq!(to_log_stream(&never).unwrap().last_ingestion_time, None);
    }
}
