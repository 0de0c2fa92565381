//! Cursor-following traversal of paginated listings
//!
//! A [`Paginator`] turns a [`PageSource`] into a lazy, finite sequence of items.
//! Every page fetch, the first one included, is preceded by one
//! [`RateLimiter::acquire`]. Pages are strictly sequential: page N+1 is only
//! requested once every item of page N has been handed out.

use crate::RateLimiter;
use async_trait::async_trait;
use logwarden_domain::{LogGroup, LogService, LogStream, Page, StreamOrder};
use std::collections::VecDeque;

/// One paginated listing of a single scope
#[async_trait]
pub trait PageSource: Send {
    /// Item yielded by the listing
    type Item: Send;

    /// Error type of a page fetch
    type Error: Send;

    /// Fetch the page starting at `cursor` (`None` for the first page)
    async fn fetch_page(
        &mut self,
        cursor: Option<String>,
    ) -> Result<Page<Self::Item>, Self::Error>;
}

#[derive(Debug)]
enum Cursor {
    Start,
    Next(String),
    Exhausted,
}

/// Lazy sequence over every item of a paginated listing
///
/// Not restartable: once exhausted (or after a fetch error) it yields nothing
/// more. Build a new paginator to list again from the start.
pub struct Paginator<'l, P: PageSource> {
    source: P,
    limiter: &'l RateLimiter,
    buffer: VecDeque<P::Item>,
    cursor: Cursor,
    pages_fetched: usize,
}

impl<'l, P: PageSource> Paginator<'l, P> {
    /// Start a listing at its first page
    pub fn new(source: P, limiter: &'l RateLimiter) -> Self {
        Self {
            source,
            limiter,
            buffer: VecDeque::new(),
            cursor: Cursor::Start,
            pages_fetched: 0,
        }
    }

    /// Next item, fetching the next page when the current one is drained
    ///
    /// Returns `Ok(None)` once the listing is exhausted. A fetch error ends
    /// the listing; the cursor it would have needed is lost.
    pub async fn next(&mut self) -> Result<Option<P::Item>, P::Error> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }

            let cursor = match std::mem::replace(&mut self.cursor, Cursor::Exhausted) {
                Cursor::Start => None,
                Cursor::Next(token) => Some(token),
                Cursor::Exhausted => return Ok(None),
            };

            self.limiter.acquire().await;
            let page = self.source.fetch_page(cursor).await?;
            self.pages_fetched += 1;

            if let Some(token) = page.continuation() {
                self.cursor = Cursor::Next(token.to_string());
            }
            tracing::trace!(
                "Fetched page {} ({} items, more: {})",
                self.pages_fetched,
                page.items.len(),
                matches!(self.cursor, Cursor::Next(_))
            );
            self.buffer.extend(page.items);
        }
    }

    /// Drain the whole listing into a vector
    pub async fn collect_all(mut self) -> Result<Vec<P::Item>, P::Error> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

/// Account-wide listing of log groups
pub struct LogGroupPages<'s, S> {
    service: &'s S,
    page_size: i32,
}

impl<'s, S: LogService> LogGroupPages<'s, S> {
    /// List every group of the account `page_size` at a time
    pub fn new(service: &'s S, page_size: i32) -> Self {
        Self { service, page_size }
    }
}

#[async_trait]
impl<'s, S: LogService> PageSource for LogGroupPages<'s, S> {
    type Item = LogGroup;
    type Error = S::Error;

    async fn fetch_page(&mut self, cursor: Option<String>) -> Result<Page<LogGroup>, S::Error> {
        self.service.list_log_groups(cursor, self.page_size).await
    }
}

/// Listing of the streams inside one log group
pub struct LogStreamPages<'s, S> {
    service: &'s S,
    group: String,
    page_size: i32,
    order: StreamOrder,
}

impl<'s, S: LogService> LogStreamPages<'s, S> {
    /// List the streams of `group` in the given order
    pub fn new(
        service: &'s S,
        group: impl Into<String>,
        page_size: i32,
        order: StreamOrder,
    ) -> Self {
        Self {
            service,
            group: group.into(),
            page_size,
            order,
        }
    }
}

#[async_trait]
impl<'s, S: LogService> PageSource for LogStreamPages<'s, S> {
    type Item = LogStream;
    type Error = S::Error;

    async fn fetch_page(&mut self, cursor: Option<String>) -> Result<Page<LogStream>, S::Error> {
        self.service
            .list_log_streams(&self.group, cursor, self.page_size, self.order)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves pre-built pages and records the cursors it was asked for
    struct ScriptedPages {
        pages: VecDeque<Result<Page<u32>, String>>,
        cursors_seen: Vec<Option<String>>,
    }

    impl ScriptedPages {
        fn new(pages: Vec<Result<Page<u32>, String>>) -> Self {
            Self {
                pages: pages.into(),
                cursors_seen: Vec::new(),
            }
        }

        /// Split `items` into pages of the given sizes, linked by cursors
        fn split(items: &[u32], sizes: &[usize]) -> Self {
            let mut pages = Vec::new();
            let mut offset = 0;
            for (i, size) in sizes.iter().enumerate() {
                let chunk = items[offset..offset + size].to_vec();
                offset += size;
                let next = (i + 1 < sizes.len()).then(|| format!("cursor-{}", i + 1));
                pages.push(Ok(Page::new(chunk, next)));
            }
            Self::new(pages)
        }
    }

    #[async_trait]
    impl<'a> PageSource for &'a mut ScriptedPages {
        type Item = u32;
        type Error = String;

        async fn fetch_page(&mut self, cursor: Option<String>) -> Result<Page<u32>, String> {
            self.cursors_seen.push(cursor);
            self.pages
                .pop_front()
                .unwrap_or_else(|| Err("fetched past the last page".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_yields_all_items_in_order() {
        let items: Vec<u32> = (0..10).collect();
        let layouts: [&[usize]; 4] = [&[10], &[3, 3, 4], &[1, 0, 9], &[0, 0, 10, 0]];

        for sizes in layouts {
            let limiter = RateLimiter::fixed_interval(1000);
            let mut source = ScriptedPages::split(&items, sizes);

            let yielded = Paginator::new(&mut source, &limiter).collect_all().await.unwrap();

            assert_eq!(yielded, items, "layout {:?}", sizes);
            assert_eq!(limiter.permits_issued(), sizes.len() as u64);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_threads_cursor_into_next_request() {
        let limiter = RateLimiter::fixed_interval(1000);
        let mut source = ScriptedPages::split(&[1, 2, 3], &[1, 1, 1]);

        Paginator::new(&mut source, &limiter).collect_all().await.unwrap();

        assert_eq!(
            source.cursors_seen,
            vec![None, Some("cursor-1".to_string()), Some("cursor-2".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_empty_page() {
        let limiter = RateLimiter::fixed_interval(1000);
        let mut source = ScriptedPages::new(vec![Ok(Page::empty())]);

        let mut paginator = Paginator::new(&mut source, &limiter);
        assert_eq!(paginator.next().await.unwrap(), None);
        assert_eq!(paginator.pages_fetched(), 1);
        assert_eq!(paginator.next().await.unwrap(), None);
        assert_eq!(paginator.pages_fetched(), 1);
        assert_eq!(limiter.permits_issued(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_cursor_ends_listing() {
        let limiter = RateLimiter::fixed_interval(1000);
        let mut source = ScriptedPages::new(vec![
            Ok(Page::new(vec![7], Some(String::new()))),
            Ok(Page::last(vec![8])),
        ]);

        let items = Paginator::new(&mut source, &limiter).collect_all().await.unwrap();
        assert_eq!(items, vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_is_drained_before_next_fetch() {
        let limiter = RateLimiter::fixed_interval(1000);
        let mut source = ScriptedPages::split(&[1, 2, 3, 4], &[2, 2]);

        let mut paginator = Paginator::new(&mut source, &limiter);
        assert_eq!(paginator.next().await.unwrap(), Some(1));
        assert_eq!(paginator.next().await.unwrap(), Some(2));
        assert_eq!(paginator.pages_fetched(), 1);
        assert_eq!(paginator.next().await.unwrap(), Some(3));
        assert_eq!(paginator.pages_fetched(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_ends_listing() {
        let limiter = RateLimiter::fixed_interval(1000);
        let mut source = ScriptedPages::new(vec![
            Ok(Page::new(vec![1], Some("next".to_string()))),
            Err("throttled".to_string()),
            Ok(Page::last(vec![2])),
        ]);

        let mut paginator = Paginator::new(&mut source, &limiter);
        assert_eq!(paginator.next().await.unwrap(), Some(1));
        assert_eq!(paginator.next().await, Err("throttled".to_string()));
        assert_eq!(paginator.next().await, Ok(None));
    }
}
