//! One page of a paginated listing

/// Items returned by one listing call plus the continuation cursor
///
/// A missing or empty `next_cursor` marks the last page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in the order the service returned them
    pub items: Vec<T>,

    /// Opaque cursor for the next page of the same listing
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }

    /// A final page holding `items`
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// An empty final page
    pub fn empty() -> Self {
        Self::last(Vec::new())
    }

    /// The cursor to thread into the next request, if any
    ///
    /// Empty strings are treated as absent.
    pub fn continuation(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}
