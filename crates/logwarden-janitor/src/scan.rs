//! Newest-first staleness scan for whole-group deletion
//!
//! Streams must arrive most recently active first. While every stream seen is stale
//! the scan keeps going and collects candidates; the first fresh stream ends it,
//! since everything after it is assumed fresher still. Reaching the end of the
//! listing while still scanning means the whole group is obsolete.

use crate::policy::RetentionDecision;
use logwarden_domain::LogStream;

/// Where the scan stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Every stream seen so far is stale
    Scanning,

    /// A fresh stream was seen; the scan stopped there
    FoundFresh,

    /// The listing ended without a fresh stream
    ExhaustedAllStale,
}

/// Whether the caller should feed the scan another stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    /// Keep listing
    Continue,
    /// Stop listing; the remaining streams are not needed
    Stop,
}

/// What to delete once the scan is over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanVerdict {
    /// Nothing to delete
    Keep,

    /// Delete these stale streams one by one and keep the group
    DeleteStreams(Vec<LogStream>),

    /// Every stream is stale: delete the group in one call
    DeleteGroup {
        /// Streams that go with the group
        stale_streams: Vec<LogStream>,
    },
}

/// State machine over {Scanning, FoundFresh, ExhaustedAllStale}
#[derive(Debug)]
pub struct StaleScan {
    state: ScanState,
    decision: RetentionDecision,
    candidates: Vec<LogStream>,
}

impl StaleScan {
    /// Start a scan against one group's retention decision
    pub fn new(decision: RetentionDecision) -> Self {
        Self {
            state: ScanState::Scanning,
            decision,
            candidates: Vec::new(),
        }
    }

    /// Feed the next stream of the newest-first listing
    pub fn observe(&mut self, stream: &LogStream) -> ScanControl {
        if self.state != ScanState::Scanning {
            return ScanControl::Stop;
        }

        if self.decision.is_stale(stream.last_ingestion_time) {
            self.candidates.push(stream.clone());
            ScanControl::Continue
        } else {
            self.state = ScanState::FoundFresh;
            ScanControl::Stop
        }
    }

    /// Record that the listing has no more streams
    pub fn exhausted(&mut self) {
        if self.state == ScanState::Scanning {
            self.state = ScanState::ExhaustedAllStale;
        }
    }

    /// Current state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Stale streams collected so far
    pub fn candidates(&self) -> &[LogStream] {
        &self.candidates
    }

    /// Final decision
    ///
    /// A group counts as obsolete until a fresh stream is seen, so a group that
    /// lists no streams at all is deleted too.
    pub fn verdict(mut self) -> ScanVerdict {
        self.exhausted();

        match self.state {
            ScanState::FoundFresh if self.candidates.is_empty() => ScanVerdict::Keep,
            ScanState::FoundFresh => ScanVerdict::DeleteStreams(self.candidates),
            ScanState::Scanning | ScanState::ExhaustedAllStale => ScanVerdict::DeleteGroup {
                stale_streams: self.candidates,
            },
        }
    }
}
