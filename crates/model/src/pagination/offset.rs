use serde::{Deserialize, Serialize};

/// The row window `[offset, offset + limit)` requested by one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// What recording a page did to the scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanProgress {
    /// The page had rows; the scan moved forward to `offset`.
    Advanced { offset: u64 },
    /// The page was empty; the scan starts over from the first row.
    Restarted,
}

/// Offset-based scan position over a result set.
///
/// The offset only ever moves forward by the number of rows actually
/// returned, and drops back to zero once a page comes back empty, so a
/// full pass visits every row of a stable result set exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    offset: u64,
    page_size: u64,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Paginator {
            offset: 0,
            page_size: page_size.max(1) as u64,
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: self.offset,
            limit: self.page_size,
        }
    }

    /// Records the row count of the page fetched at the current window.
    pub fn record_page(&mut self, rows: usize) -> ScanProgress {
        if rows == 0 {
            self.reset();
            return ScanProgress::Restarted;
        }

        self.offset = self.offset.saturating_add(rows as u64);
        ScanProgress::Advanced {
            offset: self.offset,
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
