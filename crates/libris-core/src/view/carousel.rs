/// Books shown per carousel page.
pub const PAGE_SIZE: usize = 3;

/// A paged window over a list, three items at a time.
///
/// Stepping past either end wraps: forward to the first page, backward to
/// the last full window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, index: 0 }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Position of the first visible item.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn visible(&self) -> &[T] {
        let end = (self.index + PAGE_SIZE).min(self.items.len());
        &self.items[self.index.min(end)..end]
    }

    pub fn has_prev(&self) -> bool {
        self.index != 0
    }

    pub fn has_next(&self) -> bool {
        self.index + PAGE_SIZE < self.items.len()
    }

    pub fn next(&mut self) {
        self.index = if self.index + PAGE_SIZE >= self.items.len() {
            0
        } else {
            self.index + PAGE_SIZE
        };
    }

    pub fn prev(&mut self) {
        self.index = if self.index < PAGE_SIZE {
            self.items.len().saturating_sub(PAGE_SIZE)
        } else {
            self.index - PAGE_SIZE
        };
    }

    /// 1-based page number of the current window.
    pub fn page(&self) -> usize {
        self.index / PAGE_SIZE + 1
    }

    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Jump to a 1-based page, clamped to the last page.
    pub fn go_to_page(&mut self, page: usize) {
        let page = page.clamp(1, self.page_count());
        self.index = (page - 1) * PAGE_SIZE;
    }
}
