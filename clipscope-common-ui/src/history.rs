use std::collections::VecDeque;

use clipscope_common::HistoryItem;

/// Most-recent-first list of past analyses, bounded by `capacity`.
#[derive(Debug, Clone)]
pub struct History {
    items: VecDeque<HistoryItem>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
        }
    }

    /// Insert at the front, evicting the oldest entries beyond capacity.
    pub fn record(&mut self, item: HistoryItem) {
        self.items.push_front(item);

        // Trim old entries
        while self.items.len() > self.capacity {
            self.items.pop_back();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Look an entry up by its 1-based position or by its id.
    pub fn resolve(&self, key: &str) -> Option<&HistoryItem> {
        let key = key.trim();
        match key.parse::<usize>() {
            Ok(n) if n >= 1 => self.items.get(n - 1),
            _ => self.get(key),
        }
    }

    pub fn latest(&self) -> Option<&HistoryItem> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
