// Query and result history
//
// Append-only for the whole session. The history viewport is rebuilt from
// this log every time it changes.

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<String>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order_and_empty_entries() {
        let mut log = HistoryLog::new();
        assert!(log.is_empty());
        log.push("first");
        log.push(String::new());
        log.push("third");
        assert_eq!(log.len(), 3);
        assert_eq!(log.entries(), ["first", "", "third"]);
    }
}
