/// Browser-like session history of locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Adds an entry after the current one, dropping any forward entries.
    pub fn push(&mut self, location: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location.into());
        self.cursor = self.entries.len() - 1;
    }

    pub fn replace(&mut self, location: impl Into<String>) {
        self.entries[self.cursor] = location.into();
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
