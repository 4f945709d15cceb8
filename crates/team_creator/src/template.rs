//! Named row values rendered in a table's column order

/// One row to append, as `(column, value)` pairs in built-in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTemplate {
    cells: Vec<(String, String)>,
}

impl RowTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(columns: usize) -> Self {
        Self {
            cells: Vec::with_capacity(columns),
        }
    }

    /// Build from parallel column and value lists
    pub fn from_columns<V: ToString>(columns: &[&str], values: &[V]) -> Self {
        let cells = columns
            .iter()
            .zip(values)
            .map(|(c, v)| (c.to_string(), v.to_string()))
            .collect();
        Self { cells }
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl ToString) {
        self.cells.push((column.into(), value.to_string()));
    }

    /// Overwrite an existing column's value; returns false when absent
    pub fn set(&mut self, column: &str, value: impl ToString) -> bool {
        match self.cells.iter_mut().find(|(c, _)| c == column) {
            Some(cell) => {
                cell.1 = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when `header` names exactly this template's columns
    pub fn matches_header(&self, header: &[String]) -> bool {
        header.len() == self.cells.len()
            && header.iter().all(|h| self.get(h).is_some())
            && self.cells.iter().all(|(c, _)| header.contains(c))
    }

    /// Tab-joined values, in header order when the header matches, else in
    /// built-in order
    pub fn render(&self, header: &[String]) -> String {
        if self.matches_header(header) {
            header
                .iter()
                .filter_map(|h| self.get(h))
                .collect::<Vec<_>>()
                .join("\t")
        } else {
            self.render_builtin()
        }
    }

    pub fn render_builtin(&self) -> String {
        self.cells
            .iter()
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}
