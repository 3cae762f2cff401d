//! Aligned key/value listings.

use super::theme::DoctorTheme;

/// Two-column listing with keys padded to a common width.
#[derive(Debug, Default)]
pub struct KeyValueTable {
    rows: Vec<(String, String)>,
}

impl KeyValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, key: &str, value: &str) {
        self.rows.push((key.to_string(), value.to_string()));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render one line per row, `key: value`.
    pub fn render(&self, theme: &DoctorTheme) -> String {
        let width = self
            .rows
            .iter()
            .map(|(k, _)| k.chars().count() + 1)
            .max()
            .unwrap_or(0);

        self.rows
            .iter()
            .map(|(key, value)| {
                let label = format!("{:width$}", format!("{}:", key), width = width);
                format!("{} {}", theme.key.apply_to(label), value)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_renders_nothing() {
        let table = KeyValueTable::new();
        assert!(table.is_empty());
        assert_eq!(table.render(&DoctorTheme::plain()), "");
    }

    #[test]
    fn keys_are_aligned() {
        let mut table = KeyValueTable::new();
        table.add_row("OS", "Linux");
        table.add_row("Node.js", "18.17.0");

        let rendered = table.render(&DoctorTheme::plain());
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "OS:      Linux");
        assert_eq!(lines[1], "Node.js: 18.17.0");
        assert_eq!(table.len(), 2);
    }
}
