/// Ordered list of participant names, one per wheel segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Appends the non-blank, trimmed lines of an imported file.
    /// Returns how many names were added.
    pub fn import(&mut self, text: &str) -> usize {
        let imported = parse_import(text);
        let added = imported.len();
        self.names.extend(imported);
        added
    }

    /// Mirrors the textarea: every line becomes a name, blank ones included,
    /// so a freshly typed line break survives the next render.
    pub fn replace_from_text(&mut self, text: &str) {
        self.names = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(str::to_owned).collect()
        };
    }

    pub fn as_text(&self) -> String {
        self.names.join("\n")
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

/// Newline-delimited file contents to names. Columns are not interpreted.
pub fn parse_import(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
