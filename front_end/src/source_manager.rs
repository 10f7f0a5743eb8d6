/// Holds the text being compiled and answers line-oriented queries about it.
#[derive(Debug, Clone, Default)]
pub struct SourceManager {
    name: String,
    source: String,
    line_starts: Vec<usize>,
}

impl SourceManager {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            source: String::new(),
            line_starts: vec![0],
        }
    }

    pub fn with_source(name: &str, content: &str) -> Self {
        let mut manager = Self::new();
        manager.set_source(name, content);
        manager
    }

    pub fn set_source(&mut self, name: &str, content: &str) {
        self.name = name.to_string();
        self.source = content.to_string();
        self.line_starts = vec![0];

        // Same terminators as the lexer: \n, \r, \r\n and \n\r each end one line
        let bytes = content.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];
            if c == b'\n' || c == b'\r' {
                let pair = if c == b'\r' { b'\n' } else { b'\r' };
                if bytes.get(i + 1) == Some(&pair) {
                    i += 1;
                }
                self.line_starts.push(i + 1);
            }
            i += 1;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Text of a 1-based line, without its terminator.
    pub fn get_line(&self, line_number: usize) -> Option<&str> {
        if line_number == 0 || line_number > self.line_starts.len() {
            return None;
        }

        let start = self.line_starts[line_number - 1];
        let end = if line_number < self.line_starts.len() {
            self.line_starts[line_number]
        } else {
            self.source.len()
        };

        Some(self.source[start..end].trim_end_matches(['\n', '\r']))
    }

    /// The line rendered with a gutter, e.g. ` 3 |     x := 1`.
    pub fn get_snippet(&self, line_number: usize) -> Option<String> {
        let line = self.get_line(line_number)?;
        let width = self.line_count().to_string().len();
        Some(format!("{:>width$} | {}", line_number, line.trim_end(), width = width))
    }
}
