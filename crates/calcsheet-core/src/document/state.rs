use calcsheet_engine::engine::{Line, LineId, ResultLine, RhaiEvaluator, recalculate};
use std::path::PathBuf;

/// UI-agnostic document state for a calculation sheet.
pub struct Document {
    /// Lines in display order
    pub(crate) lines: Vec<Line>,
    /// Results of the last pass, one per line in the same order
    pub(crate) results: Vec<ResultLine>,
    /// Rhai-backed expression evaluator
    pub(crate) evaluator: RhaiEvaluator,
    /// Paths to custom Rhai functions files
    pub functions_files: Vec<PathBuf>,
    /// Cached custom functions script content (concatenated from all files)
    pub custom_functions: Option<String>,
}

impl Document {
    /// Create a document holding a single empty line.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::from_texts([""])
    }

    /// Create a document from line texts; ids are assigned `1..=n`.
    /// An empty input still yields one empty line.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<Line> = texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| Line::new(idx as LineId + 1, text))
            .collect();
        if lines.is_empty() {
            lines.push(Line::new(1, ""));
        }

        let mut doc = Document {
            lines,
            results: Vec::new(),
            evaluator: RhaiEvaluator::new(),
            functions_files: Vec::new(),
            custom_functions: None,
        };
        doc.recalculate();
        doc
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn results(&self) -> &[ResultLine] {
        &self.results
    }

    /// Rendered results, one string per line.
    pub fn result_strings(&self) -> Vec<String> {
        self.results.iter().map(ResultLine::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the line with the given id.
    pub fn position(&self, id: LineId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Result for the line with the given id.
    pub fn result(&self, id: LineId) -> Option<&ResultLine> {
        self.results.iter().find(|result| result.id == id)
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(ResultLine::is_failure)
    }

    /// Run a full pass and replace the previous results wholesale.
    pub fn recalculate(&mut self) {
        self.results = recalculate(&self.lines, &self.evaluator);
    }

    pub(crate) fn next_id(&self) -> LineId {
        self.lines.iter().map(|line| line.id).max().unwrap_or(0) + 1
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
