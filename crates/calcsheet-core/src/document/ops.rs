use super::Document;
use crate::error::{CalcsheetError, Result};
use calcsheet_engine::engine::{Line, LineId};

impl Document {
    fn index_of(&self, id: LineId) -> Result<usize> {
        self.position(id).ok_or(CalcsheetError::UnknownLine(id))
    }

    /// Replace the text of a line.
    pub fn set_text(&mut self, id: LineId, text: &str) -> Result<()> {
        let idx = self.index_of(id)?;
        self.lines[idx].text = text.to_string();
        self.recalculate();
        Ok(())
    }

    /// Insert a new line directly after `id`. Returns the new line's id.
    pub fn insert_after(&mut self, id: LineId, text: &str) -> Result<LineId> {
        let idx = self.index_of(id)?;
        let new_id = self.next_id();
        self.lines.insert(idx + 1, Line::new(new_id, text));
        self.recalculate();
        Ok(new_id)
    }

    /// Append a line at the end. Returns the new line's id.
    pub fn push_line(&mut self, text: &str) -> LineId {
        let new_id = self.next_id();
        self.lines.push(Line::new(new_id, text));
        self.recalculate();
        new_id
    }

    /// Remove a line. The last remaining line cannot be removed.
    pub fn remove(&mut self, id: LineId) -> Result<()> {
        let idx = self.index_of(id)?;
        if self.lines.len() <= 1 {
            return Err(CalcsheetError::LastLine);
        }
        self.lines.remove(idx);
        self.recalculate();
        Ok(())
    }

    /// Remove a line only if its text is empty and it is not the last line.
    /// Returns whether the line was removed.
    pub fn remove_if_empty(&mut self, id: LineId) -> Result<bool> {
        let idx = self.index_of(id)?;
        if !self.lines[idx].text.is_empty() || self.lines.len() <= 1 {
            return Ok(false);
        }
        self.lines.remove(idx);
        self.recalculate();
        Ok(true)
    }

    /// Replace every line with the given texts (ids restart at 1).
    pub fn replace_all<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| Line::new(idx as LineId + 1, text))
            .collect();
        if self.lines.is_empty() {
            self.lines.push(Line::new(1, ""));
        }
        self.recalculate();
    }
}
