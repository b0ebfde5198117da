use super::Document;
use crate::error::{CalcsheetError, Result};
use calcsheet_engine::engine::RhaiEvaluator;
use std::path::{Path, PathBuf};

const MAX_FUNCTION_FILE_BYTES: u64 = 1_048_576; // 1 MiB

fn read_functions_file(path: &Path) -> Result<String> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_FUNCTION_FILE_BYTES {
        return Err(CalcsheetError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!(
                "Refusing to read {}: functions file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_FUNCTION_FILE_BYTES
            ),
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

impl Document {
    /// Load custom Rhai functions from a file (appends to existing functions).
    /// Returns the path loaded, or an error.
    pub fn load_functions(&mut self, path: &Path) -> Result<PathBuf> {
        let path_buf = std::fs::canonicalize(path)?;
        let content = read_functions_file(&path_buf)?;

        if self.functions_files.contains(&path_buf) {
            // Already loaded: keep current compiled state unchanged.
            return Ok(path_buf);
        }

        let new_custom_functions = match &self.custom_functions {
            Some(existing) => format!("{}\n\n{}", existing, content),
            None => content,
        };

        // Compile into a fresh evaluator first so failures don't mutate state.
        let (evaluator, compile_error) = RhaiEvaluator::with_functions(Some(&new_custom_functions));
        if let Some(err) = compile_error {
            log::warn!("{}: {}", path_buf.display(), err);
            return Err(CalcsheetError::RhaiCompile(err));
        }

        log::debug!("loaded custom functions from {}", path_buf.display());
        self.functions_files.push(path_buf.clone());
        self.custom_functions = Some(new_custom_functions);
        self.evaluator = evaluator;
        self.recalculate();

        Ok(path_buf)
    }

    /// Reload all custom functions from the loaded files.
    /// Returns the number of files reloaded.
    pub fn reload_functions(&mut self) -> Result<usize> {
        if self.functions_files.is_empty() {
            return Err(CalcsheetError::NoFunctionsLoaded);
        }

        let mut merged = String::new();
        for (idx, path) in self.functions_files.iter().enumerate() {
            let content = read_functions_file(path)?;
            if idx > 0 {
                merged.push_str("\n\n");
            }
            merged.push_str(&content);
        }

        let (evaluator, compile_error) = RhaiEvaluator::with_functions(Some(&merged));
        if let Some(err) = compile_error {
            return Err(CalcsheetError::RhaiCompile(err));
        }

        self.custom_functions = Some(merged);
        self.evaluator = evaluator;
        self.recalculate();

        Ok(self.functions_files.len())
    }
}
