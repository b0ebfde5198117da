use std::path::PathBuf;

pub(crate) fn default_functions_path() -> Option<PathBuf> {
    let mut path = crate::config::config_dir()?;
    path.push("default.rhai");
    Some(path)
}

/// Put `default.rhai` from the config dir in front of the functions list, if it exists.
pub(crate) fn prepend_default_functions_if_present(
    functions: &mut Vec<PathBuf>,
    no_default_functions: bool,
) {
    if no_default_functions {
        return;
    }
    let Some(path) = default_functions_path() else {
        return;
    };
    if path.is_file() {
        functions.insert(0, path);
    } else {
        log::debug!("no default functions file at {}", path.display());
    }
}
