use crate::error::{Result, StudyError};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Resolves the editor command: `$EDITOR`, then `$VISUAL`, then common fallbacks.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(StudyError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    // $EDITOR may carry arguments, e.g. "code --wait".
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(editor.as_str());
    debug!(%editor, path = %path.display(), "launching editor");

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| StudyError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(StudyError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(StudyError::Io)
}

/// Opens the editor on a scratch `.go` file holding `buffer` and returns the edited text.
///
/// A single trailing newline added by the editor is dropped so an untouched buffer
/// comes back unchanged.
pub fn edit_buffer(buffer: &str) -> Result<String> {
    let temp_file = env::temp_dir().join(format!("gostudy_edit_{}.go", std::process::id()));
    fs::write(&temp_file, buffer).map_err(StudyError::Io)?;

    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(strip_editor_newline(buffer, result?))
}

fn strip_editor_newline(original: &str, mut edited: String) -> String {
    if !original.ends_with('\n') && edited.ends_with('\n') {
        edited.pop();
        if edited.ends_with('\r') {
            edited.pop();
        }
    }
    edited
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_newline_added_by_editor() {
        assert_eq!(strip_editor_newline("a", "a\n".to_string()), "a");
        assert_eq!(strip_editor_newline("a", "a\r\n".to_string()), "a");
    }

    #[test]
    fn keeps_newline_the_buffer_already_had() {
        assert_eq!(strip_editor_newline("a\n", "a\n".to_string()), "a\n");
    }

    #[test]
    fn keeps_text_without_newline() {
        assert_eq!(strip_editor_newline("a", "b".to_string()), "b");
    }
}
