use crate::{
    config::Config,
    errors::{FileOperation, IoError},
};
use inquire::{validator::Validation, CustomUserError, InquireError, Text};
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("Error occurred trying to prompt user")]
    #[diagnostic(
        code(patchgen::prompt::inquire),
        help("Run from an interactive terminal or pass the folder as an argument")
    )]
    Inquire(#[from] InquireError),

    #[error("I/O error within prompt domain")]
    #[diagnostic(code(patchgen::prompt::io))]
    Io(#[from] IoError),
}

fn prompt_message(config: &Config) -> String {
    let extensions = config
        .allowed_extensions
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(" and ");

    format!("Select the folder with {} files:", extensions)
}

fn validate_folder(input: &str) -> Result<Validation, CustomUserError> {
    let input = input.trim();

    if input.is_empty() || Path::new(input).is_dir() {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(
            format!("'{}' is not an existing folder", input).into(),
        ))
    }
}

/// Asks the user for the folder to scan.
///
/// Returns `Ok(None)` when nothing was selected: empty input, Esc or Ctrl-C.
/// A selection is returned as an absolute path.
pub fn select_input_folder(config: &Config) -> Result<Option<PathBuf>, PromptError> {
    let answer = Text::new(&prompt_message(config))
        .with_help_message("Leave empty or press Esc to cancel")
        .with_validator(validate_folder)
        .prompt();

    let answer = match answer {
        Ok(answer) => answer,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(None)
        }
        Err(error) => return Err(error.into()),
    };

    let answer = answer.trim();

    if answer.is_empty() {
        return Ok(None);
    }

    let absolute = std::path::absolute(answer)
        .map_err(|error| IoError::new(FileOperation::Resolve, PathBuf::from(answer), error))?;

    Ok(Some(absolute))
}
