// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The taxonomy uses three severity levels that drive presentation at the
// failure boundary (the CLI).

use crate::error::{EngineFailure, LichtsatzError};

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Might work on the next attempt — bad luck with this photo.
    Transient,
    /// User must do something (install a dependency, fix a path).
    ActionRequired,
    /// Cannot be fixed by retrying or user action — wrong format, bad data.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying again without changes could help.
    pub retriable: bool,
    /// Severity level (drives presentation).
    pub severity: Severity,
}

/// Convert a `LichtsatzError` into a `HumanError`.
pub fn humanize_error(err: &LichtsatzError) -> HumanError {
    match err {
        LichtsatzError::Image(_) => HumanError {
            message: "There's a problem with this photo.".into(),
            suggestion: "The file may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        LichtsatzError::Pdf(detail) => HumanError {
            message: "The PDF couldn't be created.".into(),
            suggestion: format!("Try again with a different photo. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        LichtsatzError::Recognition(failure) => {
            if failure.nothing_installed() {
                HumanError {
                    message: "Text recognition isn't set up on this machine.".into(),
                    suggestion: "Install Tesseract, or download the ocrs model files, then try again. The PDF can still be created without text.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "We couldn't read any text from this photo.".into(),
                    suggestion: "Try a sharper photo with better lighting, making sure the text is clear and in focus. The PDF can still be created without text.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        LichtsatzError::UnknownPageSize(choice) => HumanError {
            message: "That page size isn't supported.".into(),
            suggestion: format!("Choose \"a4\" or \"letter\". (Got: {choice})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        LichtsatzError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to read or write that file.".into(),
                    suggestion: "Check the file permissions, or try a different location.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your storage may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        LichtsatzError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

/// Describe a single engine's failure in one short line (for status output).
pub fn describe_engine_failure(failure: &EngineFailure) -> String {
    match failure {
        EngineFailure::Unavailable(detail) => format!("not available ({detail})"),
        EngineFailure::Crashed(detail) => format!("failed ({detail})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognitionFailure;

    #[test]
    fn nothing_installed_is_action_required() {
        let err = LichtsatzError::Recognition(RecognitionFailure {
            primary: EngineFailure::Unavailable("tesseract not found".into()),
            fallback: EngineFailure::Unavailable("models missing".into()),
        });
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn engine_crash_is_transient() {
        let err = LichtsatzError::Recognition(RecognitionFailure {
            primary: EngineFailure::Crashed("exit code 1".into()),
            fallback: EngineFailure::Crashed("inference error".into()),
        });
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn bad_image_is_permanent() {
        let human = humanize_error(&LichtsatzError::Image("truncated JPEG".into()));
        assert_eq!(human.severity, Severity::Permanent);
        assert!(!human.retriable);
    }

    #[test]
    fn unknown_page_size_names_the_choice() {
        let human = humanize_error(&LichtsatzError::UnknownPageSize("tabloid".into()));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("tabloid"));
    }

    #[test]
    fn missing_file_is_action_required() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let human = humanize_error(&LichtsatzError::Io(io));
        assert_eq!(human.severity, Severity::ActionRequired);
    }
}
