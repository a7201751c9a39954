use qrgen_core::{render::LogoError, GenerateError};

use crate::services::shell::PendingJob;

pub const CHOICE_PROMPT: &str = "Choose an option: ";
pub const PAYLOAD_PROMPT: &str = "Enter the text or URL for the QR code (or press Enter for the default): ";
pub const LOGO_PROMPT: &str = "Enter the path of the logo (or press Enter for the default logo): ";
pub const OUTPUT_DIR_PROMPT: &str = "Enter the directory to save the QR code in (or press Enter for the Downloads folder): ";
pub const CONFIRM_PROMPT: &str = "Do you want to continue? (s/n): ";

pub const INVALID_CHOICE: &str = "Invalid option. Please try again.";
pub const CANCELLED: &str = "Operation cancelled.";

/// The only answer accepted as "yes", compared after lowercasing.
pub const AFFIRMATIVE: &str = "s";

pub fn is_affirmative(answer: &str) -> bool {
    answer.trim_end_matches(['\r', '\n']).to_lowercase() == AFFIRMATIVE
}

pub fn render_menu() -> String {
    [
        "",
        "Welcome to the QR Code Generator",
        "1. Generate QR Code",
        "2. Generate QR Code with Logo",
        "3. Exit",
        "",
    ]
    .join("\n")
}

pub fn render_summary(job: &PendingJob) -> String {
    match job {
        PendingJob::Plain(request) => format!(
            "You are about to generate a QR code for: {}\nThe file will be saved to: {}",
            request.payload,
            request.output_path.display()
        ),
        PendingJob::Logo(request) => format!(
            "You are about to generate a QR code for: {}\nWith the logo: {}\nThe file will be saved to: {}",
            request.base.payload,
            request.logo_path.display(),
            request.base.output_path.display()
        ),
    }
}

pub fn failure_message(error: &GenerateError) -> String {
    match error {
        GenerateError::Logo(LogoError::NotFound(path)) => format!(
            "Logo not found: {}. Please provide a valid logo.",
            path.display()
        ),
        GenerateError::Logo(e @ LogoError::Decode { .. }) => format!("Error loading the logo: {e}"),
        e => format!("Could not generate the QR code: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_is_affirmative() {
        for yes in ["s", "S", "s\n", "S\r\n"] {
            assert!(is_affirmative(yes), "{yes:?}");
        }
        for no in ["y", "Y", "n", "", " s", "sim", "yes please", "N"] {
            assert!(!is_affirmative(no), "{no:?}");
        }
    }

    #[test]
    fn test_menu_lists_three_options() {
        let menu = render_menu();
        assert!(menu.contains("1. Generate QR Code\n"));
        assert!(menu.contains("2. Generate QR Code with Logo"));
        assert!(menu.contains("3. Exit"));
    }

    #[test]
    fn test_failure_message_for_missing_logo() {
        let err = GenerateError::Logo(LogoError::NotFound(PathBuf::from("missing.png")));
        assert_eq!(
            failure_message(&err),
            "Logo not found: missing.png. Please provide a valid logo."
        );
    }
}
