use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Returns `true` if `err` is the user cancelling a prompt (Escape or Ctrl+C).
pub fn is_prompt_cancelled(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

/// Treats a cancelled prompt as a clean exit.
///
/// Prints a newline to tidy the terminal and returns `Ok(())`; other errors
/// pass through.
pub fn handle_prompt_cancellation(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if is_prompt_cancelled(&e) => {
            println!();
            Ok(())
        }
        other => other,
    }
}
