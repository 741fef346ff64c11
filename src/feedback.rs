use crate::advisory::Advisory;

/// Acknowledge a feedback submission. The text only ever lives in the text box.
pub fn submit_feedback(text: &str) -> Advisory {
    if text.trim().is_empty() {
        Advisory::warning("Please write something before sending.")
    } else {
        log::info!("feedback submitted ({} chars, not stored)", text.chars().count());
        Advisory::success("Thanks for your feedback! (shown on screen only, not stored)")
    }
}
