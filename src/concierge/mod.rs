//! The AI concierge: chat history, image turns and the `edit_image` tool.

mod session;
mod tools;

pub use session::{APOLOGY, ConciergeReply, ConciergeSession};
pub use tools::{EDIT_IMAGE, ToolOutcome};
