pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible to the binary that
// builds the web server router.
pub use rest::{
    chat_history_handler, generate_artifact_handler, list_artifacts_handler,
    send_chat_message_handler,
};
