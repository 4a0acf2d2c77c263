// Export music utilities
pub mod embedded_messages;
pub mod voice;
