//! Command handlers, one module per entry point

pub mod ask;
pub mod chat;
pub mod ingest;

pub use ask::handle_ask;
pub use chat::handle_chat;
pub use chat::run_chat_loop;
pub use chat::spawn_line_reader;
pub use chat::ChatExit;
pub use chat::LineSource;
pub use ingest::build_ingestor;
pub use ingest::handle_ingest;
