mod message;

pub use message::{Message, MessagesCount, PostMessage};
