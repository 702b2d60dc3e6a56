pub mod conversation;
pub mod docs;
pub mod fallback;
pub mod health;
