//! Telegram transport.

mod client;
mod poller;
pub mod types;

pub use client::TelegramClient;
pub use poller::Poller;
