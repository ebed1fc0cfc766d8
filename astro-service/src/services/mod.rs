pub mod bot;
pub mod generator;
pub mod prompts;
pub mod providers;
pub mod store;

pub use bot::BotClient;
pub use generator::ContentGenerator;
pub use store::{InMemoryOrderRepository, OrderRepository};
