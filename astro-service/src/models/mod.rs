pub mod order;
pub mod service;

pub use order::{ContentSource, GeneratedContent, Order, OrderStatus};
pub use service::{
    BirthData, ContentRequest, ServiceType, TarotSpread, TarotSpreadChoice, Zodiac, ZodiacSign,
};
