//! Chat-bot platform client.
//!
//! Only builds links for now: invoices are deep links back into the bot and
//! no message is ever sent through the Bot API.

use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Clone, Debug)]
pub struct BotClient {
    token: Option<Secret<String>>,
    username: String,
}

impl BotClient {
    pub fn new(token: Option<Secret<String>>, username: impl Into<String>) -> Self {
        let token = token.filter(|t| !t.expose_secret().trim().is_empty());
        Self {
            token,
            username: username.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Bot API base URL, `None` without a token.
    pub fn api_base(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("{}/bot{}", TELEGRAM_API_BASE, token.expose_secret()))
    }

    /// Synthetic invoice link that opens the bot with the order id as start payload.
    pub fn invoice_link(&self, order_id: Uuid) -> String {
        format!("https://t.me/{}?start={}", self.username, order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_link_deep_links_into_the_bot() {
        let bot = BotClient::new(None, "astro_bot");
        let id = Uuid::new_v4();
        assert_eq!(
            bot.invoice_link(id),
            format!("https://t.me/astro_bot?start={}", id)
        );
    }

    #[test]
    fn api_base_needs_a_token() {
        assert!(BotClient::new(None, "astro_bot").api_base().is_none());
        assert!(!BotClient::new(Some(Secret::new(" ".into())), "astro_bot").is_configured());

        let bot = BotClient::new(Some(Secret::new("123:abc".into())), "astro_bot");
        assert_eq!(
            bot.api_base().as_deref(),
            Some("https://api.telegram.org/bot123:abc")
        );
    }
}
