use serde::{Deserialize, Serialize};

/// Notification template for the scheduled birthday/anniversary wish.
pub const WISH_TEMPLATE: &str = "wish-notif";
/// Notification template for the on-demand gift ideas endpoint.
pub const GIFT_IDEAS_TEMPLATE: &str = "get-gift-ideas";

/// Who receives a notification. The email doubles as the subscriber id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub subscriber_id: String,
    pub email: String,
}

impl Recipient {
    pub fn email(email: &str) -> Self {
        Self {
            subscriber_id: email.to_string(),
            email: email.to_string(),
        }
    }
}

/// Template variables sent alongside a notification trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationPayload {
    Wish {
        user: String,
        event: String,
        giftlist: String,
        name: String,
        message: String,
    },
    GiftIdeas {
        user: String,
        giftideas: String,
    },
}

impl NotificationPayload {
    pub fn wish(name: &str, event: &str, message: &str, suggestions: String) -> Self {
        NotificationPayload::Wish {
            user: name.to_string(),
            event: event.to_string(),
            giftlist: suggestions,
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    pub fn gift_ideas(name: &str, suggestions: String) -> Self {
        NotificationPayload::GiftIdeas {
            user: name.to_string(),
            giftideas: suggestions,
        }
    }
}
