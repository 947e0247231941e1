//! Fixed pools of nudges sent alongside each wish.

use rand::Rng;

use crate::models::contact::EventKind;

pub const BIRTHDAY_MESSAGES: [&str; 7] = [
    "Wish them well!",
    "Convey your love!",
    "Make them feel special!",
    "Send them a message!",
    "Wish them a happy birthday!",
    "Send them a birthday wish!",
    "Send them a birthday message!",
];

pub const ANNIVERSARY_MESSAGES: [&str; 7] = [
    "Wish them well!",
    "Convey your love!",
    "Make them feel special!",
    "Send them a message!",
    "Wish them a happy anniversary!",
    "Send them an anniversary wish!",
    "Send them an anniversary message!",
];

pub fn messages_for(event: EventKind) -> &'static [&'static str] {
    match event {
        EventKind::Birthday => &BIRTHDAY_MESSAGES,
        EventKind::Anniversary => &ANNIVERSARY_MESSAGES,
    }
}

/// Picks one message for `event`, uniformly at random.
pub fn pick_message<R: Rng>(event: EventKind, rng: &mut R) -> &'static str {
    let pool = messages_for(event);
    pool[rng.random_range(0..pool.len())]
}
