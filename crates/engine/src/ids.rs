//! Message id generation

use rand::Rng;
use uuid::Uuid;

/// Issues the send ids of one message.
///
/// A single 128-bit base is drawn from the caller's random source and each
/// id is the base plus the send's ordinal, so ids never repeat within a
/// message (even with a constant random source) and a seeded run
/// reproduces them exactly.
#[derive(Debug, Clone)]
pub struct MessageIds {
    base: u128,
    issued: u128,
}

impl MessageIds {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            base: rng.gen(),
            issued: 0,
        }
    }

    /// Next 32-char hex id
    pub fn next_id(&mut self) -> String {
        let id = Uuid::from_u128(self.base.wrapping_add(self.issued));
        self.issued += 1;
        id.simple().to_string()
    }
}
