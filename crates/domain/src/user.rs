use crate::shared::entity::{Entity, ID};

/// A `User` bridges the identity of a person on the messaging
/// platform to the `Reminder`s they own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct User {
    pub id: ID,
    /// Identity on the messaging platform. Unique across all `User`s
    /// and never changed after the first persistence.
    pub external_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Locale tag reported by the client, e.g. `en` or `pl`
    pub language: String,
}

impl User {
    pub fn new(external_id: i64) -> Self {
        Self {
            external_id,
            ..Default::default()
        }
    }
}

impl Entity for User {
    fn id(&self) -> ID {
        self.id
    }

    fn set_id(&mut self, id: ID) {
        self.id = id;
    }
}
