use crate::shared::constants::{ROLE_ADMIN, ROLE_GUIDE, ROLE_TOURIST};

/// Caller identity resolved from the bearer token.
///
/// Admins, guides and tourists live in separate tables with independent id
/// sequences, so an id is only meaningful together with its variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Admin(i64),
    Guide(i64),
    Tourist(i64),
}

impl Actor {
    /// Map a role claim back to an actor. Unknown roles yield `None`.
    pub fn from_role(role: &str, id: i64) -> Option<Self> {
        match role {
            ROLE_ADMIN => Some(Actor::Admin(id)),
            ROLE_GUIDE => Some(Actor::Guide(id)),
            ROLE_TOURIST => Some(Actor::Tourist(id)),
            _ => None,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Actor::Admin(id) | Actor::Guide(id) | Actor::Tourist(id) => *id,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Actor::Admin(_) => ROLE_ADMIN,
            Actor::Guide(_) => ROLE_GUIDE,
            Actor::Tourist(_) => ROLE_TOURIST,
        }
    }
}
