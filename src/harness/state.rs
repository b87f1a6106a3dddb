//! Scenario state: artifacts carried between steps
//!
//! A single instance lives for one run and is owned by the sequencer.
//! Every artifact is write-once: the first recorded value wins.

use std::collections::HashMap;
use std::fmt;

/// Well-formed identifier that the marketplace never issues
pub const ABSENT_ID: &str = "507f1f77bcf86cd799439011";

/// Logical actor holding a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    Owner,
    Customer,
}

impl Actor {
    /// Capitalised name used in check labels
    pub fn label(self) -> &'static str {
        match self {
            Actor::Owner => "Owner",
            Actor::Customer => "Customer",
        }
    }

    /// Role value accepted by `/user/select-role`
    pub fn role(self) -> &'static str {
        match self {
            Actor::Owner => "OWNER",
            Actor::Customer => "CUSTOMER",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Actor::Owner => "owner",
            Actor::Customer => "customer",
        })
    }
}

/// Entity whose identifier is carried forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    OwnerId,
    CustomerId,
    ListingId,
    ReviewId,
}

impl Entity {
    pub fn user(actor: Actor) -> Self {
        match actor {
            Actor::Owner => Entity::OwnerId,
            Actor::Customer => Entity::CustomerId,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::OwnerId => "owner_id",
            Entity::CustomerId => "customer_id",
            Entity::ListingId => "listing_id",
            Entity::ReviewId => "review_id",
        })
    }
}

/// Anything one step produces for a later step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    Token(Actor),
    Id(Entity),
}

impl Artifact {
    pub fn is_credential(self) -> bool {
        matches!(self, Artifact::Token(_))
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Token(actor) => write!(f, "{} token", actor),
            Artifact::Id(entity) => write!(f, "{}", entity),
        }
    }
}

#[derive(Debug, Default)]
pub struct ScenarioState {
    tokens: HashMap<Actor, String>,
    identifiers: HashMap<Entity, String>,
}

impl ScenarioState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self, actor: Actor) -> Option<&str> {
        self.tokens.get(&actor).map(String::as_str)
    }

    /// Store a token unless one is already held. Returns whether it was stored.
    pub fn record_token(&mut self, actor: Actor, token: Option<String>) -> bool {
        match token.filter(|t| !t.is_empty()) {
            Some(token) if !self.tokens.contains_key(&actor) => {
                tracing::debug!(%actor, "Recorded token");
                self.tokens.insert(actor, token);
                true
            }
            _ => false,
        }
    }

    pub fn id(&self, entity: Entity) -> Option<&str> {
        self.identifiers.get(&entity).map(String::as_str)
    }

    /// The identifier, or `ABSENT_ID` when no step produced it
    pub fn id_or_absent(&self, entity: Entity) -> &str {
        self.id(entity).unwrap_or(ABSENT_ID)
    }

    /// Store an identifier unless one is already held. Returns whether it was stored.
    pub fn record_id(&mut self, entity: Entity, id: Option<String>) -> bool {
        match id.filter(|i| !i.is_empty()) {
            Some(id) if !self.identifiers.contains_key(&entity) => {
                tracing::debug!(%entity, %id, "Recorded identifier");
                self.identifiers.insert(entity, id);
                true
            }
            _ => false,
        }
    }

    pub fn has(&self, artifact: Artifact) -> bool {
        match artifact {
            Artifact::Token(actor) => self.tokens.contains_key(&actor),
            Artifact::Id(entity) => self.identifiers.contains_key(&entity),
        }
    }
}
