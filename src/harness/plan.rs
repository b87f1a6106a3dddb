//! Phase catalogue and its declared artifact dependencies
//!
//! Each phase states which artifacts its steps read and which they produce.
//! `validate` checks, before anything is sent, that every artifact a phase
//! reads can be produced by a phase running earlier.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::state::{Actor, Artifact, Entity};
use crate::common::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Health,
    Auth,
    RoleSelection,
    OwnerProfile,
    Listings,
    Reviews,
    AccessControl,
    EdgeCases,
}

const OWNER_TOKEN: Artifact = Artifact::Token(Actor::Owner);
const CUSTOMER_TOKEN: Artifact = Artifact::Token(Actor::Customer);
const OWNER_ID: Artifact = Artifact::Id(Entity::OwnerId);
const CUSTOMER_ID: Artifact = Artifact::Id(Entity::CustomerId);
const LISTING_ID: Artifact = Artifact::Id(Entity::ListingId);
const REVIEW_ID: Artifact = Artifact::Id(Entity::ReviewId);

impl Phase {
    /// The fixed scenario, in execution order
    pub const ALL: [Phase; 8] = [
        Phase::Health,
        Phase::Auth,
        Phase::RoleSelection,
        Phase::OwnerProfile,
        Phase::Listings,
        Phase::Reviews,
        Phase::AccessControl,
        Phase::EdgeCases,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Phase::Health => "HEALTH CHECK",
            Phase::Auth => "AUTHENTICATION FLOW",
            Phase::RoleSelection => "USER INFO & ROLE SELECTION",
            Phase::OwnerProfile => "OWNER PROFILE",
            Phase::Listings => "LISTINGS LIFECYCLE",
            Phase::Reviews => "REVIEWS",
            Phase::AccessControl => "SECURITY & ACCESS CONTROL",
            Phase::EdgeCases => "EDGE CASES & VALIDATION",
        }
    }

    /// Artifacts the phase's steps read
    pub fn requires(self) -> &'static [Artifact] {
        match self {
            Phase::Health | Phase::Auth => &[],
            Phase::RoleSelection | Phase::OwnerProfile | Phase::EdgeCases => {
                &[OWNER_TOKEN, CUSTOMER_TOKEN]
            }
            Phase::Listings => &[OWNER_TOKEN, CUSTOMER_TOKEN, OWNER_ID],
            Phase::Reviews => &[OWNER_TOKEN, CUSTOMER_TOKEN, LISTING_ID],
            Phase::AccessControl => &[CUSTOMER_TOKEN],
        }
    }

    /// Artifacts the phase's steps may write
    pub fn produces(self) -> &'static [Artifact] {
        match self {
            Phase::Auth => &[OWNER_TOKEN, CUSTOMER_TOKEN, OWNER_ID, CUSTOMER_ID],
            Phase::Listings => &[LISTING_ID],
            Phase::Reviews => &[REVIEW_ID],
            _ => &[],
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Check that the ordered phases form a consistent plan
pub fn validate(phases: &[Phase]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut available: HashSet<Artifact> = HashSet::new();

    for &phase in phases {
        if !seen.insert(phase) {
            return Err(Error::DuplicatePhase(phase.to_string()));
        }
        if let Some(missing) = phase.requires().iter().find(|a| !available.contains(*a)) {
            return Err(Error::unsatisfied_artifact(phase, missing));
        }
        available.extend(phase.produces().iter().copied());
    }

    Ok(())
}
