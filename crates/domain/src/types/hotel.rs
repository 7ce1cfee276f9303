//! Hotel tenant

use serde::{Deserialize, Serialize};

/// A hotel; every user, zone and intervention belongs to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    pub nom: String,
    pub adresse: String,
    pub pays: String,
}
