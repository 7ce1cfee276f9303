//! Hotel areas and their subdivisions

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeZone {
    Chambre,
    Reception,
    Restaurant,
    Spa,
    Piscine,
    Cuisine,
    Technique,
    Autre,
}

impl_domain_status_conversions!(TypeZone {
    Chambre => "CHAMBRE",
    Reception => "RECEPTION",
    Restaurant => "RESTAURANT",
    Spa => "SPA",
    Piscine => "PISCINE",
    Cuisine => "CUISINE",
    Technique => "TECHNIQUE",
    Autre => "AUTRE",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: i64,
    pub nom: String,
    #[serde(rename = "type")]
    pub type_zone: TypeZone,
    pub hotel_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SousZone {
    pub id: i64,
    pub nom: String,
    pub zone_id: i64,
}

/// A zone with the sub-areas it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneWithSousZones {
    pub id: i64,
    pub nom: String,
    #[serde(rename = "type")]
    pub type_zone: TypeZone,
    pub sous_zones: Vec<super::SousZoneRef>,
}
