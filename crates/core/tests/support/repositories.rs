//! In-memory implementations of the core ports
//!
//! One store backs every port so services built in a test see the same
//! rows. Writes can be switched to fail to exercise storage error paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hotelix_core::{HotelRepository, InterventionRepository, UserRepository, ZoneRepository};
use hotelix_domain::{
    AssigneRef, DemandeurRef, Hotel, HotelixError, Intervention, InterventionFilter,
    InterventionSnapshot, InterventionWithRelations, NewIntervention, NewUser, Origine, Priorite,
    Result as DomainResult, Role, SousZone, SousZoneRef, Statut, TypeIntervention, TypeZone, User,
    Zone, ZoneRef, ZoneWithSousZones,
};

#[derive(Default)]
struct Tables {
    hotels: Vec<Hotel>,
    users: Vec<User>,
    zones: Vec<Zone>,
    sous_zones: Vec<SousZone>,
    interventions: Vec<Intervention>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn with_relations(
        &self,
        intervention: &Intervention,
    ) -> DomainResult<InterventionWithRelations> {
        let demandeur = self
            .users
            .iter()
            .find(|u| u.id == intervention.demandeur_id)
            .ok_or_else(|| HotelixError::Database("dangling demandeur".into()))?;
        let zone = self
            .zones
            .iter()
            .find(|z| z.id == intervention.zone_id)
            .ok_or_else(|| HotelixError::Database("dangling zone".into()))?;

        Ok(InterventionWithRelations {
            intervention: intervention.clone(),
            demandeur: DemandeurRef {
                id: demandeur.id,
                name: demandeur.name.clone(),
                email: demandeur.email.clone(),
                role: demandeur.role,
            },
            assigne: intervention.assigne_id.and_then(|id| {
                self.users.iter().find(|u| u.id == id).map(|u| AssigneRef {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    specialite: u.specialite.clone(),
                })
            }),
            zone: ZoneRef { id: zone.id, nom: zone.nom.clone(), type_zone: zone.type_zone },
            sous_zone: intervention.sous_zone_id.and_then(|id| {
                self.sous_zones
                    .iter()
                    .find(|s| s.id == id)
                    .map(|s| SousZoneRef { id: s.id, nom: s.nom.clone() })
            }),
        })
    }
}

/// Shared in-memory backing store for every repository port.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
    blind_email_lookups: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create` and `update` calls fail with a database error.
    pub fn fail_writes(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    /// Make `find_by_email` miss, as when another request inserts the same
    /// email between the lookup and the insert.
    pub fn blind_email_lookups(&self, enabled: bool) {
        self.blind_email_lookups.store(enabled, Ordering::SeqCst);
    }

    fn check_writable(&self) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(HotelixError::Database("disk I/O error".into()));
        }
        Ok(())
    }

    pub fn add_hotel(&self, nom: &str) -> Hotel {
        let mut tables = self.tables.lock().unwrap();
        let hotel = Hotel {
            id: tables.next_id(),
            nom: nom.to_string(),
            adresse: format!("1 rue de {nom}"),
            pays: "France".to_string(),
        };
        tables.hotels.push(hotel.clone());
        hotel
    }

    pub fn add_user(&self, hotel_id: i64, role: Role, name: Option<&str>, email: &str) -> User {
        let mut tables = self.tables.lock().unwrap();
        let user = User {
            id: tables.next_id(),
            email: email.to_string(),
            password_hash: "not-a-hash".to_string(),
            name: name.map(str::to_string),
            role,
            specialite: (role == Role::Technicien).then(|| "Plomberie".to_string()),
            hotel_id,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        tables.users.push(user.clone());
        user
    }

    pub fn add_zone(&self, hotel_id: i64, nom: &str) -> Zone {
        let mut tables = self.tables.lock().unwrap();
        let zone = Zone {
            id: tables.next_id(),
            nom: nom.to_string(),
            type_zone: TypeZone::Chambre,
            hotel_id,
        };
        tables.zones.push(zone.clone());
        zone
    }

    pub fn add_sous_zone(&self, zone_id: i64, nom: &str) -> SousZone {
        let mut tables = self.tables.lock().unwrap();
        let sous_zone = SousZone { id: tables.next_id(), nom: nom.to_string(), zone_id };
        tables.sous_zones.push(sous_zone.clone());
        sous_zone
    }

    /// Insert a row as-is, assigning it a fresh id.
    pub fn add_intervention(&self, mut intervention: Intervention) -> Intervention {
        let mut tables = self.tables.lock().unwrap();
        intervention.id = tables.next_id();
        tables.interventions.push(intervention.clone());
        intervention
    }

    pub fn intervention(&self, id: i64) -> Option<Intervention> {
        self.tables.lock().unwrap().interventions.iter().find(|i| i.id == id).cloned()
    }

    pub fn set_password_hash(&self, user_id: i64, hash: &str) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.password_hash = hash.to_string();
        }
    }
}

/// Open EN_ATTENTE ticket with no assignee.
pub fn intervention(
    hotel_id: i64,
    demandeur_id: i64,
    zone_id: i64,
    created: DateTime<Utc>,
) -> Intervention {
    Intervention {
        id: 0,
        titre: "Fuite d'eau".to_string(),
        description: None,
        statut: Statut::EnAttente,
        type_intervention: TypeIntervention::Plomberie,
        priorite: Priorite::Normale,
        origine: Origine::Staff,
        date_creation: created,
        date_debut: None,
        date_fin: None,
        hotel_id,
        demandeur_id,
        assigne_id: None,
        zone_id,
        sous_zone_id: None,
    }
}

#[async_trait]
impl HotelRepository for InMemoryStore {
    async fn list(&self) -> DomainResult<Vec<Hotel>> {
        let mut hotels = self.tables.lock().unwrap().hotels.clone();
        hotels.sort_by(|a, b| a.nom.cmp(&b.nom));
        Ok(hotels)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Hotel>> {
        Ok(self.tables.lock().unwrap().hotels.iter().find(|h| h.id == id).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.tables.lock().unwrap().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        if self.blind_email_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.tables.lock().unwrap().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_and_hotel(
        &self,
        email: &str,
        hotel_id: i64,
    ) -> DomainResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email == email && u.hotel_id == hotel_id)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> DomainResult<User> {
        self.check_writable()?;
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(HotelixError::Conflict("email already used".into()));
        }
        let created = User {
            id: tables.next_id(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            role: user.role,
            specialite: user.specialite,
            hotel_id: user.hotel_id,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn list_technicians(&self, hotel_id: i64) -> DomainResult<Vec<User>> {
        let mut technicians: Vec<User> = self
            .tables
            .lock()
            .unwrap()
            .users
            .iter()
            .filter(|u| u.hotel_id == hotel_id && u.role == Role::Technicien)
            .cloned()
            .collect();
        technicians.sort_by(|a, b| match (&a.name, &b.name) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(technicians)
    }
}

#[async_trait]
impl InterventionRepository for InMemoryStore {
    async fn create(&self, new: NewIntervention) -> DomainResult<Intervention> {
        self.check_writable()?;
        let mut tables = self.tables.lock().unwrap();
        let created = Intervention {
            id: tables.next_id(),
            titre: new.titre,
            description: new.description,
            statut: new.statut,
            type_intervention: new.type_intervention,
            priorite: new.priorite,
            origine: new.origine,
            date_creation: new.date_creation,
            date_debut: None,
            date_fin: None,
            hotel_id: new.hotel_id,
            demandeur_id: new.demandeur_id,
            assigne_id: new.assigne_id,
            zone_id: new.zone_id,
            sous_zone_id: new.sous_zone_id,
        };
        tables.interventions.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Intervention>> {
        Ok(self.intervention(id))
    }

    async fn list_with_relations(
        &self,
        filter: InterventionFilter,
    ) -> DomainResult<Vec<InterventionWithRelations>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<&Intervention> =
            tables.interventions.iter().filter(|i| filter.matches(i)).collect();
        rows.sort_by(|a, b| b.date_creation.cmp(&a.date_creation));
        rows.into_iter().map(|i| tables.with_relations(i)).collect()
    }

    async fn list_available(&self, hotel_id: i64) -> DomainResult<Vec<InterventionWithRelations>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<&Intervention> = tables
            .interventions
            .iter()
            .filter(|i| i.hotel_id == hotel_id && i.assigne_id.is_none())
            .filter(|i| matches!(i.statut, Statut::EnAttente | Statut::EnCours))
            .collect();
        rows.sort_by(|a, b| {
            b.priorite.cmp(&a.priorite).then_with(|| a.date_creation.cmp(&b.date_creation))
        });
        rows.into_iter().map(|i| tables.with_relations(i)).collect()
    }

    async fn update(&self, intervention: &Intervention) -> DomainResult<Intervention> {
        self.check_writable()?;
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .interventions
            .iter_mut()
            .find(|i| i.id == intervention.id)
            .ok_or_else(|| HotelixError::NotFound("Intervention non trouvée".into()))?;
        *stored = intervention.clone();
        Ok(stored.clone())
    }

    async fn snapshots(
        &self,
        filter: InterventionFilter,
    ) -> DomainResult<Vec<InterventionSnapshot>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<InterventionSnapshot> = tables
            .interventions
            .iter()
            .filter(|i| filter.matches(i))
            .map(InterventionSnapshot::from)
            .collect();
        rows.sort_by_key(|s| s.date_creation);
        Ok(rows)
    }
}

#[async_trait]
impl ZoneRepository for InMemoryStore {
    async fn list_with_sous_zones(&self, hotel_id: i64) -> DomainResult<Vec<ZoneWithSousZones>> {
        let tables = self.tables.lock().unwrap();
        let mut zones: Vec<ZoneWithSousZones> = tables
            .zones
            .iter()
            .filter(|z| z.hotel_id == hotel_id)
            .map(|z| {
                let mut sous_zones: Vec<SousZoneRef> = tables
                    .sous_zones
                    .iter()
                    .filter(|s| s.zone_id == z.id)
                    .map(|s| SousZoneRef { id: s.id, nom: s.nom.clone() })
                    .collect();
                sous_zones.sort_by(|a, b| a.nom.cmp(&b.nom));
                ZoneWithSousZones {
                    id: z.id,
                    nom: z.nom.clone(),
                    type_zone: z.type_zone,
                    sous_zones,
                }
            })
            .collect();
        zones.sort_by(|a, b| a.nom.cmp(&b.nom));
        Ok(zones)
    }

    async fn create_zone(
        &self,
        hotel_id: i64,
        nom: &str,
        type_zone: TypeZone,
    ) -> DomainResult<Zone> {
        let mut tables = self.tables.lock().unwrap();
        let zone = Zone { id: tables.next_id(), nom: nom.to_string(), type_zone, hotel_id };
        tables.zones.push(zone.clone());
        Ok(zone)
    }

    async fn create_sous_zone(&self, zone_id: i64, nom: &str) -> DomainResult<SousZone> {
        Ok(self.add_sous_zone(zone_id, nom))
    }

    async fn delete_zone(&self, zone_id: i64) -> DomainResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.sous_zones.iter().any(|s| s.zone_id == zone_id) {
            return Err(HotelixError::Conflict("zone still has sous-zones".into()));
        }
        tables.zones.retain(|z| z.id != zone_id);
        Ok(())
    }
}
