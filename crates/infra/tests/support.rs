//! Shared fixtures for the infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hotelix_common::testing::TempDir;
use hotelix_core::{UserRepository, ZoneRepository};
use hotelix_domain::{
    NewIntervention, NewUser, Origine, Priorite, Role, Statut, TypeIntervention, TypeZone, User,
    Zone,
};
use hotelix_infra::database::{
    DbManager, SqliteHotelRepository, SqliteInterventionRepository, SqliteUserRepository,
    SqliteZoneRepository,
};

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run. The schema is applied and the default hotels are
/// seeded.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let temp_dir = TempDir::new("hotelix-infra-test").expect("temp dir should be created");
        let manager =
            DbManager::new(temp_dir.db_path("test"), 4).expect("db manager should be created");
        manager.run_migrations().expect("schema should apply");
        manager.seed_defaults().expect("seed should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    pub fn hotels(&self) -> SqliteHotelRepository {
        SqliteHotelRepository::new(Arc::clone(&self.manager))
    }

    pub fn users(&self) -> SqliteUserRepository {
        SqliteUserRepository::new(Arc::clone(&self.manager))
    }

    pub fn zones(&self) -> SqliteZoneRepository {
        SqliteZoneRepository::new(Arc::clone(&self.manager))
    }

    pub fn interventions(&self) -> SqliteInterventionRepository {
        SqliteInterventionRepository::new(Arc::clone(&self.manager))
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }

    pub async fn user(&self, hotel_id: i64, email: &str, role: Role, name: Option<&str>) -> User {
        self.users()
            .create(NewUser {
                email: email.to_string(),
                password_hash: "$argon2id$stub".to_string(),
                name: name.map(str::to_string),
                role,
                specialite: (role == Role::Technicien).then(|| "Plomberie".to_string()),
                hotel_id,
            })
            .await
            .expect("user should be created")
    }

    pub async fn zone(&self, hotel_id: i64, nom: &str) -> Zone {
        self.zones().create_zone(hotel_id, nom, TypeZone::Chambre).await.expect("zone created")
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// EN_ATTENTE ticket with the given priority and creation time.
pub fn new_intervention(
    hotel_id: i64,
    demandeur_id: i64,
    zone_id: i64,
    priorite: Priorite,
    created: DateTime<Utc>,
) -> NewIntervention {
    NewIntervention {
        titre: format!("Intervention {}", created.format("%d/%m %H:%M")),
        description: None,
        statut: Statut::EnAttente,
        type_intervention: TypeIntervention::Plomberie,
        priorite,
        origine: Origine::Staff,
        date_creation: created,
        hotel_id,
        demandeur_id,
        assigne_id: None,
        zone_id,
        sous_zone_id: None,
    }
}
