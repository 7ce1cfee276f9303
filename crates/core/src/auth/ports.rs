//! Port interfaces for hotels and user accounts

use async_trait::async_trait;
use hotelix_domain::{Hotel, NewUser, Result, User};

/// Hotel lookups
#[async_trait]
pub trait HotelRepository: Send + Sync {
    /// Every hotel, ordered by name
    async fn list(&self) -> Result<Vec<Hotel>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Hotel>>;
}

/// User account persistence
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Emails are unique across hotels
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_email_and_hotel(&self, email: &str, hotel_id: i64) -> Result<Option<User>>;

    async fn create(&self, user: NewUser) -> Result<User>;

    /// TECHNICIEN users of a hotel, ordered by name with unnamed users last
    async fn list_technicians(&self, hotel_id: i64) -> Result<Vec<User>>;
}
