use adopta_users::PetId;
use async_trait::async_trait;

use crate::entities::{NewPet, Pet};
use crate::types::PetResult;

/// Remote pet collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepo: Send + Sync {
    async fn list(&self) -> PetResult<Vec<Pet>>;

    async fn get(&self, id: PetId) -> PetResult<Pet>;

    /// The service assigns the publisher from the signed-in session
    async fn create(&self, pet: &NewPet) -> PetResult<Pet>;

    async fn delete(&self, id: PetId) -> PetResult<()>;
}
