//! Catalogue operations used by the wall, detail, publish and dashboard pages.

use std::sync::Arc;

use adopta_users::{Identity, PetId, Role, Session};
use tracing::{debug, info, warn};

use super::pet_repo::PetRepo;
use crate::entities::{NewPet, Pet};
use crate::types::{PetError, PetResult};

pub struct PetService<R: ?Sized + PetRepo = dyn PetRepo> {
    repo: Arc<R>,
}

impl<R: ?Sized + PetRepo> Clone for PetService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: ?Sized + PetRepo> PetService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every pet currently up for adoption
    pub async fn list_pets(&self) -> PetResult<Vec<Pet>> {
        let pets = self.repo.list().await?;
        debug!(count = pets.len(), "loaded pets");
        Ok(pets)
    }

    pub async fn get_pet(&self, id: PetId) -> PetResult<Pet> {
        self.repo.get(id).await
    }

    /// Validate the form and hand it to the service.
    pub async fn publish(&self, pet: NewPet) -> PetResult<Pet> {
        validate_new_pet(&pet)?;

        let created = self.repo.create(&pet).await?;
        info!(pet_id = created.id, name = %created.name, "published pet");
        Ok(created)
    }

    /// Pets published by `identity`
    pub async fn my_pets(&self, identity: &Identity) -> PetResult<Vec<Pet>> {
        let pets = self.repo.list().await?;
        Ok(pets
            .into_iter()
            .filter(|pet| pet.is_published_by(&identity.username))
            .collect())
    }

    /// Remove a listing. Admins may remove any pet, publishers only their own.
    pub async fn delete_pet(&self, session: &Session, id: PetId) -> PetResult<()> {
        let user = match (&session.user, session.is_authenticated) {
            (Some(user), true) => user,
            _ => return Err(PetError::forbidden("Debes iniciar sesión")),
        };

        match user.role {
            Role::Admin => {}
            Role::Publisher => {
                let pet = self.repo.get(id).await?;
                if !pet.is_published_by(&user.username) {
                    warn!(pet_id = id, username = %user.username, "refusing to delete another publisher's pet");
                    return Err(PetError::forbidden(
                        "Solo puedes eliminar tus propias publicaciones",
                    ));
                }
            }
            Role::Adopter => {
                return Err(PetError::forbidden(
                    "No tienes permiso para eliminar publicaciones",
                ))
            }
        }

        self.repo.delete(id).await?;
        info!(pet_id = id, username = %user.username, "deleted pet");
        Ok(())
    }
}

fn validate_new_pet(pet: &NewPet) -> PetResult<()> {
    if pet.name.trim().is_empty() {
        return Err(PetError::validation("El nombre es obligatorio"));
    }
    if pet.description.trim().is_empty() {
        return Err(PetError::validation("La descripción es obligatoria"));
    }
    if pet.location_id.is_none() {
        return Err(PetError::validation("Selecciona una ubicación"));
    }
    if pet.species_id.is_none() {
        return Err(PetError::validation("Selecciona una especie"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Sex;
    use crate::services::pet_repo::MockPetRepo;
    use mockall::predicate::eq;

    fn pet(id: PetId, species: &str, publisher: &str) -> Pet {
        Pet {
            id,
            name: format!("pet-{id}"),
            description: "Cariñoso".into(),
            age_months: 6,
            formatted_age: None,
            vaccinated: true,
            reported_on: None,
            image: None,
            species_id: 1,
            species_name: Some(species.into()),
            sex: Sex::Macho,
            location_id: 1,
            location_state: None,
            location_abbreviation: None,
            publisher_id: None,
            publisher_username: Some(publisher.into()),
        }
    }

    fn session_for(username: &str, role: Role) -> Session {
        Session {
            user: Some(Identity::new(username, format!("{username}@example.com"), role)),
            is_authenticated: true,
            is_loading: false,
            adopted_pets: Vec::new(),
        }
    }

    fn form() -> NewPet {
        NewPet {
            name: "Michi".into(),
            age_months: 3,
            description: "Tranquila".into(),
            vaccinated: true,
            sex: Sex::Hembra,
            location_id: Some(4),
            species_id: Some(2),
            image: None,
        }
    }

    #[tokio::test]
    async fn my_pets_keeps_only_own_listings() {
        let mut repo = MockPetRepo::new();
        repo.expect_list().times(1).returning(|| {
            Ok(vec![
                pet(1, "Perro", "refugio"),
                pet(2, "Gato", "otro"),
                pet(3, "Gato", "refugio"),
            ])
        });
        let service = PetService::new(Arc::new(repo));

        let identity = Identity::new("refugio", "r@example.com", Role::Publisher);
        let mine = service.my_pets(&identity).await.unwrap();

        assert_eq!(mine.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn publish_rejects_incomplete_form_without_calling_service() {
        let mut repo = MockPetRepo::new();
        repo.expect_create().never();
        let service = PetService::new(Arc::new(repo));

        let mut missing_species = form();
        missing_species.species_id = None;
        assert_eq!(
            service.publish(missing_species).await.unwrap_err(),
            PetError::validation("Selecciona una especie")
        );

        let mut blank_name = form();
        blank_name.name = "   ".into();
        assert!(matches!(
            service.publish(blank_name).await,
            Err(PetError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn publish_forwards_valid_form() {
        let mut repo = MockPetRepo::new();
        repo.expect_create()
            .withf(|new_pet| new_pet.name == "Michi")
            .times(1)
            .returning(|_| Ok(pet(10, "Gato", "refugio")));
        let service = PetService::new(Arc::new(repo));

        let created = service.publish(form()).await.unwrap();
        assert_eq!(created.id, 10);
    }

    #[tokio::test]
    async fn admin_deletes_without_ownership_check() {
        let mut repo = MockPetRepo::new();
        repo.expect_get().never();
        repo.expect_delete().with(eq(5)).times(1).returning(|_| Ok(()));
        let service = PetService::new(Arc::new(repo));

        service
            .delete_pet(&session_for("admin", Role::Admin), 5)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn publisher_deletes_only_own_pets() {
        let mut repo = MockPetRepo::new();
        repo.expect_get()
            .with(eq(1))
            .returning(|id| Ok(pet(id, "Perro", "refugio")));
        repo.expect_get()
            .with(eq(2))
            .returning(|id| Ok(pet(id, "Perro", "otro")));
        repo.expect_delete().with(eq(1)).times(1).returning(|_| Ok(()));
        let service = PetService::new(Arc::new(repo));
        let session = session_for("refugio", Role::Publisher);

        service.delete_pet(&session, 1).await.unwrap();
        assert!(matches!(
            service.delete_pet(&session, 2).await,
            Err(PetError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn adopters_and_anonymous_users_cannot_delete() {
        let mut repo = MockPetRepo::new();
        repo.expect_delete().never();
        let service = PetService::new(Arc::new(repo));

        assert!(matches!(
            service.delete_pet(&session_for("luna", Role::Adopter), 1).await,
            Err(PetError::Forbidden { .. })
        ));
        assert!(matches!(
            service.delete_pet(&Session::initial(), 1).await,
            Err(PetError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn missing_pet_surfaces_not_found() {
        let mut repo = MockPetRepo::new();
        repo.expect_get()
            .returning(|id| Err(PetError::not_found(id)));
        let service = PetService::new(Arc::new(repo));

        assert_eq!(service.get_pet(99).await.unwrap_err(), PetError::not_found(99));
    }
}
