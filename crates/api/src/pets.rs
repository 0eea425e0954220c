//! `PetRepo` over the `mascotas/` endpoints.

use adopta_pets::{NewPet, Pet, PetError, PetRepo, PetResult};
use adopta_users::{PetId, RemoteError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::client::{ApiClient, Body};
use crate::error::ApiError;

const NOT_FOUND: u16 = 404;

fn pet_error(err: ApiError, id: Option<PetId>) -> PetError {
    match (err.status(), id) {
        (Some(NOT_FOUND), Some(id)) => PetError::not_found(id),
        _ => RemoteError::from(err).into(),
    }
}

fn publish_form(pet: &NewPet) -> Form {
    let mut form = Form::new();
    for (name, value) in pet.form_fields() {
        form = form.text(name, value);
    }
    if let Some(image) = &pet.image {
        let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        form = form.part("imagen", part);
    }
    form
}

#[async_trait]
impl PetRepo for ApiClient {
    async fn list(&self) -> PetResult<Vec<Pet>> {
        self.get_json("mascotas/")
            .await
            .map_err(|err| pet_error(err, None))
    }

    async fn get(&self, id: PetId) -> PetResult<Pet> {
        self.get_json(&format!("mascotas/{id}/"))
            .await
            .map_err(|err| pet_error(err, Some(id)))
    }

    async fn create(&self, pet: &NewPet) -> PetResult<Pet> {
        self.send_form(Method::POST, "mascotas/", publish_form(pet))
            .await
            .map_err(|err| pet_error(err, None))
    }

    async fn delete(&self, id: PetId) -> PetResult<()> {
        self.send(Method::DELETE, &format!("mascotas/{id}/"), Body::Empty)
            .await
            .map_err(|err| pet_error(err, Some(id)))?;
        Ok(())
    }
}
