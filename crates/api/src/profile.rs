//! The `perfil/` endpoints.

use adopta_users::{Profile, ProfileUpdate};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiResult;

impl ApiClient {
    /// Profile of the signed-in account
    pub async fn get_profile(&self) -> ApiResult<Profile> {
        self.get_json("perfil/").await
    }

    /// Validate and send the edit form as multipart, like the browser form does.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<Profile> {
        update.validate()?;

        let mut form = Form::new();
        for (name, value) in update.text_fields() {
            form = form.text(name, value);
        }
        if let Some(avatar) = &update.avatar {
            let part = Part::bytes(avatar.bytes.clone()).file_name(avatar.file_name.clone());
            form = form.part("avatar", part);
        }

        let profile: Profile = self.send_form(Method::PUT, "perfil/", form).await?;
        info!(username = %profile.username, "profile updated");
        Ok(profile)
    }
}
