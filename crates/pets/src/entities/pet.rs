use std::fmt;

use adopta_users::{PetId, Upload};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Anything a listing can be narrowed down by category.
pub trait Categorized {
    fn category(&self) -> Option<&str>;
}

/// A pet record as served by `mascotas/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    pub id: PetId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "edad_meses", default)]
    pub age_months: u32,
    /// Age as the service formats it
    #[serde(rename = "edad_formateada", default)]
    pub formatted_age: Option<String>,
    #[serde(rename = "vacunado", default)]
    pub vaccinated: bool,
    #[serde(rename = "fecha_reporte", default)]
    pub reported_on: Option<NaiveDate>,
    /// Image URL
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "especie")]
    pub species_id: i64,
    #[serde(rename = "especie_nombre", default)]
    pub species_name: Option<String>,
    #[serde(rename = "sexo", default)]
    pub sex: Sex,
    #[serde(rename = "ubicacion")]
    pub location_id: i64,
    #[serde(rename = "ubicacion_estado", default)]
    pub location_state: Option<String>,
    #[serde(rename = "ubicacion_abreviatura", default)]
    pub location_abbreviation: Option<String>,
    #[serde(rename = "publicador", default)]
    pub publisher_id: Option<i64>,
    #[serde(rename = "publicador_username", default)]
    pub publisher_username: Option<String>,
}

impl Pet {
    /// Age shown on cards: the service's own label when it sent one.
    pub fn age_label(&self) -> String {
        match self.formatted_age.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format_age(self.age_months),
        }
    }

    pub fn is_published_by(&self, username: &str) -> bool {
        self.publisher_username.as_deref() == Some(username)
    }

    /// "Estado (AB)" or whichever part is known
    pub fn location_label(&self) -> Option<String> {
        match (&self.location_state, &self.location_abbreviation) {
            (Some(state), Some(abbr)) => Some(format!("{state} ({abbr})")),
            (Some(state), None) => Some(state.clone()),
            (None, Some(abbr)) => Some(abbr.clone()),
            (None, None) => None,
        }
    }
}

impl Categorized for Pet {
    fn category(&self) -> Option<&str> {
        self.species_name.as_deref()
    }
}

/// Format a month count as "2 años, 3 meses".
pub fn format_age(months: u32) -> String {
    let years = months / 12;
    let months = months % 12;
    let mut parts = Vec::with_capacity(2);

    if years > 0 {
        parts.push(format!("{years} año{}", if years == 1 { "" } else { "s" }));
    }
    if months > 0 {
        parts.push(format!("{months} mes{}", if months == 1 { "" } else { "es" }));
    }

    if parts.is_empty() {
        "0 meses".to_string()
    } else {
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Macho,
    Hembra,
}

impl Sex {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Sex::Macho => "macho",
            Sex::Hembra => "hembra",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sex::Macho => "Macho",
            Sex::Hembra => "Hembra",
        })
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "macho" | "male" | "m" => Ok(Sex::Macho),
            "hembra" | "female" | "h" | "f" => Ok(Sex::Hembra),
            other => Err(format!("unknown sex: {other}")),
        }
    }
}

/// The publish form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPet {
    pub name: String,
    pub age_months: u32,
    pub description: String,
    pub vaccinated: bool,
    pub sex: Sex,
    pub location_id: Option<i64>,
    pub species_id: Option<i64>,
    pub image: Option<Upload>,
}

impl NewPet {
    /// Multipart text fields in the service's naming. Callers validate first,
    /// unset ids are skipped.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("nombre", self.name.trim().to_string()),
            ("edad_meses", self.age_months.to_string()),
            ("descripcion", self.description.trim().to_string()),
            ("vacunado", self.vaccinated.to_string()),
            ("sexo", self.sex.as_wire().to_string()),
        ];
        if let Some(location) = self.location_id {
            fields.push(("ubicacion", location.to_string()));
        }
        if let Some(species) = self.species_id {
            fields.push(("especie", species.to_string()));
        }
        fields
    }
}
