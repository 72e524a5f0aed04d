use cattlecare_core::ValidationError;
use cattlecare_store::{check, default_now, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

string_enum! {
    /// What a user does on the platform.
    Role, "role" {
        Farmer => "farmer",
        Vet => "vet",
        Admin => "admin",
    }
}

/// Longest accepted `full_name` / `password`, in characters.
pub const USER_FIELD_MAX: usize = 100;

/// A farmer, vet or admin. Collection `users`.
///
/// The password is kept as given; nothing here hashes it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Set to the save time when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(full_name: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            full_name: full_name.into(),
            password: password.into(),
            role: Some(role),
            ..Default::default()
        }
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn clean(&mut self) -> Result<(), ValidationError> {
        let entity = Self::COLLECTION;
        check::required_str(entity, "full_name", &self.full_name)?;
        check::max_len(entity, "full_name", &self.full_name, USER_FIELD_MAX)?;
        check::required_str(entity, "password", &self.password)?;
        check::max_len(entity, "password", &self.password, USER_FIELD_MAX)?;
        check::required(entity, "role", &self.role)?;
        default_now(&mut self.last_login);
        Ok(())
    }
}
