//! DTOs for users_sea adapter.

/// DTO for creating a new user. `password_hash` is an already computed PHC
/// string.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub institute_id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
}

/// DTO for a partial profile update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none() && self.is_active.is_none()
    }
}
