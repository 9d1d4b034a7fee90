use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

/// User model for reading from database.
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub full_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewUser model for inserting new records.
///
/// Carries the already-hashed credential. There is deliberately no way to
/// insert a user without a hash: callers go through the service layer,
/// which produces the hash from the plaintext password.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub full_name: Option<String>,
}

/// UserChanges model for partial updates.
/// Derives AsChangeset for UPDATE operations with optional fields.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges {
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
    pub full_name: Option<String>,
}

impl UserChanges {
    /// Whether any field would actually change. Diesel rejects an UPDATE
    /// with an empty changeset, so services short-circuit on this.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.hashed_password.is_none()
            && self.is_active.is_none()
            && self.is_superuser.is_none()
            && self.full_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_changeset_is_detected() {
        assert!(UserChanges::default().is_empty());
    }

    #[test]
    fn changeset_with_any_field_is_not_empty() {
        let changes = UserChanges {
            full_name: Some("Jane".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
