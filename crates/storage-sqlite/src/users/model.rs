use chrono::NaiveDateTime;
use diesel::prelude::*;

use hivebook_core::users::User;

#[derive(Queryable, Selectable, Insertable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub external_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            external_id: db.external_id,
            email: db.email,
            display_name: db.display_name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
