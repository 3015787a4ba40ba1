use crate::db::errors::RepositoryError;
use crate::db::DbConnection;
use crate::models::user::{NewUser, User};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error};
use log::error;

#[derive(Clone)]
pub struct UserOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl UserOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_users: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;
        users
            .order_by(id.asc())
            .load::<User>(conn.connection())
            .map_err(|e| {
                error!("list_users: error fetching users: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_user(&self, user_id: i32) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_user: failed to acquire DB connection for id {}: {}",
                user_id, e
            );
            e
        })?;

        use crate::db::schema::users::dsl::*;
        users
            .find(user_id)
            .first::<User>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => {
                    RepositoryError::NotFound(format!("User {user_id} not found"))
                }
                other => {
                    error!("get_user: error fetching user with id {}: {}", user_id, other);
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_user: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;

        let existing = users
            .filter(phone_number.eq(&new_user.phone_number))
            .first::<User>(conn.connection())
            .optional()
            .map_err(|e| {
                error!(
                    "create_user: error checking phone number '{}': {}",
                    new_user.phone_number, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        if existing.is_some() {
            return Err(RepositoryError::Conflict(format!(
                "User with phone number {} already exists",
                new_user.phone_number
            )));
        }

        diesel::insert_into(users)
            .values(&new_user)
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_user: error inserting user with phone number '{}': {}",
                    new_user.phone_number, e
                );
                match e {
                    Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::Conflict(format!(
                            "User with phone number {} already exists",
                            new_user.phone_number
                        ))
                    }
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    /// Resolves the customer record for an inbound message, inserting one on
    /// first contact. A concurrent first contact from the same number races
    /// on the unique phone constraint; the loser surfaces the store error.
    pub fn get_or_create_user(
        &self,
        phone: &str,
        display_name: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_or_create_user: failed to acquire DB connection for '{}': {}",
                phone, e
            );
            e
        })?;

        use crate::db::schema::users::dsl::*;

        let found = users
            .filter(phone_number.eq(phone))
            .first::<User>(conn.connection())
            .optional()
            .map_err(|e| {
                error!(
                    "get_or_create_user: error looking up phone number '{}': {}",
                    phone, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        if let Some(user) = found {
            return Ok(user);
        }

        diesel::insert_into(users)
            .values((phone_number.eq(phone), name.eq(display_name)))
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "get_or_create_user: error inserting user for phone number '{}': {}",
                    phone, e
                );
                RepositoryError::DatabaseError(e)
            })
    }
}
