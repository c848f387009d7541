//! `PostgreSQL` user directory implementation.

use super::{
    models::{NewUserRow, UserRow},
    schema::{registration_profiles, users},
};
use crate::registration::{
    adapters::credentials,
    domain::{Account, EmailAddress, UserId, Username},
    ports::{DirectoryError, DirectoryResult, NewAccount, UserDirectory},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by registration adapters.
pub type RegistrationPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: RegistrationPgPool,
}

impl PostgresUserDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RegistrationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(DirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(DirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn create(&self, account: NewAccount) -> DirectoryResult<Account> {
        let password_hash =
            credentials::hash_password(account.password()).map_err(DirectoryError::persistence)?;
        let username = account.username().clone();
        let new_row = NewUserRow {
            id: UserId::new().into_inner(),
            username: username.as_str().to_owned(),
            email: account.email().as_str().to_owned(),
            password_hash,
            is_active: false,
            joined_at: account.joined_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(users::table)
                .values(&new_row)
                .get_result::<UserRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryError::DuplicateUsername(username.clone())
                    }
                    _ => DirectoryError::persistence(err),
                })?;
            row_to_account(row)
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> DirectoryResult<Option<Account>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> DirectoryResult<Option<Account>> {
        let email_str = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(&email_str))
                .order(users::joined_at.asc())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?;
            row.map(row_to_account).transpose()
        })
        .await
    }

    async fn set_active(&self, id: UserId, active: bool) -> DirectoryResult<Account> {
        self.run_blocking(move |connection| {
            let row = diesel::update(users::table.filter(users::id.eq(id.into_inner())))
                .set(users::is_active.eq(active))
                .get_result::<UserRow>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?
                .ok_or(DirectoryError::NotFound(id))?;
            row_to_account(row)
        })
        .await
    }

    async fn verify_password(&self, id: UserId, candidate: &str) -> DirectoryResult<bool> {
        let candidate_owned = candidate.to_owned();
        self.run_blocking(move |connection| {
            let stored_hash = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(users::password_hash)
                .first::<String>(connection)
                .optional()
                .map_err(DirectoryError::persistence)?
                .ok_or(DirectoryError::NotFound(id))?;
            credentials::verify_password(&candidate_owned, &stored_hash)
                .map_err(DirectoryError::persistence)
        })
        .await
    }

    async fn delete(&self, id: UserId) -> DirectoryResult<()> {
        self.run_blocking(move |connection| {
            connection
                .transaction(|inner| {
                    diesel::delete(
                        registration_profiles::table
                            .filter(registration_profiles::user_id.eq(id.into_inner())),
                    )
                    .execute(inner)?;
                    diesel::delete(users::table.filter(users::id.eq(id.into_inner())))
                        .execute(inner)?;
                    Ok::<_, DieselError>(())
                })
                .map_err(DirectoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn row_to_account(row: UserRow) -> DirectoryResult<Account> {
    let UserRow {
        id,
        username,
        email,
        is_active,
        joined_at,
        ..
    } = row;

    let parsed_username =
        Username::new(&username).map_err(DirectoryError::invalid_persisted_data)?;
    let parsed_email = EmailAddress::new(&email).map_err(DirectoryError::invalid_persisted_data)?;

    Ok(Account::new(
        UserId::from_uuid(id),
        parsed_username,
        parsed_email,
        is_active,
        joined_at,
    ))
}
