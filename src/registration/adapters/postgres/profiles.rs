//! `PostgreSQL` registration profile repository implementation.

use super::{
    directory::RegistrationPgPool,
    models::{NewProfileRow, ProfileRow},
    schema::registration_profiles,
};
use crate::registration::{
    domain::{
        ActivationKey, ActivationToken, PersistedProfileData, ProfileId, RegistrationProfile,
        UserId,
    },
    ports::{ProfileRepository, ProfileRepositoryError, ProfileRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed registration profile repository.
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: RegistrationPgPool,
}

impl PostgresProfileRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RegistrationPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProfileRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProfileRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProfileRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProfileRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn store(&self, profile: &RegistrationProfile) -> ProfileRepositoryResult<()> {
        let owner = profile.user_id();
        let new_row = NewProfileRow {
            id: profile.id().into_inner(),
            user_id: owner.into_inner(),
            activation_key: profile.activation_key().as_str().to_owned(),
            activated: profile.is_activated(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(registration_profiles::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProfileRepositoryError::DuplicateProfile(owner)
                    }
                    _ => ProfileRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, profile: &RegistrationProfile) -> ProfileRepositoryResult<()> {
        let profile_id = profile.id();
        let key_val = profile.activation_key().as_str().to_owned();
        let activated_val = profile.is_activated();

        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                registration_profiles::table
                    .filter(registration_profiles::id.eq(profile_id.into_inner())),
            )
            .set((
                registration_profiles::activation_key.eq(&key_val),
                registration_profiles::activated.eq(activated_val),
            ))
            .execute(connection)
            .map_err(ProfileRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(ProfileRepositoryError::NotFound(profile_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: ProfileId,
    ) -> ProfileRepositoryResult<Option<RegistrationProfile>> {
        self.run_blocking(move |connection| {
            let row = registration_profiles::table
                .filter(registration_profiles::id.eq(id.into_inner()))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> ProfileRepositoryResult<Option<RegistrationProfile>> {
        self.run_blocking(move |connection| {
            let row = registration_profiles::table
                .filter(registration_profiles::user_id.eq(user_id.into_inner()))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn find_by_token(
        &self,
        token: &ActivationToken,
    ) -> ProfileRepositoryResult<Option<RegistrationProfile>> {
        let token_str = token.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = registration_profiles::table
                .filter(registration_profiles::activation_key.eq(&token_str))
                .select(ProfileRow::as_select())
                .first::<ProfileRow>(connection)
                .optional()
                .map_err(ProfileRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn list_all(&self) -> ProfileRepositoryResult<Vec<RegistrationProfile>> {
        self.run_blocking(move |connection| {
            let rows = registration_profiles::table
                .select(ProfileRow::as_select())
                .load::<ProfileRow>(connection)
                .map_err(ProfileRepositoryError::persistence)?;
            rows.into_iter().map(row_to_profile).collect()
        })
        .await
    }

    async fn delete(&self, id: ProfileId) -> ProfileRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(
                registration_profiles::table
                    .filter(registration_profiles::id.eq(id.into_inner())),
            )
            .execute(connection)
            .map_err(ProfileRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn row_to_profile(row: ProfileRow) -> ProfileRepositoryResult<RegistrationProfile> {
    let ProfileRow {
        id,
        user_id,
        activation_key,
        activated,
    } = row;

    let parsed_key = ActivationKey::try_from(activation_key.as_str())
        .map_err(ProfileRepositoryError::invalid_persisted_data)?;

    let data = PersistedProfileData {
        id: ProfileId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        activation_key: parsed_key,
        activated,
    };
    Ok(RegistrationProfile::from_persisted(data))
}
