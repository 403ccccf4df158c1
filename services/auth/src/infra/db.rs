use anyhow::Context as _;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use hamilton_auth_schema::{auth_identities, permissions, roles, users};
use hamilton_domain::provider::Provider;

use crate::domain::repository::IdentityRepository;
use crate::domain::types::{AuthIdentity, AuthUser, RoleGrant};
use crate::error::AuthServiceError;

#[derive(Clone)]
pub struct DbIdentityRepository {
    pub db: DatabaseConnection,
}

impl IdentityRepository for DbIdentityRepository {
    async fn find_active_identity(
        &self,
        provider: Provider,
        normalized: &str,
    ) -> Result<Option<AuthIdentity>, AuthServiceError> {
        // The active-uniqueness index should make this a single row; the
        // ordering keeps the pick deterministic even if it is violated.
        let model = auth_identities::Entity::find()
            .filter(auth_identities::Column::Provider.eq(provider.as_str()))
            .filter(auth_identities::Column::IdentifierNormalized.eq(normalized))
            .filter(auth_identities::Column::IsActive.eq(true))
            .order_by_desc(auth_identities::Column::IsPrimary)
            .order_by_asc(auth_identities::Column::Id)
            .one(&self.db)
            .await
            .context("find active identity")?;
        Ok(model.map(|m| identity_from_model(m, provider)))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn role_grants(&self, user_id: Uuid) -> Result<Vec<RoleGrant>, AuthServiceError> {
        let Some(user) = users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("load user for role grants")?
        else {
            return Ok(Vec::new());
        };

        // Junction rows pointing at deleted roles or permissions drop out of
        // the joins; a half-provisioned grant must not fail the whole login.
        let role_models = user
            .find_related(roles::Entity)
            .all(&self.db)
            .await
            .context("load user roles")?;

        let mut grants = Vec::with_capacity(role_models.len());
        for role in role_models {
            let permission_models = role
                .find_related(permissions::Entity)
                .all(&self.db)
                .await
                .context("load role permissions")?;
            grants.push(RoleGrant {
                name: role.name,
                permissions: permission_models.into_iter().map(|p| p.code).collect(),
            });
        }
        Ok(grants)
    }
}

fn identity_from_model(model: auth_identities::Model, provider: Provider) -> AuthIdentity {
    AuthIdentity {
        id: model.id,
        user_id: model.user_id,
        provider,
        identifier: model.identifier,
        identifier_normalized: model.identifier_normalized,
        password_hash: model.password_hash,
        is_active: model.is_active,
        is_primary: model.is_primary,
    }
}

fn user_from_model(model: users::Model) -> AuthUser {
    AuthUser {
        id: model.id,
        full_name: model.full_name,
        email: model.email,
        is_active: model.is_active,
    }
}
