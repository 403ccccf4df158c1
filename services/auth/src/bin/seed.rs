//! Provision the superadmin role and account.
//!
//! Users and their identities are created here (or by future admin
//! tooling), never by the login path, which only reads the graph.

use anyhow::Context as _;
use clap::Parser;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Database, DatabaseConnection, EntityTrait,
    QueryFilter,
};
use tracing::info;
use uuid::Uuid;

use hamilton_auth::domain::password::hash_password;
use hamilton_auth_schema::{
    auth_identities, permissions, role_permissions, roles, user_roles, users,
};
use hamilton_domain::identifier::normalize_identifier;
use hamilton_domain::provider::Provider;

/// Permission codes attached to the superadmin role.
const SUPERADMIN_PERMISSIONS: [(&str, &str); 3] = [
    ("user:assign-role", "Assign roles to users"),
    ("user:read", "Read users"),
    ("user:write", "Modify users"),
];

#[derive(Parser)]
#[command(name = "seed", about = "Provision the superadmin role and account")]
struct Args {
    /// Email address for the superadmin login identity.
    #[arg(long)]
    email: String,
    /// Plaintext password; stored as an Argon2id hash.
    #[arg(long)]
    password: String,
    /// Display name for the account.
    #[arg(long, default_value = "Superadmin")]
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL")?;
    let db = Database::connect(&database_url)
        .await
        .context("connect to database")?;

    let normalized = normalize_identifier(Provider::Email, &args.email);
    let existing = auth_identities::Entity::find()
        .filter(auth_identities::Column::Provider.eq(Provider::Email.as_str()))
        .filter(auth_identities::Column::IdentifierNormalized.eq(normalized.as_str()))
        .filter(auth_identities::Column::IsActive.eq(true))
        .one(&db)
        .await
        .context("check for existing identity")?;
    if existing.is_some() {
        info!(email = %args.email, "superadmin identity already present, nothing to do");
        return Ok(());
    }

    let role_id = ensure_superadmin_role(&db).await?;

    let user_id = Uuid::new_v4();
    users::ActiveModel {
        id: Set(user_id),
        full_name: Set(Some(args.name.clone())),
        email: Set(Some(args.email.clone())),
        is_active: Set(true),
    }
    .insert(&db)
    .await
    .context("create superadmin user")?;

    user_roles::ActiveModel {
        user_id: Set(user_id),
        role_id: Set(role_id),
    }
    .insert(&db)
    .await
    .context("grant superadmin role")?;

    let password_hash = hash_password(&args.password)?;
    auth_identities::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        provider: Set(Provider::Email.as_str().to_owned()),
        identifier: Set(args.email.clone()),
        identifier_normalized: Set(normalized),
        password_hash: Set(Some(password_hash)),
        is_active: Set(true),
        is_primary: Set(true),
    }
    .insert(&db)
    .await
    .context("create superadmin identity")?;

    info!(email = %args.email, "superadmin account provisioned");
    Ok(())
}

/// Find or create the superadmin role with its permission set.
async fn ensure_superadmin_role(db: &DatabaseConnection) -> anyhow::Result<Uuid> {
    if let Some(role) = roles::Entity::find()
        .filter(roles::Column::Name.eq("superadmin"))
        .one(db)
        .await
        .context("find superadmin role")?
    {
        return Ok(role.id);
    }

    let role_id = Uuid::new_v4();
    roles::ActiveModel {
        id: Set(role_id),
        name: Set("superadmin".to_owned()),
        description: Set(Some("Super-administrator with full access".to_owned())),
    }
    .insert(db)
    .await
    .context("create superadmin role")?;

    for (code, description) in SUPERADMIN_PERMISSIONS {
        let permission_id = match permissions::Entity::find()
            .filter(permissions::Column::Code.eq(code))
            .one(db)
            .await
            .context("find permission")?
        {
            Some(permission) => permission.id,
            None => {
                let id = Uuid::new_v4();
                permissions::ActiveModel {
                    id: Set(id),
                    code: Set(code.to_owned()),
                    description: Set(Some(description.to_owned())),
                }
                .insert(db)
                .await
                .context("create permission")?;
                id
            }
        };

        role_permissions::ActiveModel {
            role_id: Set(role_id),
            permission_id: Set(permission_id),
        }
        .insert(db)
        .await
        .context("attach permission to role")?;
    }

    Ok(role_id)
}
