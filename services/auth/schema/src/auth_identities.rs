use sea_orm::entity::prelude::*;

/// One way a user may authenticate: provider + identifier + optional
/// credential. `identifier_normalized` is the lookup key; `identifier`
/// keeps what the user originally entered. `password_hash` is null for
/// passwordless or federated identities.
///
/// `(provider, identifier_normalized)` is unique across active identities;
/// `is_primary` marks the preferred row should duplicates ever appear.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auth_identities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub identifier: String,
    pub identifier_normalized: String,
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub is_primary: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
