use sea_orm::entity::prelude::*;

/// Account record created by the registration flow.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub display_name: String,
    /// `driver` or `authority`.
    pub role: String,
    /// Code redeemed at sign-up; authority accounts only.
    pub authority_code: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::authority_codes::Entity")]
    AuthorityCodes,
}

impl Related<super::authority_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthorityCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
