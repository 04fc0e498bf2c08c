//! SeaORM adapter for users and their credentials.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, Set,
};

use crate::entities::{user_credentials, users};

pub mod dto;

pub use dto::{CredentialsCreate, UserCreate};

pub async fn find_credentials_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<user_credentials::Model>, sea_orm::DbErr> {
    user_credentials::Entity::find()
        .filter(user_credentials::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn create_user(
    txn: &DatabaseTransaction,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        sub: Set(dto.sub),
        username: Set(dto.username),
        is_admin: Set(dto.is_admin),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(txn).await
}

pub async fn create_credentials(
    txn: &DatabaseTransaction,
    dto: CredentialsCreate,
) -> Result<user_credentials::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let credential_active = user_credentials::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        password_hash: Set(dto.password_hash),
        email: Set(dto.email),
        google_sub: Set(dto.google_sub),
        last_login: Set(Some(now)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    credential_active.insert(txn).await
}

/// Record a successful login; optionally link a google_sub that was
/// previously NULL.
pub async fn touch_login(
    txn: &DatabaseTransaction,
    credentials_id: i64,
    link_google_sub: Option<String>,
) -> Result<user_credentials::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let mut active = user_credentials::ActiveModel {
        id: Set(credentials_id),
        last_login: Set(Some(now)),
        updated_at: Set(now),
        ..Default::default()
    };
    if let Some(sub) = link_google_sub {
        active.google_sub = Set(Some(sub));
    }
    active.update(txn).await
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_user_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Sub.eq(sub))
        .one(conn)
        .await
}
