//! Transaction helper behavior: default commit and shared-txn injection.

mod common;

use actix_web::test::TestRequest;
use actix_web::HttpMessage;
use backend::adapters::users_sea::UserCreate;
use backend::db::txn::{with_txn, SharedTxn};
use backend::repos::users;
use backend_test_support::unique_helpers::unique_str;
use sea_orm::TransactionTrait;
use std::sync::Arc;

#[actix_web::test]
async fn with_txn_commits_on_ok_by_default() {
    let state = common::test_state().await;
    let sub = unique_str("sub");

    let created = with_txn(None, &state, |txn| {
        let sub = sub.clone();
        Box::pin(async move { Ok(users::create_user(txn, UserCreate::new(sub)).await?) })
    })
    .await
    .expect("create user in txn");

    // Visible outside the transaction after commit.
    let db = state.db().unwrap();
    let found = users::find_user_by_id(db, created.id)
        .await
        .expect("query user");
    assert!(found.is_some());
}

#[actix_web::test]
async fn with_txn_rolls_back_on_err() {
    let state = common::test_state().await;
    let sub = unique_str("sub");

    let result: Result<(), backend::AppError> = with_txn(None, &state, |txn| {
        let sub = sub.clone();
        Box::pin(async move {
            users::create_user(txn, UserCreate::new(sub)).await?;
            Err(backend::AppError::internal("forced failure"))
        })
    })
    .await;
    assert!(result.is_err());

    let db = state.db().unwrap();
    let found = users::find_user_by_sub(db, &sub).await.expect("query user");
    assert!(found.is_none(), "rolled-back row must not be visible");
}

#[actix_web::test]
async fn shared_txn_in_request_extensions_is_used_verbatim() {
    let state = common::test_state().await;
    let sub = unique_str("sub");

    let db = state.db().unwrap().clone();
    let txn = db.begin().await.expect("begin txn");
    let shared = SharedTxn(Arc::new(txn));

    let req = TestRequest::default().to_http_request();
    req.extensions_mut().insert(shared.clone());

    with_txn(Some(&req), &state, |txn| {
        let sub = sub.clone();
        Box::pin(async move { Ok(users::create_user(txn, UserCreate::new(sub)).await?) })
    })
    .await
    .expect("create user in shared txn");

    // with_txn must not commit a shared transaction; dropping it rolls
    // everything back.
    drop(req);
    let txn = Arc::into_inner(shared.0).expect("sole owner of shared txn");
    txn.rollback().await.expect("rollback");

    let found = users::find_user_by_sub(&db, &sub).await.expect("query user");
    assert!(found.is_none());
}
