use chrono::Local;
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait};
use serde_json::Value as Json;
use uuid::Uuid;

use crate::entity::{notification, prelude::*};

/// An in-app notification addressed to one user
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub user_id: Uuid,
    pub kind: &'static str,
    pub title: String,
    pub message: String,
    pub metadata: Json,
}

/// Stores the notice, logging instead of failing when the store rejects it
pub async fn notify<C: ConnectionTrait>(db: &C, notice: Notice) {
    let user_id = notice.user_id;
    let kind = notice.kind;

    let model = notification::ActiveModel {
        created_at: Set(Local::now().fixed_offset()),
        user_id: Set(notice.user_id),
        kind: Set(notice.kind.to_owned()),
        title: Set(notice.title),
        message: Set(notice.message),
        metadata: Set(notice.metadata),
        is_read: Set(false),
        ..Default::default()
    };

    match Notification::insert(model).exec_without_returning(db).await {
        Ok(_) => tracing::debug!(%user_id, kind, "notification stored"),
        Err(err) => tracing::warn!(%user_id, kind, error = %err, "unable to store notification"),
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use super::*;

    fn notice() -> Notice {
        Notice {
            user_id: Uuid::new_v4(),
            kind: "PAYROLL_CREDITED",
            title: "Payroll Generated".to_owned(),
            message: "Your payroll for 3/2025 has been generated".to_owned(),
            metadata: serde_json::json!({ "payrollId": Uuid::nil() }),
        }
    }

    #[actix_web::test]
    async fn test_notify() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .into_connection();

        notify(&db, notice()).await;

        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[actix_web::test]
    async fn test_notify_swallows_store_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("connection refused".to_owned())])
            .into_connection();

        // Completes without panicking or returning an error
        notify(&db, notice()).await;
    }
}
