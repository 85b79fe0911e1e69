use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use models::interview::{self, Entity as InterviewEntity};

use crate::errors::ServiceError;

/// Wire-facing view of a stored record: payload decoded back to a structured
/// value, timestamps rendered as RFC 3339 strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: String,
    pub payload: Value,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create or replace the record for `id` in a single atomic statement.
/// `created_at` is only written on first insertion; the conflict arm touches
/// payload and `updated_at` alone, so concurrent upserts on the same id
/// resolve to last-committed-wins inside Postgres.
pub async fn upsert_interview(
    db: &DatabaseConnection,
    id: &str,
    payload: &Value,
) -> Result<(), ServiceError> {
    interview::validate_id(id)?;
    let body = serde_json::to_string(payload)
        .map_err(|e| ServiceError::Validation(format!("payload not serializable: {}", e)))?;
    let am = interview::upsert_model(id, body);
    InterviewEntity::insert(am)
        .on_conflict(
            OnConflict::column(interview::Column::Id)
                .update_columns([interview::Column::Payload, interview::Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(())
}

/// Snapshot of all records, most recently updated first; ties break by id.
pub async fn list_interviews(db: &DatabaseConnection) -> Result<Vec<InterviewRecord>, ServiceError> {
    let rows = InterviewEntity::find()
        .order_by_desc(interview::Column::UpdatedAt)
        .order_by_asc(interview::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    rows.into_iter().map(record_from_row).collect()
}

/// Delete the record with the given id; unknown ids are a NotFound outcome.
pub async fn delete_interview(db: &DatabaseConnection, id: &str) -> Result<(), ServiceError> {
    let res = InterviewEntity::delete_by_id(id.to_string())
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("interview"));
    }
    Ok(())
}

fn record_from_row(row: interview::Model) -> Result<InterviewRecord, ServiceError> {
    let payload = serde_json::from_str(&row.payload)
        .map_err(|e| ServiceError::Db(format!("stored payload for {} is not valid JSON: {}", row.id, e)))?;
    Ok(InterviewRecord {
        id: row.id,
        payload,
        created_at: Some(row.created_at.to_rfc3339()),
        updated_at: Some(row.updated_at.to_rfc3339()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use sea_orm::EntityTrait;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn upsert_twice_keeps_one_row() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };

        let id = format!("itw_{}", Uuid::new_v4());
        upsert_interview(&db, &id, &json!({"x": 1})).await?;
        let first = InterviewEntity::find_by_id(id.clone()).one(&db).await?.expect("row after first upsert");

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        upsert_interview(&db, &id, &json!({"x": 2})).await?;
        let second = InterviewEntity::find_by_id(id.clone()).one(&db).await?.expect("row after second upsert");

        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.payload, r#"{"x":2}"#);

        InterviewEntity::delete_by_id(id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn payload_round_trips_structurally() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };

        let id = format!("itw_{}", Uuid::new_v4());
        let payload = json!({
            "candidate": {"name": "Ada", "scores": [9, 7, 10]},
            "notes": null,
            "passed": true
        });
        upsert_interview(&db, &id, &payload).await?;

        let listed = list_interviews(&db).await?;
        let mine = listed.iter().find(|r| r.id == id).expect("stored record listed");
        assert_eq!(mine.payload, payload);
        assert!(mine.created_at.is_some());
        assert!(mine.updated_at.is_some());

        InterviewEntity::delete_by_id(id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };

        let id = format!("itw_missing_{}", Uuid::new_v4());
        let err = delete_interview(&db, &id).await.expect_err("unknown id must not delete");
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn deleted_records_leave_the_listing() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };

        let id = format!("itw_{}", Uuid::new_v4());
        upsert_interview(&db, &id, &json!({"gone": true})).await?;
        delete_interview(&db, &id).await?;

        let listed = list_interviews(&db).await?;
        assert!(listed.iter().all(|r| r.id != id));
        Ok(())
    }

    #[tokio::test]
    async fn listing_orders_by_recency() -> anyhow::Result<()> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => { eprintln!("skip: cannot connect to db: {}", e); return Ok(()); }
        };

        let id_a = format!("itw_a_{}", Uuid::new_v4());
        let id_b = format!("itw_b_{}", Uuid::new_v4());
        upsert_interview(&db, &id_a, &json!({"n": 1})).await?;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        upsert_interview(&db, &id_b, &json!({"n": 2})).await?;

        let pos = |records: &[InterviewRecord], id: &str| {
            records.iter().position(|r| r.id == id).expect("record listed")
        };

        let listed = list_interviews(&db).await?;
        assert!(pos(&listed, &id_b) < pos(&listed, &id_a), "most recent upsert first");

        // Touching the older record moves it back to the front.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        upsert_interview(&db, &id_a, &json!({"n": 3})).await?;
        let listed = list_interviews(&db).await?;
        assert!(pos(&listed, &id_a) < pos(&listed, &id_b));

        InterviewEntity::delete_by_id(id_a).exec(&db).await?;
        InterviewEntity::delete_by_id(id_b).exec(&db).await?;
        Ok(())
    }
}
