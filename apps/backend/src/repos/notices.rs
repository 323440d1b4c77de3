//! Notice repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::Date;

use crate::adapters::notices_sea::{self as notices_adapter, NoticeCreate, NoticeUpdate};
use crate::auth::TenantId;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub id: i32,
    pub institute_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub is_published: bool,
    #[serde(with = "date_format")]
    pub publish_date: Option<Date>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

/// Editable notice content, used for both create and full update.
#[derive(Debug, Clone)]
pub struct NoticeDraft {
    pub title: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub publish_date: Option<Date>,
}

/// Optional calendar dates, written as `YYYY-MM-DD`.
///
/// Input may also be an RFC 3339 timestamp, in which case the date is taken
/// in the timestamp's own offset.
pub mod date_format {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;
    use time::{Date, OffsetDateTime};

    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => {
                let formatted = date
                    .format(format_description!("[year]-[month]-[day]"))
                    .map_err(S::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Date>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => {
                let raw = raw.trim();
                Date::parse(raw, format_description!("[year]-[month]-[day]"))
                    .or_else(|_| OffsetDateTime::parse(raw, &Rfc3339).map(|dt| dt.date()))
                    .map(Some)
                    .map_err(|_| {
                        D::Error::custom("expected a YYYY-MM-DD date or an RFC 3339 timestamp")
                    })
            }
            _ => Ok(None),
        }
    }
}

fn notice_not_found(notice_id: i32) -> DomainError {
    DomainError::not_found(NotFoundKind::Notice, format!("notice {notice_id} not found"))
}

pub async fn create_notice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    draft: NoticeDraft,
) -> Result<Notice, DomainError> {
    let dto = NoticeCreate {
        institute_id: tenant.get(),
        title: draft.title,
        description: draft.description,
        is_published: draft.is_published,
        publish_date: draft.publish_date,
    };
    let notice = notices_adapter::create_notice(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(Notice::from(notice))
}

pub async fn find_notice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    notice_id: i32,
) -> Result<Notice, DomainError> {
    notices_adapter::find_notice(conn, tenant.get(), notice_id)
        .await
        .map_err(map_db_err)?
        .map(Notice::from)
        .ok_or_else(|| notice_not_found(notice_id))
}

pub async fn list_notices<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
) -> Result<Vec<Notice>, DomainError> {
    let notices = notices_adapter::list_notices(conn, tenant.get())
        .await
        .map_err(map_db_err)?;
    Ok(notices.into_iter().map(Notice::from).collect())
}

pub async fn update_notice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    notice_id: i32,
    draft: NoticeDraft,
) -> Result<Notice, DomainError> {
    let dto = NoticeUpdate {
        title: draft.title,
        description: draft.description,
        is_published: draft.is_published,
        publish_date: draft.publish_date,
    };
    notices_adapter::update_notice(conn, tenant.get(), notice_id, dto)
        .await
        .map_err(map_db_err)?
        .map(Notice::from)
        .ok_or_else(|| notice_not_found(notice_id))
}

pub async fn delete_notice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    tenant: TenantId,
    notice_id: i32,
) -> Result<(), DomainError> {
    let removed = notices_adapter::delete_notice(conn, tenant.get(), notice_id)
        .await
        .map_err(map_db_err)?;
    if removed == 0 {
        return Err(notice_not_found(notice_id));
    }
    Ok(())
}

impl From<crate::entities::notices::Model> for Notice {
    fn from(model: crate::entities::notices::Model) -> Self {
        Self {
            id: model.id,
            institute_id: model.institute_id,
            title: model.title,
            description: model.description,
            is_published: model.is_published,
            publish_date: model.publish_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use time::macros::date;

    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Dated {
        #[serde(default, with = "date_format")]
        publish_date: Option<Date>,
    }

    #[test]
    fn publish_date_uses_calendar_format() {
        let dated = Dated {
            publish_date: Some(date!(2025 - 03 - 09)),
        };
        assert_eq!(
            serde_json::to_string(&dated).unwrap(),
            r#"{"publish_date":"2025-03-09"}"#
        );

        let parsed: Dated = serde_json::from_str(r#"{"publish_date":"2024-12-31"}"#).unwrap();
        assert_eq!(parsed.publish_date, Some(date!(2024 - 12 - 31)));
    }

    #[test]
    fn missing_empty_and_null_dates_are_none() {
        for raw in [r#"{}"#, r#"{"publish_date":null}"#, r#"{"publish_date":""}"#] {
            let parsed: Dated = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed.publish_date, None, "{raw}");
        }
        assert!(serde_json::from_str::<Dated>(r#"{"publish_date":"31/12/2024"}"#).is_err());
    }

    #[test]
    fn timestamps_are_reduced_to_their_date() {
        let cases = [
            ("2025-01-01T00:00:00Z", date!(2025 - 01 - 01)),
            ("2025-06-30T23:59:59.5+05:30", date!(2025 - 06 - 30)),
            ("2024-02-29T08:15:00-08:00", date!(2024 - 02 - 29)),
        ];
        for (raw, expected) in cases {
            let parsed: Dated =
                serde_json::from_str(&format!(r#"{{"publish_date":"{raw}"}}"#)).unwrap();
            assert_eq!(parsed.publish_date, Some(expected), "{raw}");
        }
        assert!(serde_json::from_str::<Dated>(r#"{"publish_date":"2025-01-01T00:00:00"}"#).is_err());
    }
}
