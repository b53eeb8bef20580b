//! Writes that touch the remote API after local state is already updated.
//!
//! Policy: eventual sync, no user-facing failure. The local caches
//! (calendar, notifications) are written first and stay as written whatever
//! the API answers; a failed remote write is logged and otherwise dropped.

use std::future::Future;

use megagen_session::{CALENDAR_EVENTS_KEY, NOTIFICATIONS_KEY, SessionStore, Storage};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{AppError, Result, api::ApiClient};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub title: String,
    pub client: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(default)]
    pub notes: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub client: String,
    pub address: String,
    #[serde(with = "time::serde::rfc3339")]
    pub visited_at: OffsetDateTime,
    #[serde(default)]
    pub notes: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub read: bool,
}

/// Runs a remote write under the eventual-sync policy.
///
/// Returns `None` when the write failed; the failure never propagates.
pub async fn eventual_sync<T>(
    operation: &'static str,
    write: impl Future<Output = Result<T>>,
) -> Option<T> {
    match write.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(operation, error = %e, "remote write failed, keeping local state");
            None
        }
    }
}

fn push_cached<S: Storage, T>(store: &mut SessionStore<S>, key: &str, item: T) -> Result<()>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut items: Vec<T> = store.read_cache(key)?.unwrap_or_default();
    items.push(item);
    store.write_cache(key, &items)?;

    Ok(())
}

fn notify<S: Storage>(store: &mut SessionStore<S>, message: String) -> Result<()> {
    push_cached(
        store,
        NOTIFICATIONS_KEY,
        Notification {
            message,
            created_at: OffsetDateTime::now_utc(),
            read: false,
        },
    )
}

/// Adds the meeting to the local calendar, then posts it to the API.
///
/// Returns whether the API accepted it.
pub async fn schedule_meeting<S: Storage>(
    store: &mut SessionStore<S>,
    api: &ApiClient,
    meeting: Meeting,
) -> Result<bool> {
    let Some(session) = store.current().cloned() else {
        return Err(AppError::Forbidden("sign in to schedule meetings".to_owned()));
    };

    push_cached(store, CALENDAR_EVENTS_KEY, meeting.clone())?;
    notify(
        store,
        format!("Reunión agendada con {} ({})", meeting.client, meeting.title),
    )?;

    Ok(eventual_sync("create meeting", api.create_meeting(&session, &meeting))
        .await
        .is_some())
}

/// Posts a terrain visit and leaves a local notification either way.
pub async fn record_visit<S: Storage>(
    store: &mut SessionStore<S>,
    api: &ApiClient,
    visit: Visit,
) -> Result<bool> {
    let Some(session) = store.current().cloned() else {
        return Err(AppError::Forbidden("sign in to record visits".to_owned()));
    };

    notify(store, format!("Visita registrada en {}", visit.client))?;

    Ok(eventual_sync("record visit", api.record_visit(&session, &visit))
        .await
        .is_some())
}

pub fn calendar<S: Storage>(store: &mut SessionStore<S>) -> Result<Vec<Meeting>> {
    Ok(store.read_cache(CALENDAR_EVENTS_KEY)?.unwrap_or_default())
}

pub fn notifications<S: Storage>(store: &mut SessionStore<S>) -> Result<Vec<Notification>> {
    Ok(store.read_cache(NOTIFICATIONS_KEY)?.unwrap_or_default())
}
