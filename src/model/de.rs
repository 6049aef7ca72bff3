// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lenient field deserializers for fleet API payloads.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::types::MowerLocalTime;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

/// Accepts `50` as well as `"50"`.
pub(crate) fn u8_or_string<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    };
    raw.trim()
        .parse()
        .map_err(|_| D::Error::custom(format!("expected a percentage, got {raw:?}")))
}

/// Accepts a string or a number and keeps its text form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    })
}

/// Epoch value anchored in the mower's local time; `0` or null is unset.
pub(crate) fn local_timestamp<'de, D>(deserializer: D) -> Result<Option<MowerLocalTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value.and_then(MowerLocalTime::from_api_timestamp))
}

/// UTC epoch milliseconds; `0` or null is unset.
pub(crate) fn utc_millis<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?;
    Ok(value
        .filter(|ms| *ms != 0)
        .and_then(DateTime::from_timestamp_millis))
}

/// The default work area comes without a name.
pub(crate) fn work_area_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(if name.is_empty() {
        "my_lawn".to_string()
    } else {
        name
    })
}
