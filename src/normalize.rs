//! Raw JSON → typed results.
//!
//! Every key is read on its own. A key that is missing or has the wrong shape
//! leaves the output field as `None`; normalization never fails. Nested objects
//! (`counters`, `queues`) are rebuilt key by key so undocumented extra fields
//! never leak into the results.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::models::{
    JobCounters, JobStatus, Outlinks, QueueDepths, SubmissionAck, SystemStatus, UserStatus,
};

fn text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn count(raw: &Value, key: &str) -> Option<u64> {
    raw.get(key).and_then(Value::as_u64)
}

fn strings(raw: &Value, key: &str) -> Option<Vec<String>> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|items| string_items(items))
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect()
}

fn string_map(object: &Map<String, Value>) -> BTreeMap<String, String> {
    object
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_owned())))
        .collect()
}

fn outlinks(raw: &Value) -> Option<Outlinks> {
    match raw.get("outlinks")? {
        Value::Object(object) => Some(Outlinks::Archived(string_map(object))),
        Value::Array(items) => Some(Outlinks::Plain(string_items(items))),
        _ => None,
    }
}

pub fn submission_ack(raw: &Value) -> SubmissionAck {
    SubmissionAck {
        url: text(raw, "url"),
        job_id: text(raw, "job_id"),
        message: text(raw, "message"),
        status: text(raw, "status"),
        status_ext: text(raw, "status_ext"),
    }
}

pub fn job_status(raw: &Value) -> JobStatus {
    let counters = raw.get("counters").unwrap_or(&Value::Null);

    JobStatus {
        job_id: text(raw, "job_id"),
        status: text(raw, "status"),
        http_status: count(raw, "http_status").and_then(|code| u16::try_from(code).ok()),
        original_url: text(raw, "original_url"),
        duration_sec: raw.get("duration_sec").and_then(Value::as_f64),
        counters: JobCounters {
            embeds: count(counters, "embeds"),
            outlinks: count(counters, "outlinks"),
        },
        outlinks: outlinks(raw),
        resources: strings(raw, "resources"),
        screenshot: text(raw, "screenshot"),
        timestamp: text(raw, "timestamp"),
    }
}

pub fn system_status(raw: &Value) -> SystemStatus {
    let queues = raw.get("queues").unwrap_or(&Value::Null);

    SystemStatus {
        status: text(raw, "status"),
        recent_captures: count(raw, "recent_captures"),
        queues: QueueDepths {
            api: count(queues, "api"),
            api_misc: count(queues, "api_misc"),
            api_outlink: count(queues, "api_outlink"),
            api_outlink_misc: count(queues, "api_outlink_misc"),
            high_fidelity: count(queues, "high_fidelity"),
            main: count(queues, "main"),
            main_misc: count(queues, "main_misc"),
            main_outlink: count(queues, "main_outlink"),
            main_outlink_misc: count(queues, "main_outlink_misc"),
        },
    }
}

pub fn user_status(raw: &Value) -> UserStatus {
    UserStatus {
        available: count(raw, "available"),
        processing: count(raw, "processing"),
        daily_captures: count(raw, "daily_captures"),
        daily_captures_limit: count(raw, "daily_captures_limit"),
    }
}
