//! Generic document commands.
//!
//! `cattlecare get cows`, `cattlecare create health_reports --json ...`, etc.
//! Maps collection names to entity types and runs the typed store operations,
//! so `create` goes through the same validation as any other save.

use anyhow::Result;
use cattlecare_core::ListParams;
use cattlecare_store::Document;
use herd::model::{Breeding, Cow, Farm, Feed, HealthReport, MilkingEvent, User, VideoAnalysis};
use herd::Herd;
use serde_json::Value;

/// Run `$body` with `$ty` bound to the entity type named by `$collection`.
/// Accepts singular and plural names.
macro_rules! with_document {
    ($collection:expr, |$ty:ident| $body:expr) => {
        match $collection.to_lowercase().replace('-', "_").as_str() {
            "user" | "users" => {
                type $ty = User;
                $body
            }
            "farm" | "farms" => {
                type $ty = Farm;
                $body
            }
            "cow" | "cows" => {
                type $ty = Cow;
                $body
            }
            "health_report" | "health_reports" => {
                type $ty = HealthReport;
                $body
            }
            "milking_event" | "milking_events" => {
                type $ty = MilkingEvent;
                $body
            }
            "feed" | "feeds" => {
                type $ty = Feed;
                $body
            }
            "breeding" => {
                type $ty = Breeding;
                $body
            }
            "video_analysis" | "video_analyses" => {
                type $ty = VideoAnalysis;
                $body
            }
            _ => Err(anyhow::anyhow!("Unknown collection: {}", $collection)),
        }
    };
}

fn get_one<D: Document>(herd: &Herd, id: &str) -> Result<Value> {
    let doc = herd.database().collection::<D>().get_or_err(id)?;
    Ok(serde_json::to_value(doc)?)
}

fn list<D: Document>(herd: &Herd, params: &ListParams) -> Result<Value> {
    let page = herd.database().collection::<D>().list_paginated(params)?;
    Ok(serde_json::to_value(page)?)
}

fn create_one<D: Document>(herd: &Herd, body: &str) -> Result<Value> {
    let doc: D = serde_json::from_str(body)
        .map_err(|e| anyhow::anyhow!("invalid {} document: {}", D::COLLECTION, e))?;
    let saved = herd.database().collection::<D>().save(doc)?;
    Ok(serde_json::to_value(saved)?)
}

fn delete_one<D: Document>(herd: &Herd, id: &str) -> Result<()> {
    herd.database().collection::<D>().delete(id)?;
    Ok(())
}

/// Get one document by id, or a page of the collection.
pub fn get(
    herd: &Herd,
    collection: &str,
    id: Option<&str>,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Result<Value> {
    match id {
        Some(id) => with_document!(collection, |D| get_one::<D>(herd, id)),
        None => {
            let mut params = ListParams::default();
            if let Some(limit) = limit {
                params.limit = limit;
            }
            if let Some(offset) = offset {
                params.offset = offset;
            }
            with_document!(collection, |D| list::<D>(herd, &params))
        }
    }
}

/// Deserialize `body` into the collection's entity and save it.
pub fn create(herd: &Herd, collection: &str, body: &str) -> Result<Value> {
    with_document!(collection, |D| create_one::<D>(herd, body))
}

pub fn delete(herd: &Herd, collection: &str, id: &str) -> Result<()> {
    with_document!(collection, |D| delete_one::<D>(herd, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_herd() -> Herd {
        Herd::connect("memory://").unwrap()
    }

    #[test]
    fn create_get_delete() {
        let herd = memory_herd();
        let user = create(
            &herd,
            "users",
            r#"{"full_name":"John Doe","password":"password123","role":"farmer"}"#,
        )
        .unwrap();
        let id = user["id"].as_str().unwrap().to_string();
        assert!(user["last_login"].is_string());

        let fetched = get(&herd, "user", Some(&id), None, None).unwrap();
        assert_eq!(fetched["full_name"], "John Doe");

        delete(&herd, "users", &id).unwrap();
        assert!(get(&herd, "users", Some(&id), None, None).is_err());
    }

    #[test]
    fn create_runs_validation() {
        let herd = memory_herd();
        let err = create(&herd, "cows", r#"{"breed":"Holstein","maturity":["calf"]}"#).unwrap_err();
        assert!(err.to_string().contains("'name' is required"));

        let cow = create(&herd, "cows", r#"{"name":"Bessie","maturity":["calf"]}"#).unwrap();
        assert_eq!(cow["health_status"], "healthy");
        assert_eq!(cow["milk_production"], 0.0);
    }

    #[test]
    fn create_rejects_unknown_enum_value() {
        let herd = memory_herd();
        let err = create(
            &herd,
            "milking-events",
            r#"{"cow":"c1","farm_id":"f1","milk_quantity":2.0,"milker":"Ann","milking_method":"robot"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'robot' is not a valid milking_method"));
    }

    #[test]
    fn list_pages() {
        let herd = memory_herd();
        for name in ["Bessie", "Daisy", "Clover"] {
            let body = format!(r#"{{"name":"{}","maturity":["mature"]}}"#, name);
            create(&herd, "cows", &body).unwrap();
        }
        let page = get(&herd, "cows", None, Some(2), None).unwrap();
        assert_eq!(page["items"].as_array().unwrap().len(), 2);
        assert_eq!(page["total"], 3);
        assert_eq!(page["has_more"], true);
    }

    #[test]
    fn unknown_collection() {
        let herd = memory_herd();
        let err = get(&herd, "sheep", None, None, None).unwrap_err();
        assert!(err.to_string().contains("Unknown collection"));
    }
}
