//! PokeAPI client: name catalog and per-entity detail

use std::sync::OnceLock;

use futures_util::future::try_join_all;
use serde::Deserialize;

use crate::state::{BaseStat, EntityDetail, EntitySummary, Sprites};

/// Shown when a failure carries no description of its own.
pub const FALLBACK_ERROR: &str = "An error occurred";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),
    #[error("{what} (HTTP {status})")]
    Status { what: String, status: u16 },
    #[error("{0}")]
    Decode(String),
}

/// User-visible message for a failed fetch.
pub fn error_message(error: &ApiError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct CatalogResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct NameOnly {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    #[serde(default)]
    sprites: SpritesResponse,
    #[serde(default)]
    types: Vec<PokemonTypeSlot>,
    height: u32,
    weight: u32,
    #[serde(default)]
    abilities: Vec<PokemonAbilitySlot>,
    #[serde(default)]
    stats: Vec<PokemonStatSlot>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct SpritesResponse {
    front_default: Option<String>,
    back_default: Option<String>,
    front_shiny: Option<String>,
    back_shiny: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NameOnly,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NameOnly,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NameOnly,
}

pub fn decode_catalog(bytes: &[u8]) -> Result<Vec<EntitySummary>, ApiError> {
    let response: CatalogResponse =
        serde_json::from_slice(bytes).map_err(|err| ApiError::Decode(err.to_string()))?;
    Ok(response
        .results
        .into_iter()
        .map(|entry| EntitySummary {
            name: entry.name,
            url: entry.url,
        })
        .collect())
}

pub fn decode_detail(bytes: &[u8]) -> Result<EntityDetail, ApiError> {
    let response: PokemonResponse =
        serde_json::from_slice(bytes).map_err(|err| ApiError::Decode(err.to_string()))?;
    Ok(EntityDetail {
        name: response.name,
        sprites: Sprites {
            front_default: response.sprites.front_default,
            back_default: response.sprites.back_default,
            front_shiny: response.sprites.front_shiny,
            back_shiny: response.sprites.back_shiny,
        },
        types: response
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        height: response.height,
        weight: response.weight,
        abilities: response
            .abilities
            .into_iter()
            .map(|slot| slot.ability.name)
            .collect(),
        stats: response
            .stats
            .into_iter()
            .map(|slot| BaseStat {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect(),
    })
}

/// Fetch the whole name catalog. The API has no server-side search, so the
/// query never reaches the wire.
pub async fn fetch_catalog(url: &str) -> Result<Vec<EntitySummary>, ApiError> {
    let bytes = fetch_bytes(url, "Failed to fetch Pokemon list").await?;
    decode_catalog(&bytes)
}

pub async fn fetch_detail(entry: &EntitySummary) -> Result<EntityDetail, ApiError> {
    let what = format!("Failed to fetch details for {}", entry.name);
    let bytes = fetch_bytes(&entry.url, &what).await?;
    decode_detail(&bytes)
}

/// Fetch every entry of a page concurrently.
///
/// Output order matches `entries`. The first failure aborts the page and
/// nothing from it is returned.
pub async fn fetch_page(entries: &[EntitySummary]) -> Result<Vec<EntityDetail>, ApiError> {
    try_join_all(entries.iter().map(fetch_detail)).await
}

async fn fetch_bytes(url: &str, what: &str) -> Result<Vec<u8>, ApiError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            what: what.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|err| ApiError::Transport(err.to_string()))?;
    Ok(bytes.to_vec())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PIKACHU: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "height": 4,
        "weight": 60,
        "sprites": {
            "front_default": "https://img.test/25.png",
            "back_default": null,
            "front_shiny": "https://img.test/shiny/25.png",
            "back_shiny": null,
            "other": {}
        },
        "types": [{"slot": 1, "type": {"name": "electric", "url": "https://x/type/13/"}}],
        "abilities": [
            {"ability": {"name": "static", "url": "u"}, "is_hidden": false, "slot": 1},
            {"ability": {"name": "lightning-rod", "url": "u"}, "is_hidden": true, "slot": 3}
        ],
        "stats": [
            {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}},
            {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": "u"}}
        ]
    }"#;

    #[test]
    fn test_decode_catalog_keeps_order() {
        let body = br#"{"count": 3, "next": null, "results": [
            {"name": "bulbasaur", "url": "https://x/pokemon/1/"},
            {"name": "ivysaur", "url": "https://x/pokemon/2/"},
            {"name": "venusaur", "url": "https://x/pokemon/3/"}
        ]}"#;
        let catalog = decode_catalog(body).unwrap();
        let names: Vec<_> = catalog.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);
        assert_eq!(catalog[1].url, "https://x/pokemon/2/");
    }

    #[test]
    fn test_decode_detail_flattens_wire_shape() {
        let detail = decode_detail(PIKACHU.as_bytes()).unwrap();
        assert_eq!(detail.name, "pikachu");
        assert_eq!(detail.types, vec!["electric".to_string()]);
        assert_eq!(
            detail.abilities,
            vec!["static".to_string(), "lightning-rod".to_string()]
        );
        assert_eq!(
            detail.stats,
            vec![
                BaseStat {
                    name: "hp".into(),
                    value: 35
                },
                BaseStat {
                    name: "speed".into(),
                    value: 90
                },
            ]
        );
        assert_eq!(detail.height, 4);
        assert_eq!(detail.weight, 60);
        assert_eq!(
            detail.sprites.front_default.as_deref(),
            Some("https://img.test/25.png")
        );
        assert!(detail.sprites.back_default.is_none());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_catalog(b"<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            what: "Failed to fetch Pokemon list".into(),
            status: 503,
        };
        assert_eq!(error_message(&err), "Failed to fetch Pokemon list (HTTP 503)");
    }

    #[test]
    fn test_empty_description_falls_back() {
        let err = ApiError::Transport(String::new());
        assert_eq!(error_message(&err), FALLBACK_ERROR);
    }
}
