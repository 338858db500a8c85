//! PokeAPI catalogue loader.
//!
//! Fetches the list of the first generation of Pokémon, then every detail
//! record in parallel, and flattens each into a [`CatalogueItem`]. Runs
//! once at startup, before the UI engines are constructed. No retries, no
//! backoff: any failure propagates to the caller untouched.

use crate::domain::CatalogueItem;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// The original 151.
pub const CATALOGUE_LIMIT: usize = 151;

const FETCH_THREADS: usize = 8;

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: u32,
    name: String,
    height: u32,
    weight: u32,
    sprites: Sprites,
    types: Vec<TypeSlot>,
    abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    other: SpriteVariants,
}

#[derive(Debug, Deserialize)]
struct SpriteVariants {
    #[serde(rename = "official-artwork")]
    official_artwork: Artwork,
}

#[derive(Debug, Deserialize)]
struct Artwork {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedRef,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedRef,
}

pub struct PokeApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PokeApiClient {
    /// Creates a client against `base_url` (injectable so tests and
    /// mirrors do not hit the public API).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Fetches the first `limit` Pokémon and flattens them into catalogue
    /// items, sorted by id.
    ///
    /// Detail records are fetched in parallel, a chunk of the list per
    /// scoped thread.
    pub fn fetch_catalogue(&self, limit: usize) -> Result<Vec<CatalogueItem>, String> {
        let url = format!("{}/pokemon?limit={}", self.base_url, limit);
        let list: ListResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?
            .json()
            .map_err(|e| e.to_string())?;

        let chunk_size = list.results.len().div_ceil(FETCH_THREADS).max(1);
        let chunk_results: Vec<Result<Vec<CatalogueItem>, String>> = std::thread::scope(|scope| {
            let handles: Vec<_> = list
                .results
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|entry| self.fetch_detail(&entry.url))
                            .collect::<Result<Vec<_>, String>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err("catalogue fetch worker panicked".to_string()))
                })
                .collect()
        });

        let mut items = Vec::with_capacity(limit);
        for chunk in chunk_results {
            items.extend(chunk?);
        }
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    fn fetch_detail(&self, url: &str) -> Result<CatalogueItem, String> {
        let detail: DetailResponse = self
            .client
            .get(url)
            .send()
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?
            .json()
            .map_err(|e| e.to_string())?;
        Ok(flatten(detail))
    }
}

fn flatten(detail: DetailResponse) -> CatalogueItem {
    // The official-artwork sprite is occasionally null; the static GitHub
    // artwork URL is the documented fallback for those ids.
    let image_url = detail
        .sprites
        .other
        .official_artwork
        .front_default
        .unwrap_or_else(|| {
            format!(
                "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/{}.png",
                detail.id
            )
        });

    CatalogueItem {
        id: detail.id,
        name: detail.name,
        image_url,
        categories: detail.types.into_iter().map(|t| t.kind.name).collect(),
        height_dm: detail.height,
        weight_hg: detail.weight,
        abilities: detail.abilities.into_iter().map(|a| a.ability.name).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_JSON: &str = r#"{
        "id": 1,
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "sprites": {
            "other": {
                "official-artwork": {
                    "front_default": "https://img.example/1.png"
                }
            }
        },
        "types": [
            {"slot": 1, "type": {"name": "grass", "url": "https://api.example/type/12/"}},
            {"slot": 2, "type": {"name": "poison", "url": "https://api.example/type/4/"}}
        ],
        "abilities": [
            {"ability": {"name": "overgrow", "url": "https://api.example/ability/65/"}, "is_hidden": false}
        ]
    }"#;

    #[test]
    fn test_detail_response_flattens_to_catalogue_item() {
        let detail: DetailResponse = serde_json::from_str(DETAIL_JSON).unwrap();
        let item = flatten(detail);

        assert_eq!(item.id, 1);
        assert_eq!(item.name, "bulbasaur");
        assert_eq!(item.image_url, "https://img.example/1.png");
        assert_eq!(item.categories, vec!["grass", "poison"]);
        assert_eq!(item.height_dm, 7);
        assert_eq!(item.weight_hg, 69);
        assert_eq!(item.abilities, vec!["overgrow"]);
    }

    #[test]
    fn test_null_artwork_falls_back_to_static_url() {
        let json = DETAIL_JSON.replace("\"https://img.example/1.png\"", "null");
        let detail: DetailResponse = serde_json::from_str(&json).unwrap();
        let item = flatten(detail);

        assert!(item.image_url.ends_with("/official-artwork/1.png"));
    }

    #[test]
    fn test_list_response_shape() {
        let json = r#"{
            "count": 1302,
            "next": null,
            "previous": null,
            "results": [{"name": "bulbasaur", "url": "https://api.example/pokemon/1/"}]
        }"#;
        let list: ListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(list.results.len(), 1);
        assert_eq!(list.results[0].name, "bulbasaur");
        assert_eq!(list.results[0].url, "https://api.example/pokemon/1/");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = PokeApiClient::new("https://api.example/v2/");
        assert_eq!(client.base_url, "https://api.example/v2");
    }
}
