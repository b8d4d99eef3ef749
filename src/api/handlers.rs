use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::urls;
use crate::hypermedia::{
    Control, MasonDocument, IMAGE_PROFILE, LINK_RELATIONS_URL, MASON, SYNSET_PROFILE,
};
use crate::model::{self, Image, Synset};
use crate::store::traits::{
    HyponymStore, ImageStore, Store, StoreError, SynsetStore,
};

pub type AppState<S> = Arc<S>;

/// Fixed collection page size.
pub const PAGE_SIZE: usize = 50;

/// A Mason success body with its media type.
pub struct MasonResponse(pub MasonDocument);

impl IntoResponse for MasonResponse {
    fn into_response(self) -> Response {
        let payload = serde_json::to_string(&self.0).unwrap_or_default();
        ([(header::CONTENT_TYPE, MASON)], payload).into_response()
    }
}

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// API entry point: the namespace plus the way into the synset collection.
pub async fn get_entry_point() -> MasonResponse {
    let mut body = MasonDocument::new();
    body.add_namespace("imagenet_browser", LINK_RELATIONS_URL);
    body.add_control(
        "imagenet_browser:synsets-all",
        Control::new(urls::synset_collection()),
    );
    MasonResponse(body)
}

// Request-lifecycle helpers shared by every resource handler.

fn parse_start(uri: &Uri, params: &HashMap<String, String>) -> Result<usize, ApiError> {
    match params.get("start") {
        None => Ok(0),
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            ApiError::invalid_query(
                uri.path(),
                format!("'start' must be a non-negative integer, got '{}'", raw),
            )
        }),
    }
}

/// Media-type gate for writes: the body must be declared and parse as JSON.
fn parse_json_body(uri: &Uri, headers: &HeaderMap, body: &Bytes) -> Result<Value, ApiError> {
    let declared_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("json"))
        .unwrap_or(false);
    if !declared_json || body.is_empty() {
        return Err(ApiError::unsupported_media_type(uri.path()));
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::invalid_document(uri.path(), e.to_string()))
}

async fn require_synset<S: SynsetStore>(
    store: &S,
    uri: &Uri,
    wnid: &str,
) -> Result<Synset, ApiError> {
    match store.get_synset(wnid).await {
        Ok(Some(synset)) => Ok(synset),
        Ok(None) => Err(ApiError::not_found(
            uri.path(),
            format!("No synset with WordNet ID of '{}' found", wnid),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

fn synset_list_entry(synset: &Synset) -> MasonDocument {
    let mut item = MasonDocument::for_entity(synset);
    item.add_control("self", Control::new(urls::synset_item(&synset.wnid)));
    item.add_control("profile", Control::new(SYNSET_PROFILE));
    item
}

fn image_list_entry(wnid: &str, image: &Image) -> MasonDocument {
    let mut item = MasonDocument::for_entity(image);
    item.add_control("self", Control::new(urls::synset_image_item(wnid, &image.imid)));
    item.add_control("profile", Control::new(IMAGE_PROFILE));
    item
}

fn created(location: String) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}

// Synset collection

pub async fn get_synset_collection<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Result<MasonResponse, ApiError> {
    let start = parse_start(&uri, &params)?;
    let mut synsets = store
        .list_synsets(start, PAGE_SIZE + 1)
        .await
        .map_err(|e| ApiError::storage(uri.path(), e))?;
    let more = synsets.len() > PAGE_SIZE;
    synsets.truncate(PAGE_SIZE);

    let mut body = MasonDocument::new();
    body.add_namespace("imagenet_browser", LINK_RELATIONS_URL);
    body.add_control("self", Control::new(urls::synset_collection_page(start)));
    if start >= PAGE_SIZE {
        body.add_control(
            "prev",
            Control::new(urls::synset_collection_page(start - PAGE_SIZE)),
        );
    }
    if more {
        body.add_control(
            "next",
            Control::new(urls::synset_collection_page(start + PAGE_SIZE)),
        );
    }
    body.add_control_add_synset();
    body.insert(
        "items",
        synsets.iter().map(synset_list_entry).collect::<Vec<_>>(),
    );

    Ok(MasonResponse(body))
}

pub async fn post_synset_collection<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    // A malformed page offset rejects the request even on writes.
    parse_start(&uri, &params)?;

    let document = parse_json_body(&uri, &headers, &body)?;
    model::validate(&Synset::json_schema(), &document)
        .map_err(|message| ApiError::invalid_document(uri.path(), message))?;
    let synset: Synset = serde_json::from_value(document)
        .map_err(|e| ApiError::invalid_document(uri.path(), e.to_string()))?;

    let wnid = synset.wnid.clone();
    match store.insert_synset(synset).await {
        Ok(()) => Ok(created(urls::synset_item(&wnid))),
        Err(StoreError::Duplicate { .. }) => Err(ApiError::conflict(
            uri.path(),
            format!("Synset with WordNet ID of '{}' already exists", wnid),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

// Synset item

pub async fn get_synset_item<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path(wnid): Path<String>,
) -> Result<MasonResponse, ApiError> {
    let synset = require_synset(&*store, &uri, &wnid).await?;

    let mut body = MasonDocument::for_entity(&synset);
    body.add_namespace("imagenet_browser", LINK_RELATIONS_URL);
    body.add_control("self", Control::new(urls::synset_item(&wnid)));
    body.add_control("profile", Control::new(SYNSET_PROFILE));
    body.add_control("collection", Control::new(urls::synset_collection()));
    body.add_control_edit_synset(&wnid);
    body.add_control_delete_synset(&wnid);
    body.add_control(
        "imagenet_browser:synsetimagecollection",
        Control::new(urls::synset_image_collection(&wnid)),
    );
    body.add_control(
        "imagenet_browser:synsethyponymcollection",
        Control::new(urls::synset_hyponym_collection(&wnid)),
    );

    Ok(MasonResponse(body))
}

pub async fn put_synset_item<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path(wnid): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    require_synset(&*store, &uri, &wnid).await?;

    let document = parse_json_body(&uri, &headers, &body)?;
    model::validate(&Synset::json_schema(), &document)
        .map_err(|message| ApiError::invalid_document(uri.path(), message))?;
    let replacement: Synset = serde_json::from_value(document)
        .map_err(|e| ApiError::invalid_document(uri.path(), e.to_string()))?;

    let new_wnid = replacement.wnid.clone();
    match store.replace_synset(&wnid, replacement).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::not_found(
            uri.path(),
            format!("No synset with WordNet ID of '{}' found", wnid),
        )),
        Err(StoreError::Duplicate { .. }) => Err(ApiError::conflict(
            uri.path(),
            format!("Synset with WordNet ID of '{}' already exists", new_wnid),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

pub async fn delete_synset_item<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path(wnid): Path<String>,
) -> Result<StatusCode, ApiError> {
    match store.delete_synset(&wnid).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::not_found(
            uri.path(),
            format!("No synset with WordNet ID of '{}' found", wnid),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

// Hyponym collection

pub async fn get_hyponym_collection<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path(wnid): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<MasonResponse, ApiError> {
    let synset = require_synset(&*store, &uri, &wnid).await?;
    let start = parse_start(&uri, &params)?;

    // Pagination state falls out of the remaining slice; no count query.
    let remaining = store
        .hyponyms_from(&wnid, start)
        .await
        .map_err(|e| ApiError::storage(uri.path(), e))?;
    let more = remaining.len() > PAGE_SIZE;
    let page = &remaining[..remaining.len().min(PAGE_SIZE)];

    let mut body = MasonDocument::for_entity(&synset);
    body.add_namespace("imagenet_browser", LINK_RELATIONS_URL);
    body.add_control(
        "self",
        Control::new(urls::synset_hyponym_collection_page(&wnid, start)),
    );
    body.add_control("up", Control::new(urls::synset_item(&wnid)));
    if start >= PAGE_SIZE {
        body.add_control(
            "prev",
            Control::new(urls::synset_hyponym_collection_page(
                &wnid,
                start - PAGE_SIZE,
            )),
        );
    }
    if more {
        body.add_control(
            "next",
            Control::new(urls::synset_hyponym_collection_page(
                &wnid,
                start + PAGE_SIZE,
            )),
        );
    }
    body.add_control_add_hyponym(&wnid);
    body.insert(
        "items",
        page.iter().map(synset_list_entry).collect::<Vec<_>>(),
    );

    Ok(MasonResponse(body))
}

pub async fn post_hyponym_collection<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path(wnid): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    parse_start(&uri, &params)?;
    require_synset(&*store, &uri, &wnid).await?;

    let document = parse_json_body(&uri, &headers, &body)?;
    model::validate(&Synset::wnid_only_schema(), &document)
        .map_err(|message| ApiError::invalid_document(uri.path(), message))?;
    let Some(hyponym_wnid) = document.get("wnid").and_then(Value::as_str) else {
        return Err(ApiError::invalid_document(uri.path(), "'wnid' must be a string"));
    };

    // Linking never creates a synset, so the target must already exist.
    require_synset(&*store, &uri, hyponym_wnid).await?;

    match store.add_hyponym(&wnid, hyponym_wnid).await {
        Ok(()) => Ok(created(urls::synset_hyponym_item(&wnid, hyponym_wnid))),
        Err(StoreError::Duplicate { .. }) => Err(ApiError::conflict(
            uri.path(),
            format!(
                "Synset with WordNet ID of '{}' is already a hyponym of '{}'",
                hyponym_wnid, wnid
            ),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

// Hyponym item

pub async fn get_hyponym_item<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path((wnid, hyponym_wnid)): Path<(String, String)>,
) -> Result<MasonResponse, ApiError> {
    require_synset(&*store, &uri, &wnid).await?;

    match store.get_hyponym(&wnid, &hyponym_wnid).await {
        Ok(Some(hyponym)) => {
            let mut body = MasonDocument::for_entity(&hyponym);
            body.add_namespace("imagenet_browser", LINK_RELATIONS_URL);
            body.add_control(
                "self",
                Control::new(urls::synset_hyponym_item(&wnid, &hyponym_wnid)),
            );
            body.add_control("profile", Control::new(SYNSET_PROFILE));
            body.add_control("up", Control::new(urls::synset_hyponym_collection(&wnid)));
            body.add_control_delete_hyponym(&wnid, &hyponym_wnid);
            Ok(MasonResponse(body))
        }
        Ok(None) => Err(ApiError::not_found(
            uri.path(),
            format!(
                "Synset with WordNet ID of '{}' is not a hyponym of '{}'",
                hyponym_wnid, wnid
            ),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

pub async fn delete_hyponym_item<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path((wnid, hyponym_wnid)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    require_synset(&*store, &uri, &wnid).await?;

    match store.remove_hyponym(&wnid, &hyponym_wnid).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::not_found(
            uri.path(),
            format!(
                "Synset with WordNet ID of '{}' is not a hyponym of '{}'",
                hyponym_wnid, wnid
            ),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

// Image collection

pub async fn get_image_collection<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path(wnid): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<MasonResponse, ApiError> {
    let synset = require_synset(&*store, &uri, &wnid).await?;
    let start = parse_start(&uri, &params)?;

    let mut images = store
        .list_images(&wnid, start, PAGE_SIZE + 1)
        .await
        .map_err(|e| ApiError::storage(uri.path(), e))?;
    let more = images.len() > PAGE_SIZE;
    images.truncate(PAGE_SIZE);

    let mut body = MasonDocument::new();
    body.insert("wnid", &synset.wnid);
    body.add_namespace("imagenet_browser", LINK_RELATIONS_URL);
    body.add_control(
        "self",
        Control::new(urls::synset_image_collection_page(&wnid, start)),
    );
    body.add_control("up", Control::new(urls::synset_item(&wnid)));
    if start >= PAGE_SIZE {
        body.add_control(
            "prev",
            Control::new(urls::synset_image_collection_page(&wnid, start - PAGE_SIZE)),
        );
    }
    if more {
        body.add_control(
            "next",
            Control::new(urls::synset_image_collection_page(&wnid, start + PAGE_SIZE)),
        );
    }
    body.add_control_add_image(&wnid);
    body.insert(
        "items",
        images
            .iter()
            .map(|image| image_list_entry(&wnid, image))
            .collect::<Vec<_>>(),
    );

    Ok(MasonResponse(body))
}

pub async fn post_image_collection<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path(wnid): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    parse_start(&uri, &params)?;
    require_synset(&*store, &uri, &wnid).await?;

    let document = parse_json_body(&uri, &headers, &body)?;
    model::validate(&Image::json_schema(), &document)
        .map_err(|message| ApiError::invalid_document(uri.path(), message))?;
    let image: Image = serde_json::from_value(document)
        .map_err(|e| ApiError::invalid_document(uri.path(), e.to_string()))?;

    let imid = image.imid.clone();
    match store.insert_image(&wnid, image).await {
        Ok(()) => Ok(created(urls::synset_image_item(&wnid, &imid))),
        Err(StoreError::Duplicate { .. }) => Err(ApiError::conflict(
            uri.path(),
            format!("Image with ImageNet ID of '{}' already exists", imid),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

// Image item

pub async fn get_image_item<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path((wnid, imid)): Path<(String, String)>,
) -> Result<MasonResponse, ApiError> {
    require_synset(&*store, &uri, &wnid).await?;

    match store.get_image(&wnid, &imid).await {
        Ok(Some(image)) => {
            let mut body = MasonDocument::for_entity(&image);
            body.add_namespace("imagenet_browser", LINK_RELATIONS_URL);
            body.add_control("self", Control::new(urls::synset_image_item(&wnid, &imid)));
            body.add_control("profile", Control::new(IMAGE_PROFILE));
            body.add_control(
                "collection",
                Control::new(urls::synset_image_collection(&wnid)),
            );
            body.add_control_edit_image(&wnid, &imid);
            body.add_control_delete_image(&wnid, &imid);
            Ok(MasonResponse(body))
        }
        Ok(None) => Err(ApiError::not_found(
            uri.path(),
            format!(
                "No image with ImageNet ID of '{}' found in synset '{}'",
                imid, wnid
            ),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

pub async fn put_image_item<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path((wnid, imid)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    require_synset(&*store, &uri, &wnid).await?;

    let document = parse_json_body(&uri, &headers, &body)?;
    model::validate(&Image::json_schema(), &document)
        .map_err(|message| ApiError::invalid_document(uri.path(), message))?;
    let replacement: Image = serde_json::from_value(document)
        .map_err(|e| ApiError::invalid_document(uri.path(), e.to_string()))?;

    let new_imid = replacement.imid.clone();
    match store.replace_image(&wnid, &imid, replacement).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::not_found(
            uri.path(),
            format!(
                "No image with ImageNet ID of '{}' found in synset '{}'",
                imid, wnid
            ),
        )),
        Err(StoreError::Duplicate { .. }) => Err(ApiError::conflict(
            uri.path(),
            format!("Image with ImageNet ID of '{}' already exists", new_imid),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}

pub async fn delete_image_item<S: Store>(
    State(store): State<AppState<S>>,
    uri: Uri,
    Path((wnid, imid)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    require_synset(&*store, &uri, &wnid).await?;

    match store.delete_image(&wnid, &imid).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(ApiError::not_found(
            uri.path(),
            format!(
                "No image with ImageNet ID of '{}' found in synset '{}'",
                imid, wnid
            ),
        )),
        Err(e) => Err(ApiError::storage(uri.path(), e)),
    }
}
