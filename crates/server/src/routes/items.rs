//! Item route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use serde::{Deserialize, Serialize};

use reclaim_core::{AccountId, ItemId, ItemType};

use crate::error::{AppError, Result};
use crate::models::ItemView;
use crate::services::{CreateItem, ItemService};
use crate::state::AppState;

/// Response for item creation.
#[derive(Debug, Serialize)]
pub struct CreateItemResponse {
    pub message: String,
    pub item: ItemView,
}

/// Query parameters for item listing.
#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}

/// Request body for marking an item returned. The caller asserts their own
/// identity here; see the module docs in [`crate::routes`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReturnedRequest {
    #[serde(default)]
    pub user_id: Option<AccountId>,
}

/// Confirmation message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Report a lost or found item.
///
/// POST /api/items (multipart/form-data)
///
/// Text fields: type, productName, description (optional), date, location,
/// mobile, userId. Optional binary field: image.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CreateItemResponse>> {
    let mut req = CreateItem::default();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid image field: {e}")))?;
            if !bytes.is_empty() {
                image = Some((file_name, bytes.to_vec()));
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid field '{name}': {e}")))?;

        match name.as_str() {
            "type" => req.item_type = Some(value),
            "productName" => req.product_name = Some(value),
            "description" => req.description = Some(value),
            "date" => req.date = Some(value),
            "location" => req.location = Some(value),
            "mobile" => req.mobile = Some(value),
            "userId" => req.owner_id = value.parse::<i64>().ok().map(AccountId::new),
            _ => {}
        }
    }

    // The image collaborator only hands back an opaque path; like the rest of
    // the request it is still subject to the service's validation below.
    if let Some((file_name, bytes)) = image {
        req.image = Some(state.images().save(&file_name, &bytes).await?);
    }

    let item = ItemService::new(state.pool()).create(req).await?;

    tracing::info!(item_id = %item.id, item_type = %item.item_type, "item reported");

    Ok(Json(CreateItemResponse {
        message: "Item added successfully".to_owned(),
        item: item.into(),
    }))
}

/// List items of one type, newest first.
///
/// GET /api/items?type=lost|found
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<Vec<ItemView>>> {
    let item_type = ItemType::parse(query.item_type.as_deref().unwrap_or_default())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let items = ItemService::new(state.pool()).list(item_type).await?;

    Ok(Json(items.into_iter().map(ItemView::from).collect()))
}

/// Mark an item as returned (owner only, one-way).
///
/// PUT /api/items/{id}/returned
pub async fn mark_returned(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<MarkReturnedRequest>,
) -> Result<Json<MessageResponse>> {
    ItemService::new(state.pool())
        .mark_returned(ItemId::new(id), req.user_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Item marked as returned".to_owned(),
    }))
}
