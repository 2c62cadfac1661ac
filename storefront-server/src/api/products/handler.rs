//! Product API Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
};
use uuid::Uuid;

use crate::api::MessageResponse;
use crate::core::AppState;
use crate::media::ImageUpload;
use crate::sheets::SheetError;
use shared::{AppError, AppResult, ErrorCode, Product, ProductColumn, ProductForm};

/// Multipart field carrying the image file
const IMAGE_FIELD: &str = "image_url";

/// GET /products - list every product row
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let sheet = &state.sheet;
    let (details, prices, image_urls) = tokio::try_join!(
        sheet.col_values(ProductColumn::Detail.index()),
        sheet.col_values(ProductColumn::Price.index()),
        sheet.col_values(ProductColumn::ImageUrl.index()),
    )
    .map_err(list_error)?;

    let mut products = shared::products_from_columns(details, prices, image_urls);
    if state.config.sheets.skip_header && !products.is_empty() {
        products.remove(0);
    }

    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// Read failures answer 404 either way; only the message differs
fn list_error(err: SheetError) -> AppError {
    match err {
        SheetError::SpreadsheetNotFound(name) => {
            tracing::warn!(spreadsheet = %name, "Spreadsheet not found");
            AppError::product_not_found()
        }
        other => {
            tracing::warn!(error = %other, "Failed to read products");
            AppError::with_message(
                ErrorCode::SheetReadFailed,
                format!("An error occurred: {other}"),
            )
        }
    }
}

/// POST /products - upload the image, then append the product row
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProductForm>)> {
    let (form, image) = read_product_form(multipart, &state.config.media.folder).await?;

    let file_name = image.file_name.clone();
    let image_url = state.media.upload(image).await.map_err(|e| {
        tracing::error!(file_name = ?file_name, error = %e, "Image upload failed");
        AppError::with_message(ErrorCode::UploadFailed, format!("Image upload failed: {e}"))
    })?;

    let id = Uuid::new_v4().to_string();
    let row = form.clone().into_row(id.clone(), image_url.clone());

    if let Err(e) = state.sheet.append_row(row).await {
        tracing::error!(
            product_id = %id,
            orphaned_image = %image_url,
            error = %e,
            "Failed to append product row"
        );
        return Err(AppError::with_message(
            ErrorCode::SheetWriteFailed,
            format!("Failed to save product: {e}"),
        ));
    }

    tracing::info!(product_id = %id, image_url = %image_url, "Product created");
    Ok((StatusCode::CREATED, Json(form)))
}

/// PUT /products/{id} - accepted, nothing is changed
pub async fn update(Path(id): Path<String>) -> AppResult<StatusCode> {
    let id = parse_product_id(&id)?;
    tracing::debug!(product_id = id, "Update requested");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /products/{id} - acknowledged, nothing is removed
pub async fn delete(Path(id): Path<String>) -> AppResult<Json<MessageResponse>> {
    let id = parse_product_id(&id)?;
    tracing::debug!(product_id = id, "Delete requested");
    Ok(Json(MessageResponse::new(format!("Product deleted id: {id}"))))
}

/// Positive integer id; anything else is an unknown product
fn parse_product_id(raw: &str) -> AppResult<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::product_not_found());
    }
    match raw.parse::<u64>() {
        Ok(0) | Err(_) => Err(AppError::product_not_found()),
        Ok(id) => Ok(id),
    }
}

/// Bodies cut off by the upload limit are 413, anything else is malformed
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::with_message(ErrorCode::PayloadTooLarge, err.body_text());
    }
    AppError::invalid_request(format!("Invalid multipart request: {}", err.body_text()))
}

/// Collect the text fields and the image part of a create request
///
/// The first occurrence of each field wins. Unknown fields are ignored.
async fn read_product_form(
    mut multipart: Multipart,
    folder: &str,
) -> AppResult<(ProductForm, ImageUpload)> {
    let mut values: [Option<String>; 5] = Default::default();
    let mut image: Option<(Bytes, Option<String>, Option<String>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            // Only a part with a filename counts as a file upload
            if image.is_some() || field.file_name().is_none() {
                continue;
            }
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(multipart_error)?;
            image = Some((bytes, file_name, content_type));
            continue;
        }

        if let Some(slot) = ProductForm::FIELDS.iter().position(|f| *f == name)
            && values[slot].is_none()
        {
            let text = field
                .text()
                .await
                .map_err(multipart_error)?;
            values[slot] = Some(text);
        }
    }

    let (bytes, file_name, content_type) = match image {
        Some((bytes, ..)) if bytes.is_empty() => {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Empty image file provided",
            ));
        }
        Some(image) => image,
        None => {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "No image file provided",
            ));
        }
    };

    let [detail, price, supplier, category, quantity] = values;
    let take = |value: Option<String>, field: &str| {
        value.ok_or_else(|| AppError::required_field(field))
    };

    let form = ProductForm {
        detail: take(detail, "detail")?,
        price: take(price, "price")?,
        supplier: take(supplier, "supplier")?,
        category: take(category, "category")?,
        quantity: take(quantity, "quantity")?,
    };

    let upload = ImageUpload {
        bytes,
        file_name,
        content_type,
        folder: folder.to_string(),
    };

    Ok((form, upload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_id() {
        assert_eq!(parse_product_id("5").unwrap(), 5);
        assert_eq!(parse_product_id("007").unwrap(), 7);

        for raw in ["0", "00", "", "-3", "+3", "abc", "1.5", "99999999999999999999999"] {
            let err = parse_product_id(raw).unwrap_err();
            assert_eq!(err.code, ErrorCode::ProductNotFound, "id {raw:?}");
            assert_eq!(err.message, "Product not found");
        }
    }

    #[test]
    fn test_list_error_mapping() {
        let err = list_error(SheetError::SpreadsheetNotFound("db-tienda".into()));
        assert_eq!(err.message, "Product not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err = list_error(SheetError::NoWorksheet);
        assert_eq!(err.message, "An error occurred: spreadsheet has no worksheets");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
    }
}
