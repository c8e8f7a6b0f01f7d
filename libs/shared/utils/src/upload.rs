use std::path::Path;

use axum::extract::Multipart;
use uuid::Uuid;

use shared_models::error::AppError;

const ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

pub const MAX_IMAGE_SIZE: usize = 2 * 1024 * 1024;

/// Body cap for upload routes. Leaves headroom over [`MAX_IMAGE_SIZE`] for
/// multipart framing so an oversized image reaches the size check here
/// instead of tripping the framework's generic body limit.
pub const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_SIZE + 64 * 1024;

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => ".png",
        _ => ".jpg",
    }
}

/// Pull the named image field out of a multipart body, validate type and
/// size, and persist it under `upload_dir/subdir` with a random filename.
/// Returns the stored filename.
pub async fn save_image(
    mut multipart: Multipart,
    field_name: &str,
    upload_dir: &str,
    subdir: &str,
) -> Result<String, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(|c| c.to_string())
            .ok_or_else(|| AppError::BadRequest("Missing file content type".to_string()))?;

        if !ALLOWED_TYPES.contains(&content_type.as_str()) {
            return Err(AppError::BadRequest(
                "File type not allowed. Only JPG, JPEG and PNG are allowed".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(AppError::BadRequest(
                "File size too large. Maximum size is 2MB".to_string(),
            ));
        }

        let file_name = format!("{}{}", Uuid::new_v4(), extension_for(&content_type));
        let dir = Path::new(upload_dir).join(subdir);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;
        tokio::fs::write(dir.join(&file_name), &data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

        return Ok(file_name);
    }

    Err(AppError::BadRequest(format!("Missing '{}' file field", field_name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_follows_content_type() {
        assert_eq!(extension_for("image/png"), ".png");
        assert_eq!(extension_for("image/jpeg"), ".jpg");
        assert_eq!(extension_for("image/jpg"), ".jpg");
    }
}
