use actix_multipart::Multipart;
use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::{Stream, StreamExt};
use std::fs;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use super::FileService;
use crate::config::AppConfig;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::files::entities::CreateFileRequest;
use crate::models::{ApiResponse, ErrorCode, files::responses::FileUploadResponse};
use crate::utils::validate_magic_bytes;

fn upload_failed(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, message))
}

#[derive(Debug)]
enum SaveFailure<E> {
    ContentMismatch,
    TooLarge,
    Payload(E),
    Io(std::io::Error),
}

/// 写入单个文件字段，失败时删除已写入的部分
async fn save_field<S, E>(
    chunks: S,
    file_path: &str,
    mut file: fs::File,
    extension: &str,
    max_size: usize,
) -> Result<usize, SaveFailure<E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let result = write_chunks(chunks, &mut file, extension, max_size).await;
    if result.is_err() {
        drop(file);
        let _ = fs::remove_file(file_path);
    }
    result
}

async fn write_chunks<S, E>(
    chunks: S,
    file: &mut fs::File,
    extension: &str,
    max_size: usize,
) -> Result<usize, SaveFailure<E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let mut chunks = std::pin::pin!(chunks);
    let mut total_size: usize = 0;
    let mut first_chunk = true;
    while let Some(chunk) = chunks.next().await {
        let data = chunk.map_err(SaveFailure::Payload)?;

        // 第一个 chunk 时验证魔术字节
        if first_chunk {
            first_chunk = false;
            if !validate_magic_bytes(&data, extension) {
                return Err(SaveFailure::ContentMismatch);
            }
        }

        total_size += data.len();
        if total_size > max_size {
            return Err(SaveFailure::TooLarge);
        }
        file.write_all(&data).map_err(SaveFailure::Io)?;
    }
    Ok(total_size)
}

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let allowed_types = &config.upload.allowed_types;

    let user_id = match RequireJWT::extract_user_id(req) {
        Some(id) => id,
        None => {
            return Ok(
                HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                    ErrorCode::Unauthorized,
                    "Vous devez être connecté pour effectuer cette opération.",
                )),
            );
        }
    };

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", CampusError::file_operation(format!("{e}")));
        return Ok(upload_failed("Impossible de préparer le dossier de téléversement"));
    }

    let mut original_name = String::new();
    let mut file_size: i64 = 0;
    let mut file_uploaded = false;
    let mut file_type = String::new();
    let mut stored_name = String::new();
    let token = Uuid::new_v4().simple().to_string();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }
        if file_uploaded {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Un seul fichier peut être téléversé à la fois",
            )));
        }
        file_uploaded = true;

        original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        // 扩展名白名单，含点号
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !allowed_types.iter().any(|t| t.to_lowercase() == extension) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "Type de fichier non autorisé",
            )));
        }
        file_type = extension.trim_start_matches('.').to_string();

        stored_name = format!("{}-{}.bin", chrono::Utc::now().timestamp(), token);
        let file_path = format!("{upload_dir}/{stored_name}");
        let f = match fs::File::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("{}", CampusError::file_operation(format!("{e}")));
                return Ok(upload_failed("Impossible de créer le fichier"));
            }
        };

        file_size = match save_field(field, &file_path, f, &extension, max_size).await {
            Ok(size) => size as i64,
            Err(SaveFailure::ContentMismatch) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "Le contenu du fichier ne correspond pas à son extension",
                )));
            }
            Err(SaveFailure::TooLarge) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "Le fichier dépasse la taille maximale autorisée",
                )));
            }
            Err(SaveFailure::Payload(e)) => return Err(e.into()),
            Err(SaveFailure::Io(e)) => {
                tracing::error!("{}", CampusError::file_operation(format!("{e}")));
                return Ok(upload_failed("Impossible d'écrire le fichier"));
            }
        };
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Aucun fichier dans la requête",
        )));
    }

    let storage = service.get_storage(req)?;
    let file_path = format!("{upload_dir}/{stored_name}");
    let file = match storage
        .create_file(CreateFileRequest {
            token,
            original_name,
            stored_name,
            file_size,
            file_type,
            user_id,
        })
        .await
    {
        Ok(file) => file,
        Err(e) => {
            tracing::error!("Failed to record uploaded file: {}", e);
            let _ = fs::remove_file(&file_path);
            return Ok(upload_failed("Le téléversement du fichier a échoué"));
        }
    };

    let response = FileUploadResponse {
        url: file.download_url(),
        token: file.token,
        file_name: file.original_name,
        file_type: file.file_type,
        size: file.file_size,
        uploaded_at: file.uploaded_at,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Fichier téléversé")))
}
