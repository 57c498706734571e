//! ローカル画像の読み込みとプレビュー生成
//!
//! ブラウザと違い実際にデコードして、壊れた画像は選択時点で弾く

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;
use plant_doctor_common::preview::{mime_for_extension, to_data_url};
use plant_doctor_common::{Error as CommonError, ImageFile, Preview, PreviewDecoder};
use tracing::debug;

use crate::error::{PlantDoctorError, Result};

/// パスから画像ファイルを読み込む（形式の検証はデコーダ側）
pub fn load_image_file(path: &Path) -> Result<ImageFile> {
    if !path.is_file() {
        return Err(PlantDoctorError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = path
        .extension()
        .map(|ext| mime_for_extension(&ext.to_string_lossy()))
        .unwrap_or("application/octet-stream")
        .to_string();

    debug!(file = %name, mime = %mime_type, size = bytes.len(), "loaded image file");
    Ok(ImageFile { name, mime_type, bytes })
}

/// `image` クレートで実デコードするデコーダ
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

impl PreviewDecoder for ImageCrateDecoder {
    fn decode(&self, file: &ImageFile) -> plant_doctor_common::Result<Preview> {
        let reader = ImageReader::new(Cursor::new(&file.bytes))
            .with_guessed_format()
            .map_err(|e| CommonError::Preview(format!("{}: {}", file.name, e)))?;

        let format = reader
            .format()
            .ok_or_else(|| CommonError::Preview(format!("{}: unrecognised image data", file.name)))?;

        let image = reader
            .decode()
            .map_err(|e| CommonError::Preview(format!("{}: {}", file.name, e)))?;

        // 拡張子から推定できなかった場合は中身の形式を使う
        let mime_type = if file.mime_type.starts_with("image/") {
            file.mime_type.clone()
        } else {
            format.to_mime_type().to_string()
        };

        Ok(Preview {
            data_url: to_data_url(&mime_type, &file.bytes),
            mime_type,
            dimensions: Some((image.width(), image.height())),
        })
    }
}
