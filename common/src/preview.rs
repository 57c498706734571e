//! 選択画像のプレビュー生成
//!
//! プレビューはネットワークを使わずに表示できる Data URL。
//! 画像のデコード手段はプラットフォームごとに異なるため `PreviewDecoder` で差し替える。

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};

/// ファイルピッカーから得たファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    /// 空文字列ならデコーダが中身から判定する
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// FileReaderが返したData URLから組み立てる
    ///
    /// `declared_type` はピッカーが申告した形式（空なら Data URL 側を使う）。
    /// 読めなかった理由はファイル名付きの `Error::Preview` になる。
    pub fn from_data_url(name: &str, declared_type: &str, data_url: &str) -> Result<Self> {
        // 0バイトのファイルは "data:" だけになるブラウザがある
        let (mime_type, bytes) = match parse_data_url(data_url) {
            Ok(parsed) => parsed,
            Err(_) if data_url == "data:" => (String::new(), Vec::new()),
            Err(Error::Preview(reason)) => {
                return Err(Error::Preview(format!("{}: {}", name, reason)))
            }
            Err(err) => return Err(err),
        };

        Ok(ImageFile {
            name: name.to_string(),
            mime_type: if declared_type.is_empty() {
                mime_type
            } else {
                declared_type.to_string()
            },
            bytes,
        })
    }
}

/// 表示可能なプレビュー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub data_url: String,
    pub mime_type: String,
    /// 実デコードしたデコーダのみ設定する
    pub dimensions: Option<(u32, u32)>,
}

/// 画像 → プレビューの変換
pub trait PreviewDecoder {
    fn decode(&self, file: &ImageFile) -> Result<Preview>;
}

/// 対応する画像形式（マジックバイトで判定）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Tiff,
}

impl ImageFormat {
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(ImageFormat::Gif)
        } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::WebP)
        } else if bytes.starts_with(b"BM") {
            Some(ImageFormat::Bmp)
        } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
            Some(ImageFormat::Tiff)
        } else {
            None
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
        }
    }
}

/// 拡張子からMIMEタイプを推定
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Data URLを組み立てる
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Data URLを (MIMEタイプ, バイト列) に分解する
///
/// # Examples
/// ```
/// use plant_doctor_common::preview::parse_data_url;
///
/// let (mime, bytes) = parse_data_url("data:image/png;base64,iVBORw==").unwrap();
/// assert_eq!(mime, "image/png");
/// assert_eq!(bytes, vec![0x89, 0x50, 0x4E, 0x47]);
/// ```
pub fn parse_data_url(data_url: &str) -> Result<(String, Vec<u8>)> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| Error::Preview("not a data URL".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::Preview("data URL has no payload".into()))?;
    let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
        Error::Preview("data URL is not base64 encoded".into())
    })?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Error::Preview(format!("invalid base64: {}", e)))?;
    Ok((mime_type.to_string(), bytes))
}

/// Data URL を作るだけのデコーダ
///
/// ブラウザでは実際の描画を `<img>` に任せる。
/// `image/*` と申告されたファイルはそのまま通し、
/// 形式が不明な場合だけマジックバイトで判定する。
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlDecoder;

impl PreviewDecoder for DataUrlDecoder {
    fn decode(&self, file: &ImageFile) -> Result<Preview> {
        if file.bytes.is_empty() {
            return Err(Error::Preview(format!("{}: file is empty", file.name)));
        }

        let mime_type = if file.mime_type.starts_with("image/") {
            file.mime_type.clone()
        } else {
            ImageFormat::sniff(&file.bytes)
                .map(|format| format.mime_type().to_string())
                .ok_or_else(|| {
                    Error::Preview(format!("{}: unrecognised image data", file.name))
                })?
        };

        Ok(Preview {
            data_url: to_data_url(&mime_type, &file.bytes),
            mime_type,
            dimensions: None,
        })
    }
}
