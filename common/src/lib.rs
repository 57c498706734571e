//! Plant Doctor Common Library
//!
//! CLIとWeb(WASM)で共有される型・画面状態・表示モデル

pub mod types;
pub mod error;
pub mod render;
pub mod preview;
pub mod session;
pub mod endpoint;

pub use types::{AnalysisResult, ChemicalTreatment, DetectedProblem, Diagnosis, NaturalRemedy};
pub use error::{AnalysisError, Error, Result};
pub use render::{render_result, RemedyBlock, RemedyKind, RemedyList, ResultView, StatusTone, TextList};
pub use preview::{DataUrlDecoder, ImageFile, Preview, PreviewDecoder};
pub use session::{AnalysisRequest, Completion, SelectedImage, Session, SessionView, Ticket};
pub use endpoint::{analyze_url, parse_analysis_body, DEFAULT_SERVICE_URL, FILE_FIELD};
