pub mod config;
pub mod engine;
pub mod error;
pub mod segment;
pub mod utils;

// 重新导出segment模块中的常用类型和函数
pub use engine::{live_monitor, Monitor};
pub use error::EngineError;
pub use segment::{reduce, BoundingBox, FrameDimensions, LabelBuffer};
pub use segment::{load_model, ModelHandle, QualityProfile};
pub use segment::{CameraSource, FrameSource, OnnxSegmenter, OverlayRenderer, Segmenter};
pub use segment::image::{image_to_tensor, resize_image};
