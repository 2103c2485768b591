//! Segment模块 - 实时人体分割覆盖引擎的核心
//!
//! 该模块实现了从摄像头帧到覆盖层绘制的完整流水线，包括：
//! - 摄像头采集
//! - 模型加载
//! - 帧预处理
//! - 模型推理（逐像素分割）
//! - 标签缓冲区归约（边界框）
//! - 覆盖层绘制（遮罩 + 标注框）
//! - 快照合成与上传
//!
//! # 主要组件
//!
//! - Session：单次运行的检测会话，执行检测周期
//! - OnnxSegmenter：封装ONNX分割模型的适配器
//! - OverlayRenderer：遮罩和标注框的绘制表面
//! - reduce：把逐像素标签归约为至多一个边界框
//!
//! # 工作流程
//!
//! 1. 使用load_model按档位加载ONNX分割模型
//! 2. 打开帧来源，按摄像头原生分辨率建立显示表面
//! 3. 每个周期：取帧 → classify → reduce → 清除并重绘覆盖层
//! 4. 需要时调用snapshot模块合成视频帧与覆盖层并上传

pub mod capture;
pub mod core;
pub mod image;
pub mod infer;
pub mod mask;
pub mod model;
pub mod overlay;
pub mod profile;
pub mod snapshot;

// 重新导出常用类型和函数
pub use capture::{CameraSource, FrameSource};
pub use core::Session;
pub use infer::{OnnxSegmenter, Segmenter};
pub use mask::{reduce, BoundingBox, FrameDimensions, LabelBuffer};
pub use model::{load_model, ModelHandle};
pub use overlay::OverlayRenderer;
pub use profile::{Architecture, ModelConfig, QualityProfile};
