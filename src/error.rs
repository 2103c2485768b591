//! 错误类型模块
//!
//! 定义引擎各阶段的错误分类：摄像头、模型加载、推理、快照上传。

use thiserror::Error;

/// 引擎错误分类
///
/// - `Device` / `ModelLoad`：启动阶段的致命错误，循环不会进入运行状态
/// - `Inference`：单次检测周期的错误，不会使循环崩溃
/// - `Upload`：快照上传失败，不影响检测循环的状态，也不会自动重试
#[derive(Debug, Error)]
pub enum EngineError {
    /// 摄像头不可用或权限被拒绝
    #[error("无法访问摄像头: {0}")]
    Device(String),

    /// 模型加载失败（网络或资源错误）
    #[error("模型加载失败: {0}")]
    ModelLoad(String),

    /// 单帧推理失败
    #[error("推理过程中发生错误: {0}")]
    Inference(String),

    /// 快照上传失败（网络错误或非成功状态码）
    #[error("快照上传失败: {0}")]
    Upload(String),
}
