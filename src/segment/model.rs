use ort::session::{builder::GraphOptimizationLevel, Session};

use crate::error::EngineError;
use crate::segment::profile::{ModelConfig, QualityProfile};

/// 已加载的分割模型句柄
///
/// 持有ONNX会话和加载时选定的档位配置。每个会话同一时刻只能有
/// 一个句柄存活，切换档位需要丢弃后重新加载。
pub struct ModelHandle {
    session: Session,
    config: ModelConfig,
}

impl ModelHandle {
    /// 获取底层会话的可变引用
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// 加载时选定的模型配置
    pub fn config(&self) -> ModelConfig {
        self.config
    }
}

/// 按档位加载人体分割模型
///
/// 加载ONNX格式的分割模型，并应用优化配置。
///
/// # 参数
/// * `profile` - 质量/速度档位
///
/// # 返回值
/// 返回模型句柄
///
/// # 错误处理
/// 如果模型文件缺失或资源加载失败会返回 `EngineError::ModelLoad`
///
/// # 示例
///
/// ```no_run
/// use persight::{load_model, QualityProfile};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), persight::EngineError> {
/// let handle = load_model(QualityProfile::Balanced).await?;
/// # Ok(())
/// # }
/// ```
pub async fn load_model(profile: QualityProfile) -> Result<ModelHandle, EngineError> {
    let session = Session::builder()
        .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
        .and_then(|b| b.with_intra_threads(4))
        .and_then(|b| b.commit_from_file(profile.model_path()))
        .map_err(|e| EngineError::ModelLoad(e.to_string()))?;

    Ok(ModelHandle {
        session,
        config: profile.model_config(),
    })
}
