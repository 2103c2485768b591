/// 模型骨干网络
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    MobileNetV1,
    ResNet50,
}

/// 质量/速度档位
///
/// 每次模型加载时选定一次，之后不可变。切换档位需要丢弃当前的
/// 模型句柄并重新加载。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QualityProfile {
    /// 速度优先：MobileNetV1，宽度系数0.50
    Fast,
    /// 折中（默认）：MobileNetV1，宽度系数0.75
    #[default]
    Balanced,
    /// 精度优先：ResNet50
    Accurate,
}

/// 档位对应的模型配置
///
/// 仅由分割适配器消费，各字段与档位一一绑定。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    /// 骨干网络
    pub architecture: Architecture,
    /// 输出步长
    pub stride: u32,
    /// 宽度系数（ResNet50没有该参数）
    pub width_multiplier: Option<f32>,
    /// 权重量化字节数
    pub quantization: u8,
}

impl QualityProfile {
    /// 获取档位对应的模型配置
    ///
    /// # 返回值
    /// 返回该档位的固定配置记录
    pub fn model_config(self) -> ModelConfig {
        match self {
            QualityProfile::Fast => ModelConfig {
                architecture: Architecture::MobileNetV1,
                stride: 16,
                width_multiplier: Some(0.50),
                quantization: 2,
            },
            QualityProfile::Balanced => ModelConfig {
                architecture: Architecture::MobileNetV1,
                stride: 16,
                width_multiplier: Some(0.75),
                quantization: 2,
            },
            QualityProfile::Accurate => ModelConfig {
                architecture: Architecture::ResNet50,
                stride: 32,
                width_multiplier: None,
                quantization: 2,
            },
        }
    }

    /// 档位对应的ONNX模型文件路径
    pub fn model_path(self) -> &'static str {
        match self {
            QualityProfile::Fast => "module/segment/bodypix_mobilenet_050_stride16.onnx",
            QualityProfile::Balanced => "module/segment/bodypix_mobilenet_075_stride16.onnx",
            QualityProfile::Accurate => "module/segment/bodypix_resnet50_stride32.onnx",
        }
    }
}
