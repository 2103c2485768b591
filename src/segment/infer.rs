use async_trait::async_trait;
use image::DynamicImage;
use ndarray::Array4;
use ort::{inputs, session::Session, value::Tensor};

use crate::config::{FLIP_HORIZONTAL, SEGMENTATION_THRESHOLD};
use crate::error::EngineError;
use crate::segment::image::{image_to_tensor, internal_size, resize_image};
use crate::segment::mask::LabelBuffer;
use crate::segment::model::ModelHandle;

/// 分割适配器接口
///
/// 把外部人体分割模型抽象成单一的异步分类操作：输入一帧图像，
/// 输出逐像素标签缓冲区。调度器在发起下一次调用前必须等待上一次
/// 完成，因此每个实现同一时刻至多一个调用在途。
#[async_trait]
pub trait Segmenter: Send {
    /// 对一帧图像做人体分割
    ///
    /// # 参数
    /// * `frame` - 待分类的视频帧
    ///
    /// # 返回值
    /// 返回内部分辨率下的标签缓冲区（person = 1，背景 = 0）
    ///
    /// # 错误处理
    /// 帧不可读或推理失败时返回 `EngineError::Inference`
    async fn classify(&mut self, frame: &DynamicImage) -> Result<LabelBuffer, EngineError>;
}

/// 基于ONNX模型的分割适配器
///
/// 持有模型句柄，水平翻转、内部分辨率和分割阈值均为会话级固定
/// 配置（见config模块），不随调用变化。
pub struct OnnxSegmenter {
    handle: ModelHandle,
}

impl OnnxSegmenter {
    /// 用已加载的模型句柄创建适配器
    pub fn new(handle: ModelHandle) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl Segmenter for OnnxSegmenter {
    async fn classify(&mut self, frame: &DynamicImage) -> Result<LabelBuffer, EngineError> {
        let frame = if FLIP_HORIZONTAL {
            frame.fliph()
        } else {
            frame.clone()
        };

        let (in_w, in_h) = internal_size(frame.width(), frame.height());
        let resized = resize_image(&frame, in_w, in_h);
        let tensor = image_to_tensor(&resized, in_h as usize, in_w as usize);

        let scores = run_inference(self.handle.session_mut(), &tensor)?;

        // 按固定阈值把person概率图二值化为标签
        let labels: Vec<u8> = scores
            .iter()
            .map(|&p| if p >= SEGMENTATION_THRESHOLD { 1 } else { 0 })
            .collect();

        Ok(LabelBuffer::new(in_w as usize, in_h as usize, labels))
    }
}

/// 运行分割模型推理
///
/// 使用ONNX模型对输入张量进行推理，返回逐像素的person概率。
///
/// # 参数
/// * `model` - ONNX模型Session
/// * `input` - 输入张量，形状应为(1, 3, height, width)
///
/// # 返回值
/// 返回长度为 height*width 的概率向量，按行优先排列
///
/// # 错误处理
/// 如果推理过程中发生错误会返回 `EngineError::Inference`
pub fn run_inference(model: &mut Session, input: &Array4<f32>) -> Result<Vec<f32>, EngineError> {
    let shape: Vec<usize> = input.shape().to_vec();
    let (data, _offset) = input.clone().into_raw_vec_and_offset();
    let input_tensor = Tensor::from_array(([shape[0], shape[1], shape[2], shape[3]], data))
        .map_err(|e| EngineError::Inference(e.to_string()))?;

    let outputs = model
        .run(inputs!["image" => input_tensor])
        .map_err(|e| EngineError::Inference(e.to_string()))?;

    // 提取输出并处理
    let output = outputs[0]
        .try_extract_tensor::<f32>()
        .map_err(|e| EngineError::Inference(e.to_string()))?;
    let out_shape = output.0.clone();

    // 分割头输出形状为 [1, 1, height, width]，逐像素一个person概率
    if out_shape.len() != 4 || out_shape[0] != 1 || out_shape[1] != 1 {
        return Err(EngineError::Inference("模型输出形状不符合预期".into()));
    }
    if (out_shape[2] as usize) != shape[2] || (out_shape[3] as usize) != shape[3] {
        return Err(EngineError::Inference(
            "模型输出分辨率与声明的内部分辨率不一致".into(),
        ));
    }

    Ok(output.1.to_vec())
}
