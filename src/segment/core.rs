use image::DynamicImage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::{DEFAULT_MASK_OPACITY, PERSON_CLASS_LABEL};
use crate::error::EngineError;
use crate::segment::capture::FrameSource;
use crate::segment::infer::Segmenter;
use crate::segment::mask::{reduce, BoundingBox, FrameDimensions};
use crate::segment::overlay::OverlayRenderer;
use crate::utils::stream::Stream;

/// 检测会话的核心结构
///
/// 封装一次运行中的全部状态：帧来源、分割适配器、覆盖层渲染器、
/// 检测结果输出流，以及作为唯一取消信号的运行标志。运行标志归
/// 会话所有而不是全局状态，多个会话可以互不干扰地存在。
pub struct Session<F, S> {
    /// 帧来源
    source: F,
    /// 分割适配器
    segmenter: S,
    /// 覆盖层渲染器，acquire成功后创建
    renderer: Option<OverlayRenderer>,
    /// 输出检测结果流（线程安全）
    bounds_stream: Arc<Mutex<Stream<Vec<BoundingBox>>>>,
    /// 控制循环运行的标志
    running: Arc<AtomicBool>,
    /// 最近一次绘制周期的视频帧，供快照合成使用
    last_frame: Option<DynamicImage>,
}

impl<F: FrameSource, S: Segmenter> Session<F, S> {
    /// 创建一个新的会话
    ///
    /// # 参数
    /// * `source` - 帧来源
    /// * `segmenter` - 分割适配器
    /// * `bounds_stream` - 输出结果流的线程安全引用
    /// * `running` - 会话的运行标志
    pub fn new(
        source: F,
        segmenter: S,
        bounds_stream: Arc<Mutex<Stream<Vec<BoundingBox>>>>,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            source,
            segmenter,
            renderer: None,
            bounds_stream,
            running,
            last_frame: None,
        }
    }

    /// 打开帧来源并按上报的原生分辨率建立显示表面
    ///
    /// 会挂起等待，直到流的分辨率已知。
    ///
    /// # 错误处理
    /// 摄像头不可用时返回 `EngineError::Device`，不会进入运行状态
    pub async fn open(&mut self) -> Result<FrameDimensions, EngineError> {
        let dims = self.source.acquire().await?;
        self.renderer = Some(OverlayRenderer::new(dims));
        Ok(dims)
    }

    /// 执行一次检测周期
    ///
    /// 该方法会：
    /// 1. 从帧来源读取当前帧
    /// 2. 等待分割适配器完成分类
    /// 3. 清除并重绘显示表面（遮罩 + 标注框）
    /// 4. 把边界框序列写入输出流
    ///
    /// 分类等待期间收到停止请求时，结果直接丢弃，不再绘制。
    ///
    /// # 错误处理
    /// 推理失败只终止本周期，返回 `EngineError::Inference`
    pub async fn cycle(&mut self) -> Result<(), EngineError> {
        let frame = self.source.frame()?;
        let labels = self.segmenter.classify(&frame).await?;

        // 在途推理完成后重新检查取消信号
        if !self.running.load(Ordering::Acquire) {
            return Ok(());
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };

        renderer.clear();
        renderer.paint_mask(&labels, DEFAULT_MASK_OPACITY);

        let boxes = reduce(&labels);
        for bbox in &boxes {
            // 标签缓冲区分辨率通常比显示粗，框坐标先换算再绘制
            let scaled = bbox.to_display(&labels, renderer.dimensions());
            renderer.paint_box(&scaled, PERSON_CLASS_LABEL);
        }

        self.last_frame = Some(frame);

        let mut stream = self.bounds_stream.lock().unwrap();
        let _ = stream.write(boxes);
        Ok(())
    }

    /// 停止后的收尾：清空显示表面并释放帧来源
    pub fn shutdown(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.clear();
        }
        self.source.release();
        self.last_frame = None;
    }

    /// 当前的覆盖层渲染器
    pub fn renderer(&self) -> Option<&OverlayRenderer> {
        self.renderer.as_ref()
    }

    /// 最近一次绘制周期的视频帧
    pub fn last_frame(&self) -> Option<&DynamicImage> {
        self.last_frame.as_ref()
    }
}
