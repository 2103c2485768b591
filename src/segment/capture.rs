use async_trait::async_trait;
use image::DynamicImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};
use nokhwa::Camera;

use crate::config::{CAMERA_HEIGHT, CAMERA_INDEX, CAMERA_WIDTH};
use crate::error::EngineError;
use crate::segment::mask::FrameDimensions;

/// 帧来源接口
///
/// 把摄像头抽象成可注入的帧供给方，便于在测试中用合成帧替代
/// 真实设备。
#[async_trait]
pub trait FrameSource: Send {
    /// 获取视频流并上报原生分辨率
    ///
    /// 调用方会挂起等待，直到流的原生分辨率已知才返回，下游
    /// 所有缓冲区都按该尺寸分配。
    ///
    /// # 错误处理
    /// 摄像头不存在或权限被拒绝时返回 `EngineError::Device`
    async fn acquire(&mut self) -> Result<FrameDimensions, EngineError>;

    /// 读取当前帧
    fn frame(&mut self) -> Result<DynamicImage, EngineError>;

    /// 释放视频流
    ///
    /// 会话停止或销毁时调用，关闭底层设备流。
    fn release(&mut self);
}

/// 基于nokhwa的摄像头帧来源
///
/// 按 1280x720 请求前置摄像头，不请求音频。
pub struct CameraSource {
    camera: Option<Camera>,
    dims: Option<FrameDimensions>,
}

// 摄像头只被持有它的会话独占访问（会话位于互斥锁之后），跨线程
// 移动时不存在并发使用；nokhwa后端句柄仅在此前提下安全
unsafe impl Send for CameraSource {}

impl CameraSource {
    /// 创建一个尚未打开设备的摄像头来源
    pub fn new() -> Self {
        Self {
            camera: None,
            dims: None,
        }
    }
}

impl Default for CameraSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSource for CameraSource {
    async fn acquire(&mut self) -> Result<FrameDimensions, EngineError> {
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                Resolution::new(CAMERA_WIDTH, CAMERA_HEIGHT),
                FrameFormat::MJPEG,
                30,
            ),
        ));

        let mut camera = Camera::new(CameraIndex::Index(CAMERA_INDEX), requested)
            .map_err(|e| EngineError::Device(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| EngineError::Device(e.to_string()))?;

        // 流打开后才能确定协商出的原生分辨率
        let resolution = camera.resolution();
        let dims = FrameDimensions::new(resolution.width(), resolution.height());

        self.camera = Some(camera);
        self.dims = Some(dims);
        Ok(dims)
    }

    fn frame(&mut self) -> Result<DynamicImage, EngineError> {
        let camera = self
            .camera
            .as_mut()
            .ok_or_else(|| EngineError::Device("摄像头尚未打开".into()))?;

        let buffer = camera
            .frame()
            .map_err(|e| EngineError::Device(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| EngineError::Device(e.to_string()))?;

        Ok(DynamicImage::ImageRgb8(decoded))
    }

    fn release(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            let _ = camera.stop_stream();
        }
        self.dims = None;
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.release();
    }
}
