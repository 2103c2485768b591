use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tokio::task::JoinHandle;

use crate::config::FRAME_INTERVAL_MS;
use crate::error::EngineError;
use crate::segment::capture::{CameraSource, FrameSource};
use crate::segment::core::Session;
use crate::segment::infer::{OnnxSegmenter, Segmenter};
use crate::segment::mask::BoundingBox;
use crate::segment::model::load_model;
use crate::segment::profile::QualityProfile;
use crate::segment::snapshot::{compose, encode_png, upload};
use crate::utils::stream::Stream;

/// 实时人体分割覆盖引擎
///
/// 顶层的会话管理器：负责启动/停止帧循环、维护唯一的检测会话，
/// 并在请求时合成上传快照。状态机只有两个状态：
///
/// - 停止 → 运行：start请求依次打开帧来源（挂起等待摄像头就绪）、
///   置位运行标志、派生检测循环任务
/// - 运行 → 停止：stop请求清除运行标志，等待循环任务退出，再清空
///   显示表面并释放帧来源
///
/// 停止是初始态也是唯一的终止态，可以任意多次重新进入运行态。
/// 循环每次迭代开头检查运行标志；在途的分类调用不会被打断，其
/// 结果在标志清除后直接丢弃。
pub struct Monitor<F, S> {
    /// 公用检测结果流，由上级读取
    pub bounds_stream: Arc<Mutex<Stream<Vec<BoundingBox>>>>,

    session: Arc<AsyncMutex<Session<F, S>>>,
    running: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
    client: reqwest::Client,
}

impl<F, S> Monitor<F, S>
where
    F: FrameSource + 'static,
    S: Segmenter + 'static,
{
    /// 创建一个新的引擎实例
    ///
    /// # 参数
    /// * `source` - 帧来源（真实摄像头或测试替身）
    /// * `segmenter` - 分割适配器
    pub fn new(source: F, segmenter: S) -> Self {
        let bounds_stream = Arc::new(Mutex::new(Stream::new()));
        let running = Arc::new(AtomicBool::new(false));
        let session = Session::new(
            source,
            segmenter,
            Arc::clone(&bounds_stream),
            Arc::clone(&running),
        );

        Self {
            bounds_stream,
            session: Arc::new(AsyncMutex::new(session)),
            running,
            task: None,
            client: reqwest::Client::new(),
        }
    }

    /// 启动检测循环
    ///
    /// 先打开帧来源（挂起等待摄像头上报分辨率），成功后置位运行
    /// 标志并派生循环任务。已经在运行时不做任何事。
    ///
    /// # 错误处理
    /// 摄像头不可用时返回 `EngineError::Device`，循环不会启动
    pub async fn start(&mut self) -> Result<(), EngineError> {
        if self.running.load(Ordering::Acquire) {
            return Ok(());
        }

        {
            let mut session = self.session.lock().await;
            session.open().await?;
        }

        self.running.store(true, Ordering::Release);

        let session = Arc::clone(&self.session);
        let running = Arc::clone(&self.running);
        self.task = Some(tokio::spawn(async move {
            // 每次迭代开头检查取消信号，循环之间让出控制权一个
            // 显示刷新节拍，推理耗时超过节拍时检测率自动下降
            while running.load(Ordering::Acquire) {
                {
                    let mut session = session.lock().await;
                    if let Err(e) = session.cycle().await {
                        // 单周期推理失败不会使循环崩溃
                        eprintln!("{}", e);
                    }
                }
                tokio::time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)).await;
            }
        }));

        Ok(())
    }

    /// 停止检测循环
    ///
    /// 清除运行标志并等待循环任务退出，然后清空显示表面、释放
    /// 帧来源。在途的分类调用允许完成，其结果不会被绘制。
    pub async fn stop(&mut self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }

        if let Some(task) = self.task.take() {
            let _ = task.await;
        }

        let mut session = self.session.lock().await;
        session.shutdown();
    }

    /// 检查引擎是否正在运行
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// 合成并上传快照
    ///
    /// 把最近一次绘制周期的视频帧与当前覆盖层合成为一张PNG
    /// （视频在下、覆盖层在上），通过单次请求发送到存储后端。
    /// 上传失败不重试，也不影响检测循环的状态。
    ///
    /// # 参数
    /// * `endpoint` - 存储后端地址（通常为 `config::SNAPSHOT_ENDPOINT`）
    ///
    /// # 返回值
    /// 返回服务端分配的文件名
    ///
    /// # 错误处理
    /// 引擎未运行、编码失败或上传失败时返回 `EngineError::Upload`
    pub async fn snapshot(&self, endpoint: &str) -> Result<String, EngineError> {
        let png = {
            let session = self.session.lock().await;
            let (Some(frame), Some(renderer)) = (session.last_frame(), session.renderer()) else {
                return Err(EngineError::Upload("引擎未在运行，没有可合成的画面".into()));
            };
            encode_png(&compose(frame, renderer))?
        };

        upload(&self.client, endpoint, &png).await
    }

    /// 读取一份已发布的检测结果
    ///
    /// 流为空时返回None。
    pub fn read_bounds(&self) -> Option<Vec<BoundingBox>> {
        self.bounds_stream.lock().unwrap().read()
    }

    /// 获取会话的共享引用，供测试检查内部状态
    pub fn session(&self) -> Arc<AsyncMutex<Session<F, S>>> {
        Arc::clone(&self.session)
    }
}

/// 创建接入真实摄像头和ONNX模型的引擎
///
/// 按档位加载分割模型（挂起等待加载完成），随后摄像头在start
/// 时打开。加载失败时引擎不会被创建。
///
/// # 参数
/// * `profile` - 质量/速度档位
///
/// # 示例
///
/// ```no_run
/// use persight::{live_monitor, QualityProfile};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), persight::EngineError> {
/// let mut monitor = live_monitor(QualityProfile::Balanced).await?;
/// monitor.start().await?;
/// # Ok(())
/// # }
/// ```
pub async fn live_monitor(
    profile: QualityProfile,
) -> Result<Monitor<CameraSource, OnnxSegmenter>, EngineError> {
    let handle = load_model(profile).await?;
    Ok(Monitor::new(CameraSource::new(), OnnxSegmenter::new(handle)))
}
