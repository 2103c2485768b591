pub const STREAM_CAPACITY: usize = 16;  // 检测结果流的容量，小容量避免堆积过期结果
pub const PERSON_LABEL: u8 = 1;
pub const PERSON_CLASS_LABEL: &str = "person";

// 摄像头请求参数（前置摄像头，无音频）
pub const CAMERA_INDEX: u32 = 0;
pub const CAMERA_WIDTH: u32 = 1280;
pub const CAMERA_HEIGHT: u32 = 720;

// 分割模型的会话级固定配置
pub const FLIP_HORIZONTAL: bool = false;
pub const SEGMENTATION_THRESHOLD: f32 = 0.5;
// internalResolution = medium，即原始帧边长的一半
pub const INTERNAL_RESOLUTION_FACTOR: f32 = 0.5;

// 遮罩与标注框的绘制参数
pub const DEFAULT_MASK_OPACITY: f32 = 0.5;
pub const MASK_TINT_R: u8 = 0x00;
pub const MASK_TINT_G: u8 = 0xFF;
pub const MASK_TINT_B: u8 = 0x80;

// 帧循环节拍，与60Hz显示刷新对齐
pub const FRAME_INTERVAL_MS: u64 = 16;

// 快照上传端点
pub const SNAPSHOT_ENDPOINT: &str = "http://localhost:5000/save_snapshot";
