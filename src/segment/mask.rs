use crate::config::PERSON_LABEL;

/// 显示尺寸结构
///
/// 摄像头元数据就绪后确定一次，之后由渲染器和归约器共享（只读），
/// 保证所有下游缓冲区与视频尺寸一致。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameDimensions {
    /// 宽度（像素）
    pub width: u32,
    /// 高度（像素）
    pub height: u32,
}

impl FrameDimensions {
    /// 创建一个新的尺寸结构
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// 逐像素标签缓冲区
///
/// 分割模型每个检测周期产出一份，长度为 width*height，每个像素一个
/// 整数标签（person = 1，背景 = 0）。缓冲区自身的分辨率可能与显示
/// 分辨率不同，绘制时需要缩放。创建后不再修改，只读。
#[derive(Debug, Clone)]
pub struct LabelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl LabelBuffer {
    /// 创建一个新的标签缓冲区
    ///
    /// # 参数
    /// * `width` - 缓冲区宽度（像素），必须为正
    /// * `height` - 缓冲区高度（像素），必须为正
    /// * `data` - 逐像素标签，长度必须等于 width*height
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert!(width > 0 && height > 0, "标签缓冲区尺寸必须为正");
        assert_eq!(data.len(), width * height, "标签数据长度与尺寸不符");
        Self { width, height, data }
    }

    /// 缓冲区宽度
    pub fn width(&self) -> usize {
        self.width
    }

    /// 缓冲区高度
    pub fn height(&self) -> usize {
        self.height
    }

    /// 读取指定位置的标签
    pub fn label(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// 指定位置是否为person像素
    pub fn is_person(&self, x: usize, y: usize) -> bool {
        self.label(x, y) == PERSON_LABEL
    }

    /// 获取底层标签切片
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// 边界框结构
///
/// 轴对齐矩形，坐标以产生它的标签缓冲区像素为单位，宽高恒为正。
/// 每个检测周期至多产生一个实例，由渲染器立即消费后丢弃。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBox {
    /// 左上角x坐标
    pub x: u32,
    /// 左上角y坐标
    pub y: u32,
    /// 宽度
    pub w: u32,
    /// 高度
    pub h: u32,
}

impl BoundingBox {
    /// 创建一个新的边界框
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// 计算边界框的面积
    pub fn area(&self) -> u32 {
        self.w * self.h
    }

    /// 检查边界框是否有效（宽度和高度都大于0）
    pub fn is_valid(&self) -> bool {
        self.w > 0 && self.h > 0
    }

    /// 将标签缓冲区坐标换算到显示坐标
    ///
    /// 渲染器只负责缩放遮罩图像，不缩放框坐标，因此调用者在
    /// `paint_box` 之前必须先做这一步换算。
    ///
    /// # 参数
    /// * `buffer` - 产生该框的标签缓冲区
    /// * `display` - 目标显示尺寸
    ///
    /// # 返回值
    /// 返回换算到显示坐标系的边界框
    pub fn to_display(&self, buffer: &LabelBuffer, display: FrameDimensions) -> BoundingBox {
        let sx = display.width as f32 / buffer.width() as f32;
        let sy = display.height as f32 / buffer.height() as f32;
        BoundingBox {
            x: (self.x as f32 * sx).round() as u32,
            y: (self.y as f32 * sy).round() as u32,
            w: ((self.w as f32 * sx).round() as u32).max(1),
            h: ((self.h as f32 * sy).round() as u32).max(1),
        }
    }
}

/// 将标签缓冲区归约为边界框序列
///
/// 对全部 width*height 个像素做一次线性扫描，跟踪person像素的
/// minX/minY/maxX/maxY。没有person像素时返回空序列，否则返回
/// 恰好一个闭区间 [minX..maxX] x [minY..maxY] 的框。
/// 复杂度 O(width*height)，额外空间 O(1)。
///
/// 已知限制：不做连通分量分析，同一帧中多个不相交的person区域会
/// 合并成一个横跨全部区域的框。这是有意保留的简化；需要多人框时
/// 应另行扩展连通分量标记，而不是修改本函数。
///
/// # 参数
/// * `buffer` - 待归约的标签缓冲区
///
/// # 返回值
/// 返回零个或一个边界框（标签缓冲区坐标系）
pub fn reduce(buffer: &LabelBuffer) -> Vec<BoundingBox> {
    let (w, h) = (buffer.width(), buffer.height());
    let mut min_x = w;
    let mut min_y = h;
    let mut max_x = 0usize;
    let mut max_y = 0usize;
    let mut found = false;

    for y in 0..h {
        for x in 0..w {
            if buffer.is_person(x, y) {
                found = true;
                if x < min_x {
                    min_x = x;
                }
                if x > max_x {
                    max_x = x;
                }
                if y < min_y {
                    min_y = y;
                }
                if y > max_y {
                    max_y = y;
                }
            }
        }
    }

    if !found {
        return Vec::new();
    }

    vec![BoundingBox::new(
        min_x as u32,
        min_y as u32,
        (max_x - min_x + 1) as u32,
        (max_y - min_y + 1) as u32,
    )]
}
