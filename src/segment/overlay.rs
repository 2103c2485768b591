use font_kit::family_name::FamilyName;
use font_kit::font::Font;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;
use image::DynamicImage;
use raqote::{
    DrawOptions, DrawTarget, LineJoin, PathBuilder, Point, SolidSource, Source, StrokeStyle,
};

use crate::config::{MASK_TINT_B, MASK_TINT_G, MASK_TINT_R};
use crate::segment::mask::{BoundingBox, FrameDimensions, LabelBuffer};

/// 覆盖层渲染器
///
/// 持有一张与视频尺寸一致的显示表面，提供清除、遮罩绘制和
/// 标注框绘制三个操作。每个完整的渲染周期应当先clear，再
/// paint_mask，最后对每个框调用paint_box。
///
/// 两个绘制操作都是幂等的：在刚清除的表面上用相同输入重复
/// 绘制，结果完全一致。
pub struct OverlayRenderer {
    dt: DrawTarget,
    dims: FrameDimensions,
    font: Option<Font>,
}

// 渲染器只被持有它的会话独占访问（会话位于互斥锁之后），跨线程
// 移动时不存在并发使用；raqote/freetype的内部裸指针仅在此前提下安全
unsafe impl Send for OverlayRenderer {}

impl OverlayRenderer {
    /// 创建一个新的渲染器
    ///
    /// # 参数
    /// * `dims` - 显示尺寸，应与摄像头上报的原生分辨率一致
    pub fn new(dims: FrameDimensions) -> Self {
        // 标签字体从系统字体中解析；解析失败时跳过文字绘制，
        // 框线仍然正常绘制
        let font = SystemSource::new()
            .select_best_match(&[FamilyName::SansSerif], &Properties::new())
            .ok()
            .and_then(|handle| handle.load().ok());

        Self {
            dt: DrawTarget::new(dims.width as i32, dims.height as i32),
            dims,
            font,
        }
    }

    /// 显示尺寸
    pub fn dimensions(&self) -> FrameDimensions {
        self.dims
    }

    /// 清除整个显示表面（恢复为全透明）
    pub fn clear(&mut self) {
        self.dt.clear(SolidSource {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        });
    }

    /// 绘制半透明的分割遮罩
    ///
    /// 先在标签缓冲区自身的分辨率下构建RGBA像素缓冲：背景像素
    /// alpha为0，person像素取固定色调并把alpha设为 round(255*opacity)；
    /// 然后把这张图整体缩放绘制到显示表面，恰好铺满。标签缓冲区的
    /// 分辨率通常比显示分辨率粗，缩放由绘图后端完成。
    ///
    /// # 参数
    /// * `buffer` - 标签缓冲区
    /// * `opacity` - person像素的不透明度 (0.0 - 1.0)
    pub fn paint_mask(&mut self, buffer: &LabelBuffer, opacity: f32) {
        let alpha = (255.0 * opacity).round() as u32;

        // raqote使用预乘alpha的ARGB像素
        let person = {
            let r = (MASK_TINT_R as u32 * alpha) / 255;
            let g = (MASK_TINT_G as u32 * alpha) / 255;
            let b = (MASK_TINT_B as u32 * alpha) / 255;
            (alpha << 24) | (r << 16) | (g << 8) | b
        };

        let pixels: Vec<u32> = buffer
            .as_slice()
            .iter()
            .map(|&label| if label == crate::config::PERSON_LABEL { person } else { 0 })
            .collect();

        let img = raqote::Image {
            width: buffer.width() as i32,
            height: buffer.height() as i32,
            data: &pixels,
        };

        self.dt.draw_image_with_size_at(
            self.dims.width as f32,
            self.dims.height as f32,
            0.0,
            0.0,
            &img,
            &DrawOptions::new(),
        );
    }

    /// 绘制边界框和文字标注
    ///
    /// 框坐标必须已经换算到显示坐标系（见 `BoundingBox::to_display`），
    /// 本方法不做坐标缩放。线宽和字号随显示尺寸成比例，保证不同
    /// 分辨率下标注清晰可读。
    ///
    /// # 参数
    /// * `bbox` - 显示坐标系下的边界框
    /// * `label` - 标注文字（通常为"person"）
    pub fn paint_box(&mut self, bbox: &BoundingBox, label: &str) {
        let max_dim = self.dims.width.max(self.dims.height) as f32;
        let stroke_width = (max_dim / 400.0).round().max(2.0);

        let mut pb = PathBuilder::new();
        pb.rect(bbox.x as f32, bbox.y as f32, bbox.w as f32, bbox.h as f32);
        let path = pb.finish();

        let color = SolidSource {
            r: MASK_TINT_R,
            g: MASK_TINT_G,
            b: MASK_TINT_B,
            a: 0xFF,
        };

        self.dt.stroke(
            &path,
            &Source::Solid(color),
            &StrokeStyle {
                join: LineJoin::Round,
                width: stroke_width,
                ..StrokeStyle::default()
            },
            &DrawOptions::default(),
        );

        if let Some(font) = &self.font {
            let point_size = 12.0 + (self.dims.width as f32 / 200.0).round();
            self.dt.draw_text(
                font,
                point_size,
                label,
                Point::new(bbox.x as f32 + 4.0, bbox.y as f32 + 14.0),
                &Source::Solid(color),
                &DrawOptions::default(),
            );
        }
    }

    /// 获取表面像素的只读视图（预乘ARGB）
    pub fn pixels(&self) -> &[u32] {
        self.dt.get_data()
    }

    /// 检查表面是否为空（全透明）
    pub fn is_blank(&self) -> bool {
        self.pixels().iter().all(|&p| p == 0)
    }

    /// 把当前表面转换为RGBA图像
    ///
    /// 供快照合成和测试使用。
    pub fn to_image(&self) -> DynamicImage {
        let pixels: Vec<u8> = self
            .dt
            .get_data()
            .iter()
            .flat_map(|&pixel| {
                let bytes = pixel.to_le_bytes();
                [bytes[2], bytes[1], bytes[0], bytes[3]] // BGRA to RGBA
            })
            .collect();

        DynamicImage::ImageRgba8(
            image::ImageBuffer::from_raw(self.dims.width, self.dims.height, pixels)
                .expect("Failed to create image from rendered data"),
        )
    }
}
