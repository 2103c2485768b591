use image::{imageops::FilterType, DynamicImage, GenericImageView};
use ndarray::{Array, Array4};

use crate::config::INTERNAL_RESOLUTION_FACTOR;

/// 计算模型推理的内部分辨率
///
/// internalResolution取medium档，即原始帧边长的一半，至少为1。
/// 标签缓冲区将以该分辨率产出，绘制时再放大到显示尺寸。
///
/// # 参数
/// * `width` - 原始帧宽度
/// * `height` - 原始帧高度
///
/// # 返回值
/// 返回 (内部宽度, 内部高度)
pub fn internal_size(width: u32, height: u32) -> (u32, u32) {
    let w = ((width as f32 * INTERNAL_RESOLUTION_FACTOR).round() as u32).max(1);
    let h = ((height as f32 * INTERNAL_RESOLUTION_FACTOR).round() as u32).max(1);
    (w, h)
}

/// 调整图像大小以适应模型输入
///
/// 使用CatmullRom插值算法将图像调整为指定尺寸。
///
/// # 参数
/// * `img` - 原始图像
/// * `width` - 目标宽度
/// * `height` - 目标高度
///
/// # 返回值
/// 返回调整大小后的图像
pub fn resize_image(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    img.resize_exact(width, height, FilterType::CatmullRom)
}

/// 将图像转换为模型输入张量
///
/// 将图像转换为模型所需的四维张量格式，包括：
/// 1. 归一化像素值到[0, 1]范围
/// 2. 调整通道顺序为RGB
/// 3. 调整维度顺序为NCHW格式
///
/// # 参数
/// * `img` - 图像，尺寸应已调整为 (input_width, input_height)
/// * `input_height` - 输入图像高度
/// * `input_width` - 输入图像宽度
///
/// # 返回值
/// 返回形状为(1, 3, height, width)的四维张量，通道顺序为RGB，像素值范围[0, 1]
pub fn image_to_tensor(img: &DynamicImage, input_height: usize, input_width: usize) -> Array4<f32> {
    let mut tensor = Array::zeros((1, 3, input_height, input_width));

    // 逐像素归一化，三个通道分别写入对应的通道维度
    for (x, y, pixel) in img.pixels() {
        let (x, y) = (x as usize, y as usize);
        let [r, g, b, _] = pixel.0;
        tensor[[0, 0, y, x]] = (r as f32) / 255.0;
        tensor[[0, 1, y, x]] = (g as f32) / 255.0;
        tensor[[0, 2, y, x]] = (b as f32) / 255.0;
    }

    tensor
}
