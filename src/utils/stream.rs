use crate::config::STREAM_CAPACITY;

/// 固定容量的单向数据流
///
/// 一个简单的环形队列：write在队尾追加，read从队头弹出。容量
/// 固定为 `STREAM_CAPACITY`，写满时返回错误而不是覆盖，由调用方
/// 决定丢弃策略。检测循环每个周期把边界框序列写入该流，UI侧
/// 按自己的节奏读取。
pub struct Stream<T> {
    pool: Vec<Option<T>>,
    read_index: usize,
    write_index: usize,
}

impl<T> Stream<T> {
    /// 创建一个新的空数据流
    pub fn new() -> Self {
        let mut pool = Vec::with_capacity(STREAM_CAPACITY);
        pool.resize_with(STREAM_CAPACITY, || None);

        Self {
            pool,
            read_index: 0,
            write_index: 0,
        }
    }

    /// 向流中写入一个元素
    ///
    /// # 错误处理
    /// 流已满时返回Err，元素被丢弃
    pub fn write(&mut self, item: T) -> Result<(), &'static str> {
        let next_index = (self.write_index + 1) % STREAM_CAPACITY;
        if next_index == self.read_index {
            return Err("缓冲区已满");
        }

        self.pool[self.write_index] = Some(item);
        self.write_index = next_index;
        Ok(())
    }

    /// 从流中读取最早写入的元素
    ///
    /// # 返回值
    /// 流为空时返回None
    pub fn read(&mut self) -> Option<T> {
        if self.read_index == self.write_index {
            return None;
        }

        let item = self.pool[self.read_index].take();
        self.read_index = (self.read_index + 1) % STREAM_CAPACITY;
        item
    }
}

impl<T> Default for Stream<T> {
    fn default() -> Self {
        Self::new()
    }
}
