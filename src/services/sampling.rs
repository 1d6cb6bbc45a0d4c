//! 随机抽样工具
//!
//! 随机数生成器只在同步函数内部创建，不跨 `.await` 持有

use rand::seq::SliceRandom;

/// 无放回均匀抽取 `count` 个元素；元素不足时全部返回（顺序被打乱）
pub fn sample_without_replacement<T>(mut items: Vec<T>, count: usize) -> Vec<T> {
    let mut rng = rand::rng();
    items.shuffle(&mut rng);
    items.truncate(count);
    items
}

/// 均匀随机打乱
pub fn shuffle<T>(items: &mut [T]) {
    let mut rng = rand::rng();
    items.shuffle(&mut rng);
}

/// 公平的抛硬币
pub fn coin_flip() -> bool {
    rand::random::<bool>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_is_subset_without_repeats() {
        let items: Vec<u32> = (0..50).collect();
        let sample = sample_without_replacement(items, 10);
        assert_eq!(sample.len(), 10);
        let unique: HashSet<_> = sample.iter().collect();
        assert_eq!(unique.len(), 10);
        assert!(sample.iter().all(|x| *x < 50));
    }

    #[test]
    fn test_sample_larger_than_population() {
        let sample = sample_without_replacement(vec!["a", "b"], 5);
        assert_eq!(sample.len(), 2);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut items = vec![1, 2, 3, 4];
        shuffle(&mut items);
        items.sort();
        assert_eq!(items, vec![1, 2, 3, 4]);
    }
}
