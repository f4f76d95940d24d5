//! Style pool for deduplication

use super::CellStyle;
use ahash::AHashMap;

/// Deduplicated index of resolved styles
///
/// Renderers resolve one effective style per cell; most cells share a
/// handful of distinct styles. The pool stores each distinct style once and
/// hands out stable indices. Index 0 is always the empty style.
#[derive(Debug)]
pub struct StylePool {
    /// All unique styles (index 0 is the empty style)
    styles: Vec<CellStyle>,
    /// Fast lookup for deduplication
    index_map: AHashMap<CellStyle, u32>,
}

impl StylePool {
    /// Create a new pool holding only the empty style
    pub fn new() -> Self {
        let mut pool = Self {
            styles: Vec::with_capacity(16),
            index_map: AHashMap::with_capacity(16),
        };

        let default = CellStyle::default();
        pool.styles.push(default.clone());
        pool.index_map.insert(default, 0);

        pool
    }

    /// Get or create a style, returning its index
    pub fn get_or_insert(&mut self, style: CellStyle) -> u32 {
        if let Some(&idx) = self.index_map.get(&style) {
            return idx;
        }

        let idx = self.styles.len() as u32;
        self.index_map.insert(style.clone(), idx);
        self.styles.push(style);
        idx
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&CellStyle> {
        self.styles.get(index as usize)
    }

    /// Number of distinct styles, including the empty style
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the pool holds nothing but the empty style
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }

    /// Iterate over all styles with their indices
    pub fn iter(&self) -> impl Iterator<Item = (u32, &CellStyle)> {
        self.styles.iter().enumerate().map(|(i, s)| (i as u32, s))
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_default_style() {
        let pool = StylePool::new();
        assert_eq!(pool.len(), 1);
        assert!(pool.is_empty());
        assert_eq!(pool.get(0), Some(&CellStyle::default()));
    }

    #[test]
    fn test_deduplication() {
        let mut pool = StylePool::new();

        let idx1 = pool.get_or_insert(CellStyle::new().bold(true));
        let idx2 = pool.get_or_insert(CellStyle::new().bold(true));
        let idx3 = pool.get_or_insert(CellStyle::new().italic(true));

        assert_eq!(idx1, idx2);
        assert_ne!(idx1, idx3);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get_or_insert(CellStyle::new()), 0);
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let mut pool = StylePool::new();
        let style = CellStyle::new().background(Color::RED);
        pool.get_or_insert(style.clone());

        let collected: Vec<_> = pool.iter().map(|(i, s)| (i, s.clone())).collect();
        assert_eq!(collected, vec![(0, CellStyle::new()), (1, style)]);
    }
}
