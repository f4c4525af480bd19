use std::collections::HashMap;
use std::sync::Mutex;

use ordered_float::OrderedFloat;

use super::{TextBounds, TextMeasurementConfig, TextMeasurer};
use crate::types::{FontStyle, FontWeight};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    font: String,
    font_size: OrderedFloat<f32>,
    font_weight: FontWeight,
    font_style: FontStyle,
}

impl CacheKey {
    fn from_config(config: &TextMeasurementConfig) -> Self {
        Self {
            text: config.text.to_string(),
            font: config.font.to_string(),
            font_size: OrderedFloat(config.font_size),
            font_weight: *config.font_weight,
            font_style: *config.font_style,
        }
    }
}

/// Memoizes another measurer by (text, font, size, weight, style)
pub struct CachedTextMeasurer<M: TextMeasurer> {
    inner: M,
    cache: Mutex<HashMap<CacheKey, TextBounds>>,
}

impl<M: TextMeasurer> CachedTextMeasurer<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedTextMeasurer<M> {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        let key = CacheKey::from_config(config);
        let Ok(mut cache) = self.cache.lock() else {
            return self.inner.measure_text_bounds(config);
        };
        *cache
            .entry(key)
            .or_insert_with(|| self.inner.measure_text_bounds(config))
    }
}
