use std::collections::HashMap;

use plotters::style::{RGBColor, BLACK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDash {
    Solid,
    Dashed,
}

/// Color and line style of one method's series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodStyle {
    pub color: RGBColor,
    pub dash: LineDash,
}

impl MethodStyle {
    pub const fn solid(color: RGBColor) -> Self {
        MethodStyle {
            color,
            dash: LineDash::Solid,
        }
    }
}

impl Default for MethodStyle {
    fn default() -> Self {
        MethodStyle::solid(BLACK)
    }
}

/// Method name -> style, with a fallback for methods it does not know.
#[derive(Debug, Clone)]
pub struct StyleMap {
    styles: HashMap<String, MethodStyle>,
    fallback: MethodStyle,
}

impl StyleMap {
    pub fn new(fallback: MethodStyle) -> Self {
        StyleMap {
            styles: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, method: &str, style: MethodStyle) -> Self {
        self.styles.insert(method.to_string(), style);
        self
    }

    pub fn contains(&self, method: &str) -> bool {
        self.styles.contains_key(method)
    }

    /// Style for `method`, the fallback style if the method is unknown.
    pub fn style_for(&self, method: &str) -> MethodStyle {
        self.styles.get(method).copied().unwrap_or(self.fallback)
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        StyleMap::new(MethodStyle::default())
            .with("STC", MethodStyle::solid(RGBColor(255, 0, 0)))
            .with("PSTC", MethodStyle::solid(RGBColor(0, 255, 0)))
            .with("ASTC4", MethodStyle::solid(RGBColor(0, 0, 255)))
    }
}
