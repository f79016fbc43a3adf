use serde::{Deserialize, Serialize};
use std::fmt;

/// Natural pixel size of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Simplified `w:h` ratio, see [`reduce_aspect_ratio`].
    pub fn aspect_ratio(&self) -> String {
        reduce_aspect_ratio(self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Reduce `width:height` by their greatest common divisor.
///
/// A zero side yields `"0:0"`; callers reject such images before this point.
pub fn reduce_aspect_ratio(width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return "0:0".to_string();
    }
    let divisor = gcd(width, height);
    format!("{}:{}", width / divisor, height / divisor)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_aspect_ratio() {
        assert_eq!(reduce_aspect_ratio(1200, 400), "3:1");
        assert_eq!(reduce_aspect_ratio(1500, 300), "5:1");
        assert_eq!(reduce_aspect_ratio(1920, 1080), "16:9");
        assert_eq!(reduce_aspect_ratio(1201, 400), "1201:400");
        assert_eq!(reduce_aspect_ratio(0, 400), "0:0");
    }

    #[test]
    fn test_dimensions_helpers() {
        let dims = Dimensions::from((900, 300));
        assert_eq!(dims.aspect_ratio(), "3:1");
        assert_eq!(dims.to_string(), "900x300");
        assert!(!dims.is_empty());
        assert!(Dimensions::new(10, 0).is_empty());
    }
}
