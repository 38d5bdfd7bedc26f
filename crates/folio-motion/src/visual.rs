use std::fmt::Write;

/// Animatable style of a single element.
///
/// Offsets are in pixels, `x_percent` is relative to the element's own width,
/// `rotation` is in degrees. `width_percent` is only set for elements whose
/// width is animated (progress fills, skill bars).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub x_percent: f64,
    pub scale: f64,
    pub blur: f64,
    pub rotation: f64,
    pub width_percent: Option<f64>,
}

impl Default for Visual {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Visual {
    /// Fully visible, untransformed
    pub const IDENTITY: Visual = Visual {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        x_percent: 0.0,
        scale: 1.0,
        blur: 0.0,
        rotation: 0.0,
        width_percent: None,
    };

    pub const fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub const fn x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    pub const fn y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    pub const fn x_percent(mut self, x_percent: f64) -> Self {
        self.x_percent = x_percent;
        self
    }

    pub const fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub const fn blur(mut self, blur: f64) -> Self {
        self.blur = blur;
        self
    }

    pub const fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub const fn width(mut self, percent: f64) -> Self {
        self.width_percent = Some(percent);
        self
    }

    /// Interpolate towards `to`. `t` is not clamped so overshooting eases
    /// carry through to the style. At `t == 1` the result is exactly `to`.
    pub fn lerp(&self, to: &Visual, t: f64) -> Visual {
        let mix = |a: f64, b: f64| if t == 1.0 { b } else { a + (b - a) * t };
        let width_percent = match (self.width_percent, to.width_percent) {
            (Some(a), Some(b)) => Some(mix(a, b)),
            (a, b) => {
                if t >= 1.0 {
                    b
                } else {
                    a
                }
            }
        };
        Visual {
            opacity: mix(self.opacity, to.opacity),
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            x_percent: mix(self.x_percent, to.x_percent),
            scale: mix(self.scale, to.scale),
            blur: mix(self.blur, to.blur),
            rotation: mix(self.rotation, to.rotation),
            width_percent,
        }
    }

    /// Render as an inline `style` attribute value.
    ///
    /// Opacity is clamped to `[0, 1]` and blur to non-negative values since
    /// overshooting eases can push both out of the range CSS accepts.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let _ = write!(css, "opacity:{};", round3(self.opacity.clamp(0.0, 1.0)));

        let mut transform = String::new();
        if self.x != 0.0 || self.y != 0.0 {
            let _ = write!(transform, "translate({}px,{}px) ", round3(self.x), round3(self.y));
        }
        if self.x_percent != 0.0 {
            let _ = write!(transform, "translateX({}%) ", round3(self.x_percent));
        }
        if self.scale != 1.0 {
            let _ = write!(transform, "scale({}) ", round3(self.scale));
        }
        if self.rotation != 0.0 {
            let _ = write!(transform, "rotate({}deg) ", round3(self.rotation));
        }
        if transform.is_empty() {
            css.push_str("transform:none;");
        } else {
            let _ = write!(css, "transform:{};", transform.trim_end());
        }

        let blur = self.blur.max(0.0);
        if blur > 0.0 {
            let _ = write!(css, "filter:blur({}px);", round3(blur));
        }
        if let Some(width) = self.width_percent {
            let _ = write!(css, "width:{}%;", round3(width.max(0.0)));
        }
        css
    }
}

fn round3(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    // Avoid printing "-0"
    if r == 0.0 { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_css() {
        assert_eq!(Visual::IDENTITY.to_css(), "opacity:1;transform:none;");
    }

    #[test]
    fn test_hidden_css_includes_every_channel() {
        let hidden = Visual::IDENTITY.opacity(0.0).y(60.0).blur(10.0).scale(0.8);
        assert_eq!(
            hidden.to_css(),
            "opacity:0;transform:translate(0px,60px) scale(0.8);filter:blur(10px);"
        );
    }

    #[test]
    fn test_css_clamps_overshoot() {
        let v = Visual::IDENTITY.opacity(1.2).blur(-0.4);
        assert_eq!(v.to_css(), "opacity:1;transform:none;");
    }

    #[test]
    fn test_lerp_midpoint() {
        let from = Visual::IDENTITY.opacity(0.0).x(-100.0).rotation(-180.0);
        let mid = from.lerp(&Visual::IDENTITY, 0.5);
        assert_eq!(mid.opacity, 0.5);
        assert_eq!(mid.x, -50.0);
        assert_eq!(mid.rotation, -90.0);
    }

    #[test]
    fn test_lerp_width() {
        let from = Visual::IDENTITY.width(0.0);
        let to = Visual::IDENTITY.width(87.0);
        assert_eq!(from.lerp(&to, 0.5).width_percent, Some(43.5));
        assert_eq!(from.lerp(&to, 1.0).width_percent, Some(87.0));
    }

    #[test]
    fn test_width_css() {
        let v = Visual::IDENTITY.width(42.5);
        assert_eq!(v.to_css(), "opacity:1;transform:none;width:42.5%;");
    }

    #[test]
    fn test_x_percent_css() {
        let v = Visual::IDENTITY.x_percent(-250.0);
        assert_eq!(v.to_css(), "opacity:1;transform:translateX(-250%);");
    }
}
