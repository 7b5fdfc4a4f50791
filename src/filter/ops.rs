/// A single color adjustment, parameterized the way CSS filter functions are.
///
/// Amounts are fractions (`1.0` is `100%`), hue rotation is in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterOp {
    Sepia(f64),
    HueRotate(f64),
    Brightness(f64),
    Contrast(f64),
    Saturate(f64),
    Invert(f64),
}

impl FilterOp {
    /// Clamp the amount into the domain the CSS function accepts.
    ///
    /// `sepia` and `invert` saturate at 100%; the linear adjustments have no upper bound but
    /// cannot go negative.
    pub fn normalized(self) -> Self {
        fn non_negative(v: f64) -> f64 {
            if v.is_nan() { 0.0 } else { v.max(0.0) }
        }
        fn unit(v: f64) -> f64 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        match self {
            Self::Sepia(a) => Self::Sepia(unit(a)),
            Self::HueRotate(deg) => Self::HueRotate(if deg.is_finite() {
                deg.rem_euclid(360.0)
            } else {
                0.0
            }),
            Self::Brightness(a) => Self::Brightness(non_negative(a)),
            Self::Contrast(a) => Self::Contrast(non_negative(a)),
            Self::Saturate(a) => Self::Saturate(non_negative(a)),
            Self::Invert(a) => Self::Invert(unit(a)),
        }
    }

    pub fn is_identity(self) -> bool {
        match self.normalized() {
            Self::Sepia(a) | Self::Invert(a) => a == 0.0,
            Self::HueRotate(deg) => deg == 0.0,
            Self::Brightness(a) | Self::Contrast(a) | Self::Saturate(a) => a == 1.0,
        }
    }

    /// CSS filter function text, e.g. `hue-rotate(90deg)`.
    pub fn to_css(self) -> String {
        match self.normalized() {
            Self::Sepia(a) => format!("sepia({}%)", fmt_num(a * 100.0)),
            Self::HueRotate(deg) => format!("hue-rotate({}deg)", fmt_num(deg)),
            Self::Brightness(a) => format!("brightness({}%)", fmt_num(a * 100.0)),
            Self::Contrast(a) => format!("contrast({}%)", fmt_num(a * 100.0)),
            Self::Saturate(a) => format!("saturate({}%)", fmt_num(a * 100.0)),
            Self::Invert(a) => format!("invert({}%)", fmt_num(a * 100.0)),
        }
    }

    /// The 5x4 matrix the Filter Effects specification defines for this function.
    pub fn color_matrix(self) -> ColorMatrix {
        match self.normalized() {
            Self::Sepia(a) => {
                let k = (1.0 - a) as f32;
                ColorMatrix::rgb([
                    [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
                    [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
                    [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
                ])
            }
            Self::HueRotate(deg) => {
                let (sin, cos) = deg.to_radians().sin_cos();
                let (s, c) = (sin as f32, cos as f32);
                ColorMatrix::rgb([
                    [
                        0.213 + c * 0.787 - s * 0.213,
                        0.715 - c * 0.715 - s * 0.715,
                        0.072 - c * 0.072 + s * 0.928,
                    ],
                    [
                        0.213 - c * 0.213 + s * 0.143,
                        0.715 + c * 0.285 + s * 0.140,
                        0.072 - c * 0.072 - s * 0.283,
                    ],
                    [
                        0.213 - c * 0.213 - s * 0.787,
                        0.715 - c * 0.715 + s * 0.715,
                        0.072 + c * 0.928 + s * 0.072,
                    ],
                ])
            }
            Self::Brightness(a) => ColorMatrix::linear(a as f32, 0.0),
            Self::Contrast(a) => {
                let a = a as f32;
                ColorMatrix::linear(a, 0.5 - 0.5 * a)
            }
            Self::Saturate(a) => {
                let s = a as f32;
                ColorMatrix::rgb([
                    [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
                ])
            }
            Self::Invert(a) => {
                let a = a as f32;
                ColorMatrix::linear(1.0 - 2.0 * a, a)
            }
        }
    }
}

fn fmt_num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Row-major 5x4 color matrix over straight-alpha, normalized RGBA.
///
/// Row `i` computes channel `i` as `m[5i]*r + m[5i+1]*g + m[5i+2]*b + m[5i+3]*a + m[5i+4]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    /// 3x3 RGB mixing block; alpha passes through.
    fn rgb(m: [[f32; 3]; 3]) -> Self {
        Self([
            m[0][0], m[0][1], m[0][2], 0.0, 0.0, //
            m[1][0], m[1][1], m[1][2], 0.0, 0.0, //
            m[2][0], m[2][1], m[2][2], 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Per-channel `slope * c + intercept` on RGB; alpha passes through.
    fn linear(slope: f32, intercept: f32) -> Self {
        Self([
            slope, 0.0, 0.0, 0.0, intercept, //
            0.0, slope, 0.0, 0.0, intercept, //
            0.0, 0.0, slope, 0.0, intercept, //
            0.0, 0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// Apply to a straight-alpha pixel; every output channel is clamped to `[0, 1]`.
    pub fn apply(&self, px: [f32; 4]) -> [f32; 4] {
        let m = &self.0;
        let [r, g, b, a] = px;
        let row = |i: usize| -> f32 {
            let o = i * 5;
            (m[o] * r + m[o + 1] * g + m[o + 2] * b + m[o + 3] * a + m[o + 4]).clamp(0.0, 1.0)
        };
        [row(0), row(1), row(2), row(3)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/ops.rs"]
mod tests;
