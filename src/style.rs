// CSS text produced and parsed by the DOM scene.

/// Per-element transform state; written as one `transform` declaration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub y_percent: f32,
    pub scale: f32,
    pub rotate_x: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            rotate_x: 0.0,
        }
    }
}

impl Transform {
    /// Seed from a computed `transform` value.
    pub fn from_computed(css: &str) -> Self {
        match parse_matrix(css) {
            Some(m) => Self {
                x: m.tx,
                y: m.ty,
                scale: m.scale,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn css(&self) -> String {
        let mut out = format!("translate3d({}px, {}px, 0px)", self.x, self.y);
        if self.y_percent != 0.0 {
            out.push_str(&format!(" translateY({}%)", self.y_percent));
        }
        if self.scale != 1.0 {
            out.push_str(&format!(" scale({})", self.scale));
        }
        if self.rotate_x != 0.0 {
            out.push_str(&format!(" rotateX({}deg)", self.rotate_x));
        }
        out
    }
}

/// Translation and uniform scale pulled from a computed transform matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    pub tx: f32,
    pub ty: f32,
    pub scale: f32,
}

/// Parse `none`, `matrix(a, b, c, d, tx, ty)` or `matrix3d(...)`.
pub fn parse_matrix(css: &str) -> Option<Matrix> {
    let css = css.trim();
    if css == "none" || css.is_empty() {
        return Some(Matrix {
            tx: 0.0,
            ty: 0.0,
            scale: 1.0,
        });
    }
    let (body, is_3d) = if let Some(rest) = css.strip_prefix("matrix3d(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = css.strip_prefix("matrix(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };
    let values: Vec<f32> = body
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    let (a, b, tx, ty) = match (is_3d, values.len()) {
        (false, 6) => (values[0], values[1], values[4], values[5]),
        (true, 16) => (values[0], values[1], values[12], values[13]),
        _ => return None,
    };
    Some(Matrix {
        tx,
        ty,
        scale: (a * a + b * b).sqrt(),
    })
}

/// Parse a CSS number, ignoring a trailing unit such as `%` or `px`.
pub fn parse_number(text: &str) -> Option<f32> {
    let trimmed = text.trim();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || c == 'e'))
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Whole-number counter text.
pub fn counter_text(value: f32) -> String {
    format!("{}", value.round() as i64)
}

/// Words of `text`, each split into its characters, for per-char reveals.
pub fn split_words(text: &str) -> Vec<Vec<String>> {
    text.split_whitespace()
        .map(|word| word.chars().map(|c| c.to_string()).collect())
        .collect()
}
