//! Operator family diagram: four toggles and two sliders mapped onto the
//! look of a single animated orb.

pub const DISTORTION_RANGE: (f64, f64) = (0.0, 100.0);
pub const SPEED_RANGE: (f64, f64) = (10.0, 150.0);

/// Upper bound on the derived shape distortion (25 from G plus 40 from the slider).
pub const MAX_DISTORTION: f64 = 65.0;
/// Below this the orb stays circular.
pub const MORPH_EPSILON: f64 = 5.0;
pub const MIN_SPEED_MULTIPLIER: f64 = 0.1;

const UNITY_SPEED: f64 = 50.0;
const MORPH_PERIOD_SECS: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    E,
    C,
    X,
    G,
}

impl Operator {
    /// Evaluation order. A later operator overrides fields set by an earlier one.
    pub const ORDER: [Operator; 4] = [Operator::E, Operator::C, Operator::X, Operator::G];

    pub fn label(self) -> &'static str {
        match self {
            Operator::E => "E",
            Operator::C => "C",
            Operator::X => "X",
            Operator::G => "G",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            Operator::E => "energy",
            Operator::C => "coherence",
            Operator::X => "exchange",
            Operator::G => "gravity",
        }
    }

    pub fn from_label(label: &str) -> Option<Operator> {
        Operator::ORDER
            .into_iter()
            .find(|op| op.label().eq_ignore_ascii_case(label.trim()))
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Cyan,
    Yellow,
    Red,
    Purple,
}

impl Color {
    pub fn css(self) -> &'static str {
        match self {
            Color::Cyan => "#22d3ee",
            Color::Yellow => "#facc15",
            Color::Red => "#ef4444",
            Color::Purple => "#a855f7",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glow {
    Low,
    /// Red-tinted halo.
    High,
}

impl Glow {
    pub fn box_shadow(self, color: Color) -> String {
        match self {
            Glow::Low => format!("0 0 12px {}66", color.css()),
            Glow::High => "0 0 36px 8px rgba(239, 68, 68, 0.75)".to_string(),
        }
    }
}

/// Eight border-radius percentages: four horizontal radii then four vertical.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlobFrame(pub [f64; 8]);

impl BlobFrame {
    pub const CIRCLE: BlobFrame = BlobFrame([50.0; 8]);

    pub fn to_css(&self) -> String {
        let r = &self.0;
        format!(
            "{:.1}% {:.1}% {:.1}% {:.1}% / {:.1}% {:.1}% {:.1}% {:.1}%",
            r[0], r[1], r[2], r[3], r[4], r[5], r[6], r[7]
        )
    }

    fn lerp(&self, other: &BlobFrame, t: f64) -> BlobFrame {
        let mut out = [0.0; 8];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.0[i] + (other.0[i] - self.0[i]) * t;
        }
        BlobFrame(out)
    }
}

// Per-corner deviation from a circle for each morph keyframe, in [-1, 1].
const MORPH_PATTERN: [[f64; 8]; 5] = [
    [0.6, -0.4, 0.3, -0.6, 0.5, -0.3, 0.6, -0.5],
    [-0.3, 0.7, -0.5, 0.4, -0.6, 0.5, -0.2, 0.4],
    [0.5, 0.2, -0.7, 0.6, 0.3, -0.6, 0.4, -0.2],
    [-0.6, 0.4, 0.6, -0.3, -0.4, 0.7, -0.5, 0.3],
    [0.2, -0.7, 0.4, 0.5, -0.5, 0.2, 0.7, -0.6],
];

/// Everything the renderer needs to draw the orb for one set of inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualDescriptor {
    pub scale: f64,
    pub rotation_deg: f64,
    pub color: Color,
    pub glow: Glow,
    pub distortion: f64,
    pub speed_multiplier: f64,
}

impl VisualDescriptor {
    fn base() -> Self {
        Self {
            scale: 1.0,
            rotation_deg: 0.0,
            color: Color::Cyan,
            glow: Glow::Low,
            distortion: 0.0,
            speed_multiplier: 1.0,
        }
    }

    pub fn morphing(&self) -> bool {
        self.distortion > MORPH_EPSILON
    }

    pub fn morph_period(&self) -> f64 {
        MORPH_PERIOD_SECS / self.speed_multiplier
    }

    /// The five keyframes of the morph cycle, or `None` while the orb is circular.
    pub fn keyframes(&self) -> Option<[BlobFrame; 5]> {
        if !self.morphing() {
            return None;
        }
        let depth = self.distortion * 0.5;
        Some(MORPH_PATTERN.map(|pattern| BlobFrame(pattern.map(|d| 50.0 + d * depth))))
    }

    /// Orb outline `t_secs` into the animation.
    pub fn shape_at(&self, t_secs: f64) -> BlobFrame {
        let Some(frames) = self.keyframes() else {
            return BlobFrame::CIRCLE;
        };
        let phase = (t_secs / self.morph_period()).rem_euclid(1.0) * frames.len() as f64;
        let k = (phase.floor() as usize).min(frames.len() - 1);
        frames[k].lerp(&frames[(k + 1) % frames.len()], phase - k as f64)
    }

    pub fn transform_css(&self) -> String {
        format!("scale({:.3}) rotate({:.2}deg)", self.scale, self.rotation_deg)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperatorState {
    toggles: [bool; 4],
    distortion: f64,
    speed: f64,
}

impl OperatorState {
    pub fn new(distortion: f64, speed: f64) -> Self {
        let mut state = Self {
            toggles: [false; 4],
            distortion: DISTORTION_RANGE.0,
            speed: UNITY_SPEED,
        };
        state.set_distortion(distortion);
        state.set_speed(speed);
        state
    }

    pub fn is_active(&self, op: Operator) -> bool {
        self.toggles[op.slot()]
    }

    pub fn set(&mut self, op: Operator, on: bool) {
        self.toggles[op.slot()] = on;
    }

    /// Flip one toggle and return its new value.
    pub fn toggle(&mut self, op: Operator) -> bool {
        let slot = &mut self.toggles[op.slot()];
        *slot = !*slot;
        *slot
    }

    pub fn distortion(&self) -> f64 {
        self.distortion
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_distortion(&mut self, value: f64) {
        if !value.is_nan() {
            self.distortion = value.clamp(DISTORTION_RANGE.0, DISTORTION_RANGE.1);
        }
    }

    pub fn set_speed(&mut self, value: f64) {
        if !value.is_nan() {
            self.speed = value.clamp(SPEED_RANGE.0, SPEED_RANGE.1);
        }
    }

    pub fn describe(&self) -> VisualDescriptor {
        let mut d = VisualDescriptor::base();
        for op in Operator::ORDER {
            if !self.is_active(op) {
                continue;
            }
            match op {
                Operator::E => d.color = Color::Yellow,
                Operator::C => {
                    d.scale *= 1.3;
                    d.glow = Glow::High;
                }
                Operator::X => {
                    d.rotation_deg = 45.0;
                    d.color = Color::Red;
                }
                Operator::G => {
                    d.color = Color::Purple;
                    d.scale *= 0.8;
                }
            }
        }
        let gravity = if self.is_active(Operator::G) { 25.0 } else { 0.0 };
        d.distortion = (gravity + 0.4 * self.distortion).clamp(0.0, MAX_DISTORTION);
        d.speed_multiplier = (self.speed / UNITY_SPEED).max(MIN_SPEED_MULTIPLIER);
        d
    }
}
