//! Entrance animations for alerts.
//!
//! An [`Animation`] pairs a [`Transition`] (what changes visually) with an
//! optional [`Curve`] (how progress evolves over time). Descriptors are pure
//! values: evaluating one at an elapsed time has no side effects, so the same
//! descriptor can drive any number of alerts.

use std::f64::consts::PI;
use std::time::Duration;

use ratatui::layout::Rect;
use serde::Deserialize;

/// Duration used by curves that do not specify one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(350);

/// Residual spring amplitude below which a spring counts as settled.
const SPRING_SETTLE_AMPLITUDE: f64 = 1e-3;

/// Screen edge an element moves in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Leading,
    Trailing,
}

/// Visual state of an element at one point of its animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub rect: Rect,
    pub opacity: f64,
}

impl Appearance {
    #[must_use]
    pub const fn settled(rect: Rect) -> Self {
        Self { rect, opacity: 1.0 }
    }
}

/// How an element enters the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Identity,
    Opacity,
    /// Scale from `from` to full size around the element's center.
    Scale { from: f64 },
    /// Move in from outside the given edge of the bounds.
    Move { edge: Edge },
    /// Apply both transitions, left first.
    Combined(Box<Transition>, Box<Transition>),
}

impl Transition {
    /// Scale up from nothing.
    #[must_use]
    pub const fn scale() -> Self {
        Self::Scale { from: 0.0 }
    }

    #[must_use]
    pub const fn scale_from(from: f64) -> Self {
        Self::Scale { from }
    }

    #[must_use]
    pub const fn move_from(edge: Edge) -> Self {
        Self::Move { edge }
    }

    #[must_use]
    pub fn combined(self, other: Self) -> Self {
        Self::Combined(Box::new(self), Box::new(other))
    }

    /// Appearance of an element whose settled position is `target` at the
    /// given progress. Progress may exceed 1.0 for overshooting curves.
    #[must_use]
    pub fn apply(&self, progress: f64, target: Rect, bounds: Rect) -> Appearance {
        self.apply_to(progress, Appearance::settled(target), target, bounds)
    }

    fn apply_to(&self, progress: f64, current: Appearance, target: Rect, bounds: Rect) -> Appearance {
        match self {
            Self::Identity => current,
            Self::Opacity => Appearance {
                opacity: current.opacity * progress.clamp(0.0, 1.0),
                ..current
            },
            Self::Scale { from } => {
                let factor = (1.0 - progress).mul_add(*from, progress);
                Appearance {
                    rect: scale_rect(current.rect, factor, bounds),
                    ..current
                }
            }
            Self::Move { edge } => {
                let remaining = 1.0 - progress;
                let (dx, dy) = match edge {
                    Edge::Bottom => (0, i32::from(bounds.bottom()) - i32::from(target.y)),
                    Edge::Top => (0, i32::from(bounds.y) - i32::from(target.bottom())),
                    Edge::Trailing => (i32::from(bounds.right()) - i32::from(target.x), 0),
                    Edge::Leading => (i32::from(bounds.x) - i32::from(target.right()), 0),
                };
                Appearance {
                    rect: offset_rect(current.rect, scale_offset(dx, remaining), scale_offset(dy, remaining), bounds),
                    ..current
                }
            }
            Self::Combined(first, second) => {
                let current = first.apply_to(progress, current, target, bounds);
                second.apply_to(progress, current, target, bounds)
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scale_offset(distance: i32, remaining: f64) -> i32 {
    (f64::from(distance) * remaining).round() as i32
}

#[allow(clippy::cast_possible_truncation)]
fn scale_rect(rect: Rect, factor: f64, bounds: Rect) -> Rect {
    let factor = if factor.is_nan() { 0.0 } else { factor.max(0.0) };
    let width = (f64::from(rect.width) * factor).round().min(f64::from(u16::MAX)) as i32;
    let height = (f64::from(rect.height) * factor).round().min(f64::from(u16::MAX)) as i32;
    let center_x = 2 * i32::from(rect.x) + i32::from(rect.width);
    let center_y = 2 * i32::from(rect.y) + i32::from(rect.height);
    clip((center_x - width) / 2, (center_y - height) / 2, width, height, bounds)
}

fn offset_rect(rect: Rect, dx: i32, dy: i32, bounds: Rect) -> Rect {
    clip(
        i32::from(rect.x) + dx,
        i32::from(rect.y) + dy,
        i32::from(rect.width),
        i32::from(rect.height),
        bounds,
    )
}

/// Intersect a signed rectangle with `bounds`.
fn clip(x: i32, y: i32, width: i32, height: i32, bounds: Rect) -> Rect {
    let left = x.max(i32::from(bounds.x));
    let top = y.max(i32::from(bounds.y));
    let right = (x + width).min(i32::from(bounds.right()));
    let bottom = (y + height).min(i32::from(bounds.bottom()));
    let to_u16 = |v: i32| u16::try_from(v).unwrap_or(0);
    if right <= left || bottom <= top {
        let x = left.clamp(i32::from(bounds.x), i32::from(bounds.right()));
        let y = top.clamp(i32::from(bounds.y), i32::from(bounds.bottom()));
        return Rect::new(to_u16(x), to_u16(y), 0, 0);
    }
    Rect::new(to_u16(left), to_u16(top), to_u16(right - left), to_u16(bottom - top))
}

/// Timing curve mapping elapsed time to progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    EaseOut { duration: Duration },
    EaseInOut { duration: Duration },
    /// Damped spring. `response` is the undamped period in seconds.
    Spring {
        response: f64,
        damping_fraction: f64,
        blend_duration: f64,
    },
}

impl Curve {
    /// Curve used when an animation does not name one.
    pub const AMBIENT: Self = Self::EaseInOut {
        duration: DEFAULT_DURATION,
    };

    /// Progress at `elapsed`. Starts at 0.0 and ends at 1.0; springs may
    /// overshoot on the way.
    #[must_use]
    pub fn value(&self, elapsed: Duration) -> f64 {
        match *self {
            Self::EaseOut { duration } => {
                let inv = 1.0 - normalized(elapsed, duration);
                inv.mul_add(-(inv * inv), 1.0)
            }
            Self::EaseInOut { duration } => {
                let t = normalized(elapsed, duration);
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = (-2.0f64).mul_add(t, 2.0);
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::Spring {
                response,
                damping_fraction,
                ..
            } => spring_value(response, damping_fraction, elapsed.as_secs_f64()),
        }
    }

    /// Time after which the curve stays at its final value.
    #[must_use]
    pub fn settle_time(&self) -> Duration {
        match *self {
            Self::EaseOut { duration } | Self::EaseInOut { duration } => duration,
            Self::Spring {
                response,
                damping_fraction,
                ..
            } => {
                if !response.is_finite() || response <= 0.0 {
                    return Duration::ZERO;
                }
                let decay = spring_damping(damping_fraction) * 2.0 * PI / response;
                Duration::try_from_secs_f64(-SPRING_SETTLE_AMPLITUDE.ln() / decay).unwrap_or(Duration::MAX)
            }
        }
    }
}

fn normalized(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

fn spring_damping(damping_fraction: f64) -> f64 {
    damping_fraction.max(0.01)
}

/// Step response of a unit-mass spring with stiffness `(2π / response)²`.
fn spring_value(response: f64, damping_fraction: f64, t: f64) -> f64 {
    if !response.is_finite() || response <= 0.0 {
        return 1.0;
    }
    let omega = 2.0 * PI / response;
    let zeta = spring_damping(damping_fraction);
    let envelope = (-zeta * omega * t).exp();
    if envelope < SPRING_SETTLE_AMPLITUDE {
        return 1.0;
    }
    if zeta < 1.0 {
        let damped = omega * (1.0 - zeta * zeta).sqrt();
        let phase = (zeta * omega / damped).mul_add((damped * t).sin(), (damped * t).cos());
        envelope.mul_add(-phase, 1.0)
    } else {
        envelope.mul_add(-omega.mul_add(t, 1.0), 1.0)
    }
}

/// Transition plus timing curve used for an alert's entrance.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    transition: Transition,
    curve: Option<Curve>,
}

impl Animation {
    const fn new(transition: Transition, curve: Option<Curve>) -> Self {
        Self { transition, curve }
    }

    /// Scale down from 1.2 while fading in, ease-out over 0.15 s.
    #[must_use]
    pub fn default_effect() -> Self {
        Self::new(
            Transition::scale_from(1.2).combined(Transition::Opacity),
            Some(Curve::EaseOut {
                duration: Duration::from_millis(150),
            }),
        )
    }

    /// Scale up while fading in on a bouncy spring.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(
            Transition::scale().combined(Transition::Opacity),
            Some(Curve::Spring {
                response: 0.25,
                damping_fraction: 0.6,
                blend_duration: 0.25,
            }),
        )
    }

    /// Scale up while fading in on the ambient curve.
    #[must_use]
    pub fn zoom() -> Self {
        Self::new(Transition::scale().combined(Transition::Opacity), None)
    }

    #[must_use]
    pub const fn fade() -> Self {
        Self::new(Transition::Opacity, None)
    }

    /// Slide in from the bottom edge while fading in, ease-out.
    #[must_use]
    pub fn slide_up() -> Self {
        Self::new(
            Transition::move_from(Edge::Bottom).combined(Transition::Opacity),
            Some(Curve::EaseOut {
                duration: DEFAULT_DURATION,
            }),
        )
    }

    /// Any transition on the ambient curve.
    #[must_use]
    pub const fn custom(transition: Transition) -> Self {
        Self::new(transition, None)
    }

    /// Replace the timing curve, e.g. to run a custom transition on a spring.
    #[must_use]
    pub const fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = Some(curve);
        self
    }

    #[must_use]
    pub const fn transition(&self) -> &Transition {
        &self.transition
    }

    #[must_use]
    pub const fn curve(&self) -> Option<Curve> {
        self.curve
    }

    #[must_use]
    pub fn effective_curve(&self) -> Curve {
        self.curve.unwrap_or(Curve::AMBIENT)
    }

    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        self.effective_curve().value(elapsed)
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.effective_curve().settle_time()
    }

    /// Appearance of an element settling at `target` after `elapsed`.
    #[must_use]
    pub fn appearance(&self, elapsed: Duration, target: Rect, bounds: Rect) -> Appearance {
        if self.is_finished(elapsed) {
            return Appearance::settled(target);
        }
        self.transition.apply(self.progress(elapsed), target, bounds)
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::default_effect()
    }
}

/// Names of the built-in animations, as used in config and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    #[default]
    Default,
    Classic,
    Zoom,
    Fade,
    SlideUp,
}

impl AnimationKind {
    #[must_use]
    pub fn animation(self) -> Animation {
        match self {
            Self::Default => Animation::default_effect(),
            Self::Classic => Animation::classic(),
            Self::Zoom => Animation::zoom(),
            Self::Fade => Animation::fade(),
            Self::SlideUp => Animation::slide_up(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(0, 0, 80, 24);
    const CARD: Rect = Rect::new(10, 8, 60, 8);

    #[test]
    fn test_default_effect_constants() {
        let animation = Animation::default_effect();
        assert_eq!(
            animation.curve(),
            Some(Curve::EaseOut {
                duration: Duration::from_millis(150)
            })
        );
        assert_eq!(
            animation.transition(),
            &Transition::scale_from(1.2).combined(Transition::Opacity)
        );
        assert_eq!(Animation::default(), animation);
    }

    #[test]
    fn test_classic_spring_constants() {
        let Some(Curve::Spring {
            response,
            damping_fraction,
            blend_duration,
        }) = Animation::classic().curve()
        else {
            panic!("classic animation must use a spring");
        };
        assert!((response - 0.25).abs() < f64::EPSILON);
        assert!((damping_fraction - 0.6).abs() < f64::EPSILON);
        assert!((blend_duration - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_and_fade_use_ambient_curve() {
        assert_eq!(Animation::zoom().curve(), None);
        assert_eq!(Animation::fade().curve(), None);
        assert_eq!(Animation::fade().effective_curve(), Curve::AMBIENT);
        assert_eq!(Animation::fade().transition(), &Transition::Opacity);
    }

    #[test]
    fn test_custom_keeps_transition() {
        let transition = Transition::move_from(Edge::Top);
        let animation = Animation::custom(transition.clone());
        assert_eq!(animation.transition(), &transition);
        assert_eq!(animation.curve(), None);
    }

    #[test]
    fn test_factories_are_independent_values() {
        let first = Animation::slide_up();
        let second = Animation::slide_up();
        let elapsed = Duration::from_millis(100);

        let a = first.appearance(elapsed, CARD, BOUNDS);
        let b = second.appearance(elapsed, CARD, BOUNDS);
        assert_eq!(a, b);
        // evaluating again yields the same result
        assert_eq!(first.appearance(elapsed, CARD, BOUNDS), a);
    }

    #[test]
    fn test_ease_out_endpoints() {
        let curve = Curve::EaseOut {
            duration: Duration::from_millis(150),
        };
        assert!(curve.value(Duration::ZERO).abs() < f64::EPSILON);
        assert!((curve.value(Duration::from_millis(150)) - 1.0).abs() < f64::EPSILON);
        assert!(curve.value(Duration::from_millis(75)) > 0.5);
        assert!((curve.value(Duration::from_secs(5)) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spring_overshoots_then_settles() {
        let curve = Animation::classic().effective_curve();
        let peak = (0..60)
            .map(|ms| curve.value(Duration::from_millis(ms * 5)))
            .fold(0.0f64, f64::max);
        assert!(peak > 1.0);

        let settle = curve.settle_time();
        assert!(settle > Duration::from_millis(250));
        assert!(settle < Duration::from_secs(1));
        assert!((curve.value(settle + Duration::from_millis(1)) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scale_from_larger_shrinks_to_target() {
        let transition = Transition::scale_from(1.2);
        let start = transition.apply(0.0, CARD, BOUNDS);
        assert!(start.rect.width > CARD.width);
        assert_eq!(transition.apply(1.0, CARD, BOUNDS).rect, CARD);
    }

    #[test]
    fn test_scale_from_zero_starts_empty() {
        let start = Transition::scale().apply(0.0, CARD, BOUNDS);
        assert_eq!(start.rect.area(), 0);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let transition = Transition::Opacity;
        assert!(transition.apply(0.0, CARD, BOUNDS).opacity.abs() < f64::EPSILON);
        assert!((transition.apply(1.4, CARD, BOUNDS).opacity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_from_bottom_starts_offscreen() {
        let transition = Transition::move_from(Edge::Bottom);
        let start = transition.apply(0.0, CARD, BOUNDS);
        assert_eq!(start.rect.area(), 0);

        let halfway = transition.apply(0.5, CARD, BOUNDS);
        assert!(halfway.rect.y > CARD.y);
        assert_eq!(transition.apply(1.0, CARD, BOUNDS).rect, CARD);
    }

    #[test]
    fn test_finished_animation_is_settled() {
        let animation = Animation::default_effect();
        let appearance = animation.appearance(Duration::from_millis(200), CARD, BOUNDS);
        assert_eq!(appearance, Appearance::settled(CARD));
    }

    #[test]
    fn test_kind_maps_to_factory() {
        assert_eq!(AnimationKind::Default.animation(), Animation::default_effect());
        assert_eq!(AnimationKind::SlideUp.animation(), Animation::slide_up());
        assert_eq!(AnimationKind::default(), AnimationKind::Default);
    }

    #[test]
    fn test_custom_transition_with_own_curve() {
        let curve = Curve::EaseOut {
            duration: Duration::from_millis(100),
        };
        let animation = Animation::custom(Transition::Opacity).with_curve(curve);
        assert_eq!(animation.curve(), Some(curve));
        assert_eq!(animation.effective_curve(), curve);

        let halfway = animation.appearance(Duration::from_millis(50), CARD, BOUNDS);
        assert!((halfway.opacity - 0.875).abs() < 1e-9);
        // the ambient curve would still be running at this point
        assert!(!Animation::custom(Transition::Opacity).is_finished(Duration::from_millis(100)));
        assert_eq!(
            animation.appearance(Duration::from_millis(100), CARD, BOUNDS),
            Appearance::settled(CARD)
        );
    }

    #[test]
    fn test_non_finite_spring_response_settles_immediately() {
        for response in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let curve = Curve::Spring {
                response,
                damping_fraction: 0.6,
                blend_duration: 0.25,
            };
            assert_eq!(curve.settle_time(), Duration::ZERO);
            assert!((curve.value(Duration::from_millis(10)) - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_huge_spring_response_saturates_settle_time() {
        let curve = Curve::Spring {
            response: f64::MAX,
            damping_fraction: 0.6,
            blend_duration: 0.25,
        };
        assert_eq!(curve.settle_time(), Duration::MAX);
    }
}
