use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use web_time::{Duration, Instant};

use crate::error::ConfigError;

thread_local! {
    static CLOCK: RefCell<Option<Rc<dyn Clock>>> = const { RefCell::new(None) };
}

pub(crate) fn now() -> Instant {
    CLOCK.with(|c| c.borrow().as_ref().map(|c| c.now()).unwrap_or_else(Instant::now))
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Critically damped: settles without overshoot.
    Smooth,
    Spring { damping: f32, stiffness: f32 },
}

// Decay rate of the critically damped curve, in units of the animation duration.
const SMOOTH_RATE: f32 = 8.0;

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Smooth => {
                let k = SMOOTH_RATE;
                let raw = |x: f32| 1.0 - (1.0 + k * x) * (-k * x).exp();
                raw(t) / raw(1.0)
            }
            Easing::Spring { damping, stiffness } => {
                let omega = (stiffness / damping).sqrt();
                let zeta = damping / (2.0 * (stiffness * damping).sqrt());

                if zeta < 1.0 {
                    // underdamped
                    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
                    let t = t * 2.0;
                    1.0 - ((-zeta * omega * t).exp() * (omega_d * t).cos())
                } else {
                    t * (2.0 - t)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }
    /// Half a second, no bounce. Default for reveal transitions.
    pub fn smooth() -> Self {
        Self::tween(Duration::from_millis(500), Easing::Smooth)
    }
    pub fn spring() -> Self {
        Self::tween(
            Duration::from_millis(500),
            Easing::Spring {
                damping: 0.8,
                stiffness: 200.0,
            },
        )
    }
    pub fn fast() -> Self {
        Self::tween(Duration::from_millis(150), Easing::EaseOut)
    }
    pub fn slow() -> Self {
        Self::tween(Duration::from_millis(600), Easing::EaseInOut)
    }
    /// Jumps straight to the target.
    pub fn none() -> Self {
        Self::tween(Duration::ZERO, Easing::Linear)
    }
}

impl FromStr for AnimationSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smooth" => Ok(Self::smooth()),
            "spring" => Ok(Self::spring()),
            "fast" => Ok(Self::fast()),
            "slow" => Ok(Self::slow()),
            "none" | "instant" => Ok(Self::none()),
            "default" => Ok(Self::default()),
            other => Err(ConfigError::UnknownAnimation(other.to_string())),
        }
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

// Animation clock
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Install the animation clock for the current (UI) thread.
pub fn set_clock(clock: Rc<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = Some(clock));
}

/// Back to the system clock.
pub fn reset_clock() {
    CLOCK.with(|c| *c.borrow_mut() = None);
}

/// A clock tests drive by hand. Clones share the same time.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<std::cell::Cell<Instant>>,
}

impl TestClock {
    pub fn new(start: Instant) -> Self {
        Self {
            t: Rc::new(std::cell::Cell::new(start)),
        }
    }
    /// Creates a clock and installs it on this thread.
    pub fn install() -> Self {
        let clock = Self::new(Instant::now());
        set_clock(Rc::new(clock.clone()));
        clock
    }
    pub fn advance(&self, d: Duration) {
        self.t.set(self.t.get() + d);
    }
    pub fn set(&self, t: Instant) {
        self.t.set(t);
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

/// Animated value that transitions smoothly
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    start_time: Option<Instant>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            start_time: None,
        }
    }

    /// Retargeting mid-flight continues from wherever the value is now.
    pub fn set_target(&mut self, target: T) {
        self.start = self.current.clone();
        self.target = target;
        if self.spec.duration.is_zero() && self.spec.delay.is_zero() {
            self.current = self.target.clone();
            self.start_time = None;
        } else {
            self.start_time = Some(now());
        }
    }

    pub fn snap_to(&mut self, value: T) {
        self.current = value.clone();
        self.start = value.clone();
        self.target = value;
        self.start_time = None;
    }

    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
    }

    pub fn update(&mut self) -> bool {
        if let Some(start) = self.start_time {
            let elapsed = now().saturating_duration_since(start);

            if elapsed < self.spec.delay {
                return true;
            }

            let animation_time = elapsed - self.spec.delay;

            if animation_time >= self.spec.duration {
                self.current = self.target.clone();
                self.start_time = None;
                return false;
            }

            let t = animation_time.as_secs_f32() / self.spec.duration.as_secs_f32();
            let eased_t = self.spec.easing.interpolate(t);
            self.current = self.start.interpolate(&self.target, eased_t);

            true
        } else {
            false
        }
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    pub fn is_animating(&self) -> bool {
        self.start_time.is_some()
    }
}
