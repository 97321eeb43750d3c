use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use super::{ControllerConfig, Driver, PwmChannel, Status};
use crate::Color;

/// The value the driver's pixel getter reports for positions past the end.
const OUT_OF_RANGE_PIXEL: u32 = u32::MAX;

/// A snapshot of both channels, taken at a successful render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFrame {
    /// The pixel buffer of each channel slot.
    pub pixels: [Vec<Color>; 2],
    /// The brightness of each channel slot.
    pub brightness: [u8; 2],
}

/// A handle to the failure queues of a [FakeDriver].
///
/// Stays usable after the driver was moved into a [Strip](crate::Strip).
#[derive(Debug, Clone, Default)]
pub struct FailureQueue {
    init: Rc<RefCell<VecDeque<Status>>>,
    render: Rc<RefCell<VecDeque<Status>>>,
}

impl FailureQueue {
    /// Lets the next call to [init](Driver::init) return `status`.
    pub fn fail_next_init(&self, status: Status) -> &Self {
        self.init.borrow_mut().push_back(status);
        self
    }

    /// Lets the next call to [render](Driver::render) return `status`.
    ///
    /// Multiple failures are returned in the order they were queued.
    pub fn fail_next_render(&self, status: Status) -> &Self {
        self.render.borrow_mut().push_back(status);
        self
    }

    fn next_init(&self) -> Option<Status> {
        self.init.borrow_mut().pop_front()
    }

    fn next_render(&self) -> Option<Status> {
        self.render.borrow_mut().pop_front()
    }
}

#[derive(Debug, Clone, Default)]
struct FakeChannel {
    pixels: Vec<Color>,
    brightness: u8,
}

/// An in-memory driver without any hardware access.
///
/// Records what it gets asked to do, so tests can inspect it,
/// and can be told to fail the next [init](Driver::init) or
/// [render](Driver::render) with a given status.
#[derive(Debug, Default)]
pub struct FakeDriver {
    config: Option<ControllerConfig>,
    channels: [FakeChannel; 2],
    frames: Vec<RenderedFrame>,
    failures: FailureQueue,
    initialized: bool,
    init_calls: usize,
    render_calls: usize,
    finalize_calls: usize,
    unbalanced_finalize_calls: usize,
}

impl FakeDriver {
    /// Creates a driver that succeeds at everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets the next call to [init](Driver::init) return `status`.
    pub fn fail_next_init(&mut self, status: Status) -> &mut Self {
        self.failures.fail_next_init(status);
        self
    }

    /// Lets the next call to [render](Driver::render) return `status`.
    ///
    /// Multiple failures are returned in the order they were queued.
    pub fn fail_next_render(&mut self, status: Status) -> &mut Self {
        self.failures.fail_next_render(status);
        self
    }

    /// A handle for queuing failures once the driver is owned by a strip.
    pub fn failures(&self) -> FailureQueue {
        self.failures.clone()
    }

    /// The configuration of the last successful init.
    pub fn config(&self) -> Option<&ControllerConfig> {
        self.config.as_ref()
    }

    /// Whether the driver holds hardware resources right now.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// All frames rendered so far, oldest first.
    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    /// The frame that is currently displayed.
    pub fn last_frame(&self) -> Option<&RenderedFrame> {
        self.frames.last()
    }

    /// How often [init](Driver::init) was called.
    pub fn init_calls(&self) -> usize {
        self.init_calls
    }

    /// How often [render](Driver::render) was called, including failed attempts.
    pub fn render_calls(&self) -> usize {
        self.render_calls
    }

    /// How often [finalize](Driver::finalize) was called.
    pub fn finalize_calls(&self) -> usize {
        self.finalize_calls
    }

    /// How often [finalize](Driver::finalize) was called without
    /// a preceding successful init. Non-zero means a double release.
    pub fn unbalanced_finalize_calls(&self) -> usize {
        self.unbalanced_finalize_calls
    }

    fn channel(&self, channel: PwmChannel) -> &FakeChannel {
        &self.channels[channel.index()]
    }

    fn channel_mut(&mut self, channel: PwmChannel) -> &mut FakeChannel {
        &mut self.channels[channel.index()]
    }
}

impl Driver for FakeDriver {
    fn init(&mut self, config: &ControllerConfig) -> Status {
        self.init_calls += 1;

        if let Some(status) = self.failures.next_init() {
            return status;
        }

        for slot in PwmChannel::ALL {
            let (count, brightness) = config
                .channel(slot)
                .map_or((0, 0), |c| (c.count, c.brightness));

            *self.channel_mut(slot) = FakeChannel {
                pixels: vec![Color::BLACK; count],
                brightness,
            };
        }

        self.config = Some(*config);
        self.initialized = true;
        Status::SUCCESS
    }

    fn render(&mut self) -> Status {
        self.render_calls += 1;

        if !self.initialized {
            return Status::ERROR_GENERIC;
        }
        if let Some(status) = self.failures.next_render() {
            return status;
        }

        let [ch0, ch1] = &self.channels;
        self.frames.push(RenderedFrame {
            pixels: [ch0.pixels.clone(), ch1.pixels.clone()],
            brightness: [ch0.brightness, ch1.brightness],
        });
        Status::SUCCESS
    }

    fn set_pixel(&mut self, channel: PwmChannel, index: usize, color: Color) {
        if let Some(pixel) = self.channel_mut(channel).pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn get_pixel(&self, channel: PwmChannel, index: usize) -> Color {
        self.channel(channel)
            .pixels
            .get(index)
            .copied()
            .unwrap_or(Color::from(OUT_OF_RANGE_PIXEL))
    }

    fn pixel_count(&self, channel: PwmChannel) -> usize {
        self.channel(channel).pixels.len()
    }

    fn set_brightness(&mut self, channel: PwmChannel, brightness: u8) {
        self.channel_mut(channel).brightness = brightness;
    }

    fn brightness(&self, channel: PwmChannel) -> u8 {
        self.channel(channel).brightness
    }

    fn finalize(&mut self) {
        self.finalize_calls += 1;

        if !self.initialized {
            self.unbalanced_finalize_calls += 1;
            return;
        }

        self.initialized = false;
        self.channels = Default::default();
    }
}
