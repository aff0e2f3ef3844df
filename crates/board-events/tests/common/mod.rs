#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use board_events::hal::{
    CompareCounter, ExtInterrupt, PeriodicTimer, PinControl, SpiControl,
};
use board_events::{
    BoardConfig, BusConfig, ConfigError, Edge, HandoffConfig, Parts, PinId,
    Platform, SpiMode, TimeBaseConfig,
};

// ---------------------------------------------------------------------------
// Board description used across tests
// ---------------------------------------------------------------------------

pub const RESET: PinId = PinId::new(0, 21);
pub const IRQ: PinId = PinId::new(0, 19);
pub const CS: PinId = PinId::new(0, 17);

pub const CONFIG: BoardConfig = BoardConfig {
    bus: BusConfig {
        mode: SpiMode::Mode0,
        clock_slow_hz: 1_000_000,
        clock_fast_hz: 5_000_000,
        chip_select: CS,
        instance: 0,
    },
    reset: RESET,
    irq: IRQ,
    irq_edge: Edge::Rising,
    time_base: TimeBaseConfig { initial: 0, ticks_per_period: 50 },
};

pub const HANDOFF: HandoffConfig = HandoffConfig {
    instance: 2,
    channel: 0,
    frequency_hz: 16_000_000,
    ticks_per_period: 16_000,
    queue_limit: 4,
};

// ---------------------------------------------------------------------------
// Mock peripherals
// ---------------------------------------------------------------------------

/// Pins owned by someone, shared by every peripheral of one `Hardware`.
pub type Claims = Rc<RefCell<HashSet<PinId>>>;

fn claim(claims: &Claims, pin: PinId) -> Result<(), ConfigError> {
    if claims.borrow_mut().insert(pin) {
        Ok(())
    } else {
        Err(ConfigError::PinClaimed(pin))
    }
}

#[derive(Default)]
pub struct PinsState {
    /// Every `set_reset` call, in order.
    pub reset_log: Vec<bool>,
}

pub struct MockPins {
    claims: Claims,
    pub state: Rc<RefCell<PinsState>>,
}

impl PinControl for MockPins {
    fn init_pins(&mut self, reset: PinId) -> Result<(), ConfigError> {
        claim(&self.claims, reset)
    }

    fn set_reset(&mut self, asserted: bool) {
        self.state.borrow_mut().reset_log.push(asserted);
    }
}

#[derive(Default)]
pub struct SpiState {
    pub configured: Vec<(SpiMode, u32)>,
    /// Returned by the next `configure` call.
    pub fail_next: Option<ConfigError>,
}

pub struct MockSpi {
    pub state: Rc<RefCell<SpiState>>,
}

impl SpiControl for MockSpi {
    fn configure(&mut self, mode: SpiMode, hz: u32) -> Result<(), ConfigError> {
        let mut state = self.state.borrow_mut();
        if let Some(err) = state.fail_next.take() {
            return Err(err);
        }
        state.configured.push((mode, hz));
        Ok(())
    }
}

pub struct MockExt {
    claims: Claims,
    pub supports_both: bool,
}

impl ExtInterrupt for MockExt {
    fn claim(&mut self, pin: PinId, edge: Edge) -> Result<(), ConfigError> {
        if edge == Edge::Both && !self.supports_both {
            return Err(ConfigError::UnsupportedTrigger(edge));
        }
        claim(&self.claims, pin)
    }
}

#[derive(Default, Debug)]
pub struct CounterState {
    pub value: u32,
    pub compare: Option<u32>,
    pub event: bool,
    /// Raise the event again right after it is next taken.
    pub rematch: bool,
    /// Advance one tick after every event read, matching like hardware
    /// when the counter lands on the armed compare.
    pub creep: bool,
    pub started_at: Option<u32>,
}

/// Counter whose valid bits are `WIDTH` and whose compare needs to lead
/// it by `LEAD` ticks.
#[derive(Clone)]
pub struct MockCounter<const WIDTH: u32, const LEAD: u32 = 1> {
    pub state: Rc<RefCell<CounterState>>,
}

impl<const WIDTH: u32, const LEAD: u32> MockCounter<WIDTH, LEAD> {
    pub fn new() -> Self {
        Self { state: Rc::new(RefCell::new(CounterState::default())) }
    }

    /// Advance the counter to the armed compare value and raise the event.
    pub fn fire(&self) {
        let mut state = self.state.borrow_mut();
        let compare = state.compare.expect("compare not armed");
        state.value = compare;
        state.event = true;
    }

    pub fn set_value(&self, value: u32) {
        self.state.borrow_mut().value = value & WIDTH;
    }

    pub fn value(&self) -> u32 {
        self.state.borrow().value
    }

    pub fn armed(&self) -> Option<u32> {
        self.state.borrow().compare
    }
}

impl<const WIDTH: u32, const LEAD: u32> CompareCounter
    for MockCounter<WIDTH, LEAD>
{
    const MASK: u32 = WIDTH;
    const MIN_LEAD: u32 = LEAD;

    fn start(&mut self, initial: u32) -> Result<(), ConfigError> {
        let mut state = self.state.borrow_mut();
        state.value = initial;
        state.started_at = Some(initial);
        Ok(())
    }

    fn set_compare(&mut self, value: u32) {
        self.state.borrow_mut().compare = Some(value);
    }

    fn now(&self) -> u32 {
        self.state.borrow().value
    }

    fn take_compare_event(&mut self) -> bool {
        let mut state = self.state.borrow_mut();
        let event = core::mem::take(&mut state.event);
        if core::mem::take(&mut state.rematch) {
            state.event = true;
        }
        if state.creep {
            state.value = (state.value + 1) & WIDTH;
            if state.compare == Some(state.value) {
                state.event = true;
            }
        }
        event
    }
}

pub type Counter32 = MockCounter<{ u32::MAX }>;
pub type Counter24 = MockCounter<0x00FF_FFFF>;
/// 24 bits, compare must be at least two ticks ahead.
pub type RtcCounter = MockCounter<0x00FF_FFFF, 2>;

#[derive(Default, Debug)]
pub struct TimerState {
    /// `(channel, frequency_hz, ticks)` of the last start.
    pub started: Option<(u8, u32, u32)>,
    pub event: bool,
}

#[derive(Clone)]
pub struct MockTimer {
    pub state: Rc<RefCell<TimerState>>,
}

impl MockTimer {
    pub fn new() -> Self {
        Self { state: Rc::new(RefCell::new(TimerState::default())) }
    }

    pub fn fire(&self) {
        self.state.borrow_mut().event = true;
    }
}

impl PeriodicTimer for MockTimer {
    fn start_periodic(
        &mut self,
        channel: u8,
        frequency_hz: u32,
        ticks: u32,
    ) -> Result<(), ConfigError> {
        self.state.borrow_mut().started = Some((channel, frequency_hz, ticks));
        Ok(())
    }

    fn take_event(&mut self) -> bool {
        core::mem::take(&mut self.state.borrow_mut().event)
    }
}

pub struct MockPlatform;

impl Platform for MockPlatform {
    type Pins = MockPins;
    type Spi = MockSpi;
    type Ext = MockExt;
    type Counter = Counter32;
}

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

/// One simulated chip. Parts handed out by the same `Hardware` share pin
/// ownership, like peripherals of one MCU without a reset in between.
pub struct Hardware {
    pub claims: Claims,
    pub pins: Rc<RefCell<PinsState>>,
    pub spi: Rc<RefCell<SpiState>>,
    pub counter: Counter32,
}

impl Hardware {
    pub fn new() -> Self {
        Self {
            claims: Rc::new(RefCell::new(HashSet::new())),
            pins: Rc::new(RefCell::new(PinsState::default())),
            spi: Rc::new(RefCell::new(SpiState::default())),
            counter: Counter32::new(),
        }
    }

    pub fn parts(&self) -> Parts<MockPlatform> {
        Parts {
            pins: MockPins {
                claims: self.claims.clone(),
                state: self.pins.clone(),
            },
            spi: MockSpi { state: self.spi.clone() },
            ext: MockExt { claims: self.claims.clone(), supports_both: false },
            counter: self.counter.clone(),
        }
    }

    pub fn ext(&self) -> MockExt {
        MockExt { claims: self.claims.clone(), supports_both: false }
    }

    pub fn is_claimed(&self, pin: PinId) -> bool {
        self.claims.borrow().contains(&pin)
    }
}
