use board_events::{
    BoardConfig, BusConfig, Edge, HandoffConfig, PinId, SpiMode,
    TimeBaseConfig,
};

/// RTC ticks in one time-base period. RTC2 runs unscaled at 32 768 Hz.
pub const RTC_TICKS_PER_MS: u32 = 33;

/// Radio wiring and clocks.
pub const BOARD: BoardConfig = BoardConfig {
    bus: BusConfig {
        mode: SpiMode::Mode0,
        clock_slow_hz: 1_000_000,
        clock_fast_hz: 5_000_000,
        chip_select: PinId::new(0, 17),
        instance: 0,
    },
    reset: PinId::new(0, 21),
    irq: PinId::new(0, 19),
    irq_edge: Edge::Rising,
    time_base: TimeBaseConfig {
        initial: 0,
        ticks_per_period: RTC_TICKS_PER_MS,
    },
};

/// TIMER2 channel 0 at 16 MHz, one release per millisecond.
pub const WORKER: HandoffConfig = HandoffConfig {
    instance: 2,
    channel: 0,
    frequency_hz: 16_000_000,
    ticks_per_period: 16_000,
    queue_limit: 8,
};
