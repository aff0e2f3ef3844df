mod common;

use std::sync::atomic::{AtomicU32, Ordering};

use board_events::{ConfigError, Edge, IrqHandler, IrqLine, RadioSignal};
use common::{Hardware, IRQ};

#[test]
fn init_claims_pin_and_starts_disabled() {
    let hw = Hardware::new();

    let line =
        IrqLine::init(hw.ext(), IRQ, Edge::Rising, IrqHandler::None).unwrap();

    assert!(hw.is_claimed(IRQ));
    assert!(!line.is_enabled());
    assert_eq!(line.pin(), IRQ);
    assert_eq!(line.edge(), Edge::Rising);
}

#[test]
fn edge_while_disabled_is_dropped_then_delivered_once_enabled() {
    static CALLS: AtomicU32 = AtomicU32::new(0);
    fn on_irq() {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    let hw = Hardware::new();
    let mut line =
        IrqLine::init(hw.ext(), IRQ, Edge::Rising, IrqHandler::Call(on_irq))
            .unwrap();

    assert!(!line.on_edge());
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    assert_eq!(line.masked(), 1);

    line.enable();
    assert!(line.on_edge());
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(line.delivered(), 1);
}

#[test]
fn one_invocation_per_edge() {
    static CALLS: AtomicU32 = AtomicU32::new(0);
    fn on_irq() {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    let hw = Hardware::new();
    let mut line =
        IrqLine::init(hw.ext(), IRQ, Edge::Rising, IrqHandler::Call(on_irq))
            .unwrap();
    line.enable();

    for n in 1..=25 {
        line.on_edge();
        assert_eq!(CALLS.load(Ordering::SeqCst), n);
    }
    assert_eq!(line.delivered(), 25);
    assert_eq!(line.masked(), 0);
}

#[test]
fn disabling_keeps_the_handler() {
    static CALLS: AtomicU32 = AtomicU32::new(0);
    fn on_irq() {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }

    let hw = Hardware::new();
    let mut line =
        IrqLine::init(hw.ext(), IRQ, Edge::Rising, IrqHandler::Call(on_irq))
            .unwrap();

    line.enable();
    line.on_edge();
    line.disable();
    line.on_edge();
    line.on_edge();
    line.enable();
    line.on_edge();

    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    assert_eq!(line.masked(), 2);
}

#[futures_test::test]
async fn signal_handler_wakes_waiter() {
    static RADIO: RadioSignal = RadioSignal::new();

    let hw = Hardware::new();
    let mut line =
        IrqLine::init(hw.ext(), IRQ, Edge::Rising, IrqHandler::Signal(&RADIO))
            .unwrap();

    line.on_edge();
    assert!(!RADIO.signaled());

    line.enable();
    line.on_edge();
    assert!(RADIO.signaled());
    RADIO.wait().await;
    assert!(!RADIO.signaled());
}

#[test]
fn second_claim_of_same_pin_fails() {
    let hw = Hardware::new();
    let _line =
        IrqLine::init(hw.ext(), IRQ, Edge::Rising, IrqHandler::None).unwrap();

    let again = IrqLine::init(hw.ext(), IRQ, Edge::Rising, IrqHandler::None);
    assert_eq!(again.err(), Some(ConfigError::PinClaimed(IRQ)));
}

#[test]
fn unsupported_trigger_is_rejected() {
    let hw = Hardware::new();

    let line = IrqLine::init(hw.ext(), IRQ, Edge::Both, IrqHandler::None);

    assert_eq!(line.err(), Some(ConfigError::UnsupportedTrigger(Edge::Both)));
    assert!(!hw.is_claimed(IRQ));
}
