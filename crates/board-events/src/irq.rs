use crate::config::{Edge, PinId};
use crate::error::ConfigError;
use crate::hal::ExtInterrupt;
use crate::handler::IrqHandler;

/// The transceiver's interrupt request line.
///
/// Created disabled. Enabling and disabling only gate delivery; the
/// handler installed at [`init`](Self::init) stays registered.
pub struct IrqLine<X: ExtInterrupt> {
    controller: X,
    pin: PinId,
    edge: Edge,
    enabled: bool,
    handler: IrqHandler,
    delivered: u32,
    masked: u32,
}

impl<X: ExtInterrupt> IrqLine<X> {
    /// Claim `pin` on the interrupt controller and install `handler`.
    pub fn init(
        mut controller: X,
        pin: PinId,
        edge: Edge,
        handler: IrqHandler,
    ) -> Result<Self, ConfigError> {
        controller.claim(pin, edge)?;
        debug!("irq line {} claimed, edge {}", pin, edge);

        Ok(Self {
            controller,
            pin,
            edge,
            enabled: false,
            handler,
            delivered: 0,
            masked: 0,
        })
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Service one detected edge.
    ///
    /// Returns `true` if the handler ran.
    pub fn on_edge(&mut self) -> bool {
        if !self.enabled {
            self.masked = self.masked.wrapping_add(1);
            trace!("irq edge on {} while disabled", self.pin);
            return false;
        }
        self.handler.invoke();
        self.delivered = self.delivered.wrapping_add(1);
        true
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    /// Number of handler invocations so far.
    pub fn delivered(&self) -> u32 {
        self.delivered
    }

    /// Number of edges dropped while the line was disabled.
    pub fn masked(&self) -> u32 {
        self.masked
    }

    pub fn controller_mut(&mut self) -> &mut X {
        &mut self.controller
    }
}
