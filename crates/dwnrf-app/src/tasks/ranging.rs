use board_events::{BusSpeed, RadioBus};
use dwnrf_bsp::{Nrf52, RadioDevice};
use embassy_time::{with_timeout, Delay, Duration};

use crate::dw1000::{self, Dw1000};
use crate::{CLOCK, RADIO_IRQ};

/// Report an idle radio after this long without an interrupt.
const IDLE_REPORT: Duration = Duration::from_secs(5);

const EVENTS: u64 = dw1000::STATUS_TXFRS
    | dw1000::STATUS_RXFCG
    | dw1000::STATUS_RXFCE
    | dw1000::STATUS_RXRFTO;

/// Reset the radio, check it answers, then service its interrupts.
#[embassy_executor::task]
pub async fn ranging_task(mut radio: RadioBus<Nrf52>) {
    if radio.reset_radio(&mut Delay).is_err() {
        error!("radio reset failed");
        return;
    }

    let Some(device) = radio.spi.device() else {
        error!("radio bus not configured");
        return;
    };
    match Dw1000::new(device).device_id().await {
        Ok(dw1000::DW1000_ID) => info!("DW1000 found"),
        Ok(_id) => {
            error!("unexpected device id {=u32:x}", _id);
            return;
        }
        Err(_) => {
            error!("radio not answering");
            return;
        }
    }

    if radio.set_bus_speed(BusSpeed::Fast).is_err() {
        warn!("staying on the slow bus clock");
    }

    let unmasked = match radio.spi.device() {
        Some(device) => Dw1000::new(device).set_event_mask(EVENTS).await,
        None => return,
    };
    if unmasked.is_err() {
        error!("could not unmask radio events");
        return;
    }

    let mut last_event = CLOCK.now();
    loop {
        match with_timeout(IDLE_REPORT, RADIO_IRQ.wait()).await {
            Ok(()) => match service(radio.spi.device()).await {
                Ok(_status) => {
                    info!(
                        "radio event {=u64:x}, {} ms since the last",
                        _status,
                        CLOCK.elapsed_since(last_event)
                    );
                    last_event = CLOCK.now();
                }
                Err(()) => warn!("radio status read failed"),
            },
            Err(_) => info!("radio idle at {} ms", CLOCK.now()),
        }
    }
}

/// Read and acknowledge the events that raised the IRQ line.
async fn service(device: Option<&mut RadioDevice>) -> Result<u64, ()> {
    let mut dw = Dw1000::new(device.ok_or(())?);
    let status = dw.status().await.map_err(|_| ())?;
    dw.clear_status(status & EVENTS).await.map_err(|_| ())?;
    Ok(status)
}
