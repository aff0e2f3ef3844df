#![no_std]
#![no_main]

use embassy_executor::Spawner;

#[cfg(feature = "defmt")]
use defmt_rtt as _;
#[cfg(feature = "defmt")]
use panic_probe as _;
#[cfg(not(feature = "defmt"))]
use panic_reset as _;

use dwnrf_app::prelude::*;

// Application main entry point. The spawner can be used to start async tasks.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("dwnrf {} ({})", FW_VERSION, BUILD_SHAPE);
    // First we initialize our board.
    let board = Dw1000Dk::default();

    // The radio IRQ task runs above thread mode.
    let irq_spawner = init_executors();

    #[cfg(not(feature = "multi-threaded"))]
    let radio = dwnrf_bsp::bring_up(
        board.radio,
        board.rtc2,
        irq_spawner,
        handlers(),
    );

    #[cfg(feature = "multi-threaded")]
    let radio = dwnrf_bsp::bring_up(
        board.radio,
        board.rtc2,
        board.timer2,
        irq_spawner,
        handlers(),
        |semaphore| {
            spawner
                .spawn(worker_task(semaphore))
                .map_err(|_| ConfigError::SpawnFailed)
        },
    );

    let radio = radio.expect("board bring-up failed");
    info!("board up at {} ms", CLOCK.now());

    spawner.must_spawn(ranging_task(radio));
    spawner.must_spawn(heartbeat_task(board.led1));
}
