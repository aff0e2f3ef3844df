//! The few DW1000 registers the firmware touches directly.

use embedded_hal_async::spi::{Operation, SpiDevice};

/// Device identifier, 4 bytes.
pub const DEV_ID: u8 = 0x00;
/// System event mask, 4 bytes.
pub const SYS_MASK: u8 = 0x0E;
/// System event status, 5 bytes.
pub const SYS_STATUS: u8 = 0x0F;

/// RIDTAG 0xDECA, model 0x01, version 3, revision 0.
pub const DW1000_ID: u32 = 0xDECA_0130;

/// Transmit frame sent.
pub const STATUS_TXFRS: u64 = 1 << 7;
/// Receiver data frame ready.
pub const STATUS_RXDFR: u64 = 1 << 13;
/// Receiver FCS good.
pub const STATUS_RXFCG: u64 = 1 << 14;
/// Receiver FCS error.
pub const STATUS_RXFCE: u64 = 1 << 15;
/// Receive frame wait timeout.
pub const STATUS_RXRFTO: u64 = 1 << 17;

const WRITE: u8 = 0x80;
const REG_ID: u8 = 0x3F;

/// Register access over the radio's SPI device.
pub struct Dw1000<'a, D> {
    spi: &'a mut D,
}

impl<'a, D: SpiDevice> Dw1000<'a, D> {
    pub fn new(spi: &'a mut D) -> Self {
        Self { spi }
    }

    pub async fn read(
        &mut self,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), D::Error> {
        self.spi
            .transaction(&mut [
                Operation::Write(&[reg & REG_ID]),
                Operation::Read(buf),
            ])
            .await
    }

    pub async fn write(
        &mut self,
        reg: u8,
        data: &[u8],
    ) -> Result<(), D::Error> {
        self.spi
            .transaction(&mut [
                Operation::Write(&[WRITE | (reg & REG_ID)]),
                Operation::Write(data),
            ])
            .await
    }

    pub async fn device_id(&mut self) -> Result<u32, D::Error> {
        let mut id = [0; 4];
        self.read(DEV_ID, &mut id).await?;
        Ok(u32::from_le_bytes(id))
    }

    /// Unmask the status bits in `events` onto the IRQ pin.
    pub async fn set_event_mask(
        &mut self,
        events: u64,
    ) -> Result<(), D::Error> {
        let mask = (events as u32).to_le_bytes();
        self.write(SYS_MASK, &mask).await
    }

    pub async fn status(&mut self) -> Result<u64, D::Error> {
        let mut raw = [0; 8];
        self.read(SYS_STATUS, &mut raw[..5]).await?;
        Ok(u64::from_le_bytes(raw))
    }

    /// Status bits are cleared by writing ones.
    pub async fn clear_status(&mut self, bits: u64) -> Result<(), D::Error> {
        let raw = bits.to_le_bytes();
        self.write(SYS_STATUS, &raw[..5]).await
    }
}
