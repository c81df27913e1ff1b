#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSerialEvent {
    Opened,
    /// A line the microcontroller printed back, without the terminator.
    Line(String),
    /// The read side ended. The port may still accept writes.
    Closed,
}

/// Duplex byte stream to the sorting microcontroller. Framing and baud rate
/// are configured outside this program.
pub trait DeviceSerial {
    fn open(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn is_open(&self) -> bool;
    fn write(&self, bytes: &[u8]) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn events(&self) -> std::sync::mpsc::Receiver<DeviceSerialEvent>;
}
