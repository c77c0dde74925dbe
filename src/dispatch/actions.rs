use bitflags::bitflags;

bitflags! {
    /// Virtual key-code masks for paired controls.
    ///
    /// The values are a stable contract with the consumer, which ORs them
    /// into a movement bitmask alongside real keyboard input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyMask: u32 {
        const RIGHT     = 1;
        const FORWARD   = 2;
        const LEFT      = 4;
        const MOVE_DOWN = 8;
        const ZOOM      = 16;
    }
}

/// Consumer-side action handlers invoked by the dispatcher.
///
/// One-shot handlers fire once per press, on the rising edge only. Paired
/// controls receive complementary `key_down`/`key_up` calls modeling a
/// virtual keyboard key.
pub trait GameActions: Send + 'static {
    fn drop_bomb(&mut self);
    fn detonate(&mut self);
    fn pause(&mut self);
    fn show_stats(&mut self);
    fn key_down(&mut self, keys: KeyMask);
    fn key_up(&mut self, keys: KeyMask);
}
