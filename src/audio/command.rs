//! Commands sent from the player thread to the audio thread via ring buffer.

/// Commands sent from the player thread to the audio thread via ring buffer.
#[derive(Debug)]
pub enum PlaybackCommand {
    /// Queue a chunk of mono samples behind whatever is already pending.
    Samples(Vec<f32>),

    /// Drop everything pending; output goes silent immediately.
    Stop,
}
