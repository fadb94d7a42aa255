/// Open/close notifications and the synchronous observer list.
pub mod events;
/// The [`SequencePlayer`](sequence_player::SequencePlayer) surface.
pub mod sequence_player;
