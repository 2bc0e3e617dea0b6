//! Domain services used by the websocket route.
//!
//! ARCHITECTURE
//! ============
//! `color` holds the hue type and string formatting; `relay` owns the live
//! color state and the broadcast group. Routes only translate frames into
//! relay events.

pub mod color;
pub mod relay;
