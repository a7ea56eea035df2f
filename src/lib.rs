#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod ai;
mod board;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod observer;
mod player;
pub mod prelude;
mod ship;
mod sim;
mod view;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use observer::{GameEvent, GameObserver, NullObserver, RecordingObserver};
pub use player::*;
pub use ship::*;
pub use sim::*;
pub use view::*;
