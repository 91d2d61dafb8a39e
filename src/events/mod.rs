//! # Events Module
//!
//! The engine reports scan progress and ledger changes as events so the
//! CLI (or any other front end) can render them on its own thread.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Scan(ScanEvent::Progress(p)) = event {
//!             println!("{:>3.0}% {}", p.fraction * 100.0, p.message);
//!         }
//!     }
//! });
//!
//! orchestrator.scan(&mut sender.clone())?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
