//! # Events Module
//!
//! Event-driven progress reporting for the forensic pipeline.
//!
//! ## Design
//! The core library emits events through channels, allowing any front end
//! (CLI, GUI, service) to subscribe and display progress without the library
//! knowing who is listening.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! // In a separate thread, listen for events
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Analyzer(AnalyzerEvent::Completed { kind, .. }) => {
//!                 println!("{} done", kind)
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! // Run the pipeline with the sender
//! pipeline.run_with_events(&bytes, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
