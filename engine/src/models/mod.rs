// Wire-level representations of upstream payloads. Domain models live in `shared::models`.
pub mod candle_event;

pub use candle_event::CandleEvent;
