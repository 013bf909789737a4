pub mod greeting;

pub use greeting::{GreetingVariant, HandlerOutcome, OutgoingResponse, handle};
