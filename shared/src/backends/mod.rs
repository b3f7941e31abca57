cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        use web_time::Instant as SystemInstant;
    } else {
        use std::time::Instant as SystemInstant;
    }
}

mod instant;
mod timer;

pub use instant::Instant;
pub use timer::Timer;
